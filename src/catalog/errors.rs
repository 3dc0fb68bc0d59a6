#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("schema {0} declares no fields")]
    EmptySchema(String),
    #[error("schema {0} declares field {1} more than once")]
    DuplicateColumn(String, String),
    #[error("type {0} is already registered")]
    DuplicateType(String),
}

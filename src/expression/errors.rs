#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("malformed tree: {0}")]
    MalformedTree(String),
}

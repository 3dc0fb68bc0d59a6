use super::LogicalType;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("can not compare two types: {0} and {1}")]
    Incomparable(LogicalType, LogicalType),
    #[error("can not combine these numeric types {0} and {1}")]
    NumericCombination(LogicalType, LogicalType),
    #[error("type {0} has no columnar representation")]
    NoColumnarType(LogicalType),
}

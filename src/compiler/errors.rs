use crate::expression::{ComparisonOperator, ExpressionError};
use crate::types::LogicalType;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("type mismatch: {1} {0} {2}")]
    TypeMismatch(ComparisonOperator, LogicalType, LogicalType),
    #[error("malformed tree: {0}")]
    MalformedTree(String),
}

impl From<ExpressionError> for CompileError {
    fn from(err: ExpressionError) -> Self {
        match err {
            ExpressionError::MalformedTree(reason) => CompileError::MalformedTree(reason),
        }
    }
}

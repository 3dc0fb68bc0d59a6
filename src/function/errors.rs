use crate::expression::ComparisonOperator;
use crate::types::LogicalType;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("unsupported comparison {1} {0} {1}")]
    UnsupportedComparison(ComparisonOperator, LogicalType),
}

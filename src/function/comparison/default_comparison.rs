use std::cmp::Ordering;

use super::{ComparisonFunc, ComparisonFunction};
use crate::expression::ComparisonOperator;
use crate::function::FunctionError;
use crate::types::LogicalType;

pub struct DefaultComparisonFunctions;

impl DefaultComparisonFunctions {
    fn default_gt_function(ordering: Option<Ordering>) -> bool {
        ordering == Some(Ordering::Greater)
    }

    fn default_gt_eq_function(ordering: Option<Ordering>) -> bool {
        matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
    }

    fn default_lt_function(ordering: Option<Ordering>) -> bool {
        ordering == Some(Ordering::Less)
    }

    fn default_lt_eq_function(ordering: Option<Ordering>) -> bool {
        matches!(ordering, Some(Ordering::Less | Ordering::Equal))
    }

    fn default_eq_function(ordering: Option<Ordering>) -> bool {
        ordering == Some(Ordering::Equal)
    }

    fn default_neq_function(ordering: Option<Ordering>) -> bool {
        ordering != Some(Ordering::Equal)
    }

    fn get_comparison_function_internal(op: ComparisonOperator) -> (&'static str, ComparisonFunc) {
        match op {
            ComparisonOperator::Equal => ("eq", Self::default_eq_function),
            ComparisonOperator::NotEqual => ("neq", Self::default_neq_function),
            ComparisonOperator::LessThan => ("lt", Self::default_lt_function),
            ComparisonOperator::LessOrEqual => ("lt_eq", Self::default_lt_eq_function),
            ComparisonOperator::GreaterThan => ("gt", Self::default_gt_function),
            ComparisonOperator::GreaterOrEqual => ("gt_eq", Self::default_gt_eq_function),
        }
    }

    fn supports(op: ComparisonOperator, comparison_type: &LogicalType) -> bool {
        match comparison_type {
            LogicalType::Integer
            | LogicalType::Bigint
            | LogicalType::Double
            | LogicalType::Varchar => true,
            // booleans have no meaningful order
            LogicalType::Boolean => op.is_equality(),
            LogicalType::Record(_) => false,
        }
    }

    pub fn get_comparison_function(
        op: ComparisonOperator,
        comparison_type: &LogicalType,
    ) -> Result<ComparisonFunction, FunctionError> {
        if !Self::supports(op, comparison_type) {
            return Err(FunctionError::UnsupportedComparison(
                op,
                comparison_type.clone(),
            ));
        }
        let (name, func) = Self::get_comparison_function_internal(op);
        Ok(ComparisonFunction::new(
            name.to_string(),
            op,
            func,
            comparison_type.clone(),
        ))
    }
}

use std::cmp::Ordering;

use derive_new::new;

use crate::expression::ComparisonOperator;
use crate::types::LogicalType;

/// Decides a comparison from the ordering of the left operand relative to the right one.
/// `None` means the operands are unordered (a NaN double).
pub type ComparisonFunc = fn(ordering: Option<Ordering>) -> bool;

#[derive(new, Clone)]
pub struct ComparisonFunction {
    // The name of the function
    pub(crate) name: String,
    pub(crate) op: ComparisonOperator,
    /// The main comparison function to execute.
    /// Left and right operands are coerced to `comparison_type` before they are ordered.
    pub(crate) function: ComparisonFunc,
    /// The comparison type
    pub(crate) comparison_type: LogicalType,
}

impl ComparisonFunction {
    pub fn evaluate(&self, ordering: Option<Ordering>) -> bool {
        (self.function)(ordering)
    }
}

impl std::fmt::Debug for ComparisonFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonFunction")
            .field("name", &self.name)
            .field(
                "func",
                &format!(
                    "{} {} {}",
                    self.comparison_type, self.op, self.comparison_type
                ),
            )
            .finish()
    }
}

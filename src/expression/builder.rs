use derive_new::new;
use itertools::Itertools;

use super::{ComparisonOperator, Expr, ExpressionError};
use crate::types::ScalarValue;

/// Create an expression that refers to the predicate's input record.
pub fn param(name: &str) -> Expr {
    Expr::Parameter(name.to_string())
}

/// Create a literal expression from a scalar value.
pub fn lit<T>(value: T) -> Expr
where
    T: Into<ScalarValue>,
{
    Expr::Constant(value.into())
}

impl Expr {
    /// `self.name`. An empty name is accepted here and rejected by the compiler.
    pub fn field(self, name: &str) -> Expr {
        Expr::FieldAccess {
            target: Box::new(self),
            field: name.to_string(),
        }
    }

    pub fn compare(self, op: ComparisonOperator, other: Expr) -> Expr {
        Expr::binary_comparison(op, self, other)
    }

    pub fn gt(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::GreaterThan, other)
    }

    pub fn lt(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::LessThan, other)
    }

    pub fn gt_eq(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::GreaterOrEqual, other)
    }

    pub fn lt_eq(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::LessOrEqual, other)
    }

    pub fn equal(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::Equal, other)
    }

    pub fn not_equal(self, other: Expr) -> Expr {
        self.compare(ComparisonOperator::NotEqual, other)
    }
}

/// A comparison of one property path against a constant, e.g. `victory > 19400000` or
/// `coach.name == 'Ivan'`.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyComparison {
    /// dot separated field path, relative to the input record
    pub path: String,
    pub op: ComparisonOperator,
    pub value: ScalarValue,
}

impl PropertyComparison {
    /// Lower the description to a tree rooted at a comparison over `parameter`.
    pub fn to_expr(&self, parameter: &str) -> Result<Expr, ExpressionError> {
        let target = self
            .segments()
            .into_iter()
            .try_fold(param(parameter), |target, segment| {
                Expr::try_field_access(target, segment)
            })?;
        Expr::try_binary_comparison(self.op, vec![target, lit(self.value.clone())])
    }

    pub fn segments(&self) -> Vec<&str> {
        self.path.split('.').collect_vec()
    }
}

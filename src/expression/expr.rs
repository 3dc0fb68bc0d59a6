use std::fmt;

use super::{ComparisonOperator, ExpressionError};
use crate::types::ScalarValue;

/// One node of a single-argument predicate tree, built before the record type is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The implicit input record. The name is a label only.
    Parameter(String),
    /// Reads `field` off the value produced by `target`.
    FieldAccess { target: Box<Expr>, field: String },
    /// A literal, its variant fixes the literal type.
    Constant(ScalarValue),
    BinaryComparison {
        op: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Field access that rejects an empty field name.
    pub fn try_field_access(target: Expr, field: impl Into<String>) -> Result<Expr, ExpressionError> {
        let field = field.into();
        if field.is_empty() {
            return Err(ExpressionError::MalformedTree(format!(
                "field access on `{}` requires a field name",
                target
            )));
        }
        Ok(Expr::FieldAccess {
            target: Box::new(target),
            field,
        })
    }

    /// Comparison from an operand list, which must hold exactly two nodes.
    pub fn try_binary_comparison(
        op: ComparisonOperator,
        operands: Vec<Expr>,
    ) -> Result<Expr, ExpressionError> {
        let [left, right]: [Expr; 2] = operands.try_into().map_err(|operands: Vec<Expr>| {
            ExpressionError::MalformedTree(format!(
                "comparison {} takes 2 operands, got {}",
                op,
                operands.len()
            ))
        })?;
        Ok(Expr::binary_comparison(op, left, right))
    }

    pub fn binary_comparison(op: ComparisonOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryComparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Parameter(_) => "parameter",
            Expr::FieldAccess { .. } => "field access",
            Expr::Constant(_) => "constant",
            Expr::BinaryComparison { .. } => "comparison",
        }
    }

    /// Every parameter label used by the tree, in visiting order.
    pub fn parameters(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_parameters(&mut names);
        names
    }

    fn collect_parameters<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Parameter(name) => names.push(name),
            Expr::FieldAccess { target, .. } => target.collect_parameters(names),
            Expr::Constant(_) => {}
            Expr::BinaryComparison { left, right, .. } => {
                left.collect_parameters(names);
                right.collect_parameters(names);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(name) => write!(f, "{}", name),
            Expr::FieldAccess { target, field } => write!(f, "{}.{}", target, field),
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::BinaryComparison { op, left, right } => {
                // nested comparisons need parentheses to read back unchanged
                let wrap = |e: &Expr| match e {
                    Expr::BinaryComparison { .. } => format!("({})", e),
                    _ => e.to_string(),
                };
                write!(f, "{} {} {}", wrap(left), op, wrap(right))
            }
        }
    }
}

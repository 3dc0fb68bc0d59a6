use std::sync::Arc;

use super::bound_expr::{BoundExpr, BoundOperand, Operand};
use super::{CompileError, PredicateCompiler};
use crate::catalog::BooleanAccessor;
use crate::expression::{ComparisonOperator, Expr};
use crate::function::DefaultComparisonFunctions;
use crate::types::LogicalType;

impl<'a, R: 'static> PredicateCompiler<'a, R> {
    pub(crate) fn bind_comparison(
        &self,
        op: ComparisonOperator,
        left: &Expr,
        right: &Expr,
    ) -> Result<BoundExpr<'a, R>, CompileError> {
        let left = self.bind_expr(left)?;
        let right = self.bind_expr(right)?;
        let (left_type, right_type) = (left.return_type(), right.return_type());
        let mismatch = || CompileError::TypeMismatch(op, left_type.clone(), right_type.clone());

        let (left, right) = match (left, right) {
            (BoundExpr::Operand(left), BoundExpr::Operand(right)) => (left, right),
            _ => return Err(mismatch()),
        };

        let comparison_type =
            LogicalType::max_logical_type(&left_type, &right_type).map_err(|_| mismatch())?;
        let function = DefaultComparisonFunctions::get_comparison_function(op, &comparison_type)
            .map_err(|_| mismatch())?;
        let decide = move |ordering| function.evaluate(ordering);

        let compiled: BooleanAccessor<R> = match comparison_type {
            LogicalType::Boolean => {
                let l = left.into_boolean().ok_or_else(mismatch)?;
                let r = right.into_boolean().ok_or_else(mismatch)?;
                Arc::new(move |rec: &R| decide(Some(l(rec).cmp(&r(rec)))))
            }
            LogicalType::Integer | LogicalType::Bigint => {
                let l = left.into_integer().ok_or_else(mismatch)?;
                let r = right.into_integer().ok_or_else(mismatch)?;
                Arc::new(move |rec: &R| decide(Some(l(rec).cmp(&r(rec)))))
            }
            LogicalType::Double => {
                let l = left.into_double().ok_or_else(mismatch)?;
                let r = right.into_double().ok_or_else(mismatch)?;
                Arc::new(move |rec: &R| decide(l(rec).partial_cmp(&r(rec))))
            }
            LogicalType::Varchar => {
                let l = left.into_text().ok_or_else(mismatch)?;
                let r = right.into_text().ok_or_else(mismatch)?;
                Arc::new(move |rec: &R| decide(Some(l.get(rec).cmp(r.get(rec)))))
            }
            LogicalType::Record(_) => return Err(mismatch()),
        };

        Ok(BoundExpr::Operand(BoundOperand {
            data_type: LogicalType::Boolean,
            value: Operand::Boolean(compiled),
        }))
    }
}

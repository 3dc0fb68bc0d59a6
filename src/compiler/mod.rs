mod bind_comparison;
mod bound_expr;
mod errors;

pub use errors::*;
use log::{debug, trace};

use self::bound_expr::{BoundExpr, BoundOperand, Operand, Scope};
use crate::catalog::{FieldResolver, ResolvedField, Schema};
use crate::expression::{Expr, PropertyComparison};
use crate::predicate::Predicate;

static LOGGING_TARGET: &str = "predrs::compiler";

/// Parameter label used when a predicate is lowered from a property-path description.
pub const DEFAULT_PARAMETER: &str = "r";

/// Compile a predicate tree against the schema of its input record.
pub fn compile<R: Send + Sync + 'static>(
    tree: &Expr,
    schema: &Schema<R>,
) -> Result<Predicate<R>, CompileError> {
    PredicateCompiler::new(schema).compile(tree)
}

/// Compile a property-path comparison such as `victory > 19400000`.
pub fn compile_comparison<R: Send + Sync + 'static>(
    comparison: &PropertyComparison,
    schema: &Schema<R>,
) -> Result<Predicate<R>, CompileError> {
    let tree = comparison.to_expr(DEFAULT_PARAMETER)?;
    compile(&tree, schema)
}

/// Resolves every field access of a tree once, then emits a single closure that only performs
/// the resolved reads and the comparison.
pub struct PredicateCompiler<'a, R> {
    root: &'a dyn FieldResolver<R>,
}

impl<'a, R: 'static> PredicateCompiler<'a, R> {
    pub fn new(root: &'a dyn FieldResolver<R>) -> Self {
        Self { root }
    }

    pub fn compile(&self, tree: &Expr) -> Result<Predicate<R>, CompileError> {
        debug!(
            target: LOGGING_TARGET,
            "Compiler raw tree on {}: {}",
            self.root.type_name(),
            tree
        );

        if !matches!(tree, Expr::BinaryComparison { .. }) {
            return Err(CompileError::MalformedTree(format!(
                "predicate body must be a comparison, found {} `{}`",
                tree.kind(),
                tree
            )));
        }

        let function = match self.bind_expr(tree)? {
            BoundExpr::Operand(BoundOperand {
                value: Operand::Boolean(function),
                ..
            }) => function,
            other => {
                return Err(CompileError::MalformedTree(format!(
                    "predicate body `{}` is {}, not a boolean",
                    tree,
                    other.return_type()
                )))
            }
        };

        let parameter = tree.parameters().first().copied().unwrap_or("_").to_string();
        Ok(Predicate::new(
            function,
            format!("{} -> {}", parameter, tree),
        ))
    }

    pub(crate) fn bind_expr(&self, expr: &Expr) -> Result<BoundExpr<'a, R>, CompileError> {
        match expr {
            Expr::Parameter(_) => Ok(BoundExpr::Record(Scope::Root(self.root))),
            Expr::FieldAccess { target, field } => self.bind_field_access(target, field),
            Expr::Constant(value) => Ok(BoundExpr::Operand(BoundOperand::constant(value))),
            Expr::BinaryComparison { op, left, right } => {
                self.bind_comparison(*op, left, right)
            }
        }
    }

    /// Resolve `target.field` on the static type of `target`.
    fn bind_field_access(
        &self,
        target: &Expr,
        field: &str,
    ) -> Result<BoundExpr<'a, R>, CompileError> {
        if field.is_empty() {
            return Err(CompileError::MalformedTree(format!(
                "field access on `{}` requires a field name",
                target
            )));
        }

        let scope = match self.bind_expr(target)? {
            BoundExpr::Record(scope) => scope,
            // scalars expose no fields
            BoundExpr::Operand(operand) => {
                debug!(
                    target: LOGGING_TARGET,
                    "Compiler field {} accessed on scalar `{}` of type {}",
                    field,
                    target,
                    operand.data_type
                );
                return Err(CompileError::UnknownField(field.to_string()));
            }
        };

        let resolver = scope.resolver();
        let resolved = resolver.resolve(field);
        if let Some(resolved) = &resolved {
            trace!(
                target: LOGGING_TARGET,
                "Compiler resolved {}.{}: {}",
                resolver.type_name(),
                field,
                resolved.data_type()
            );
        }
        match resolved {
            Some(ResolvedField::Scalar { data_type, getter }) => Ok(BoundExpr::Operand(
                BoundOperand::from_getter(data_type, getter),
            )),
            Some(ResolvedField::Record(inner)) => Ok(BoundExpr::Record(Scope::Field(inner))),
            None => {
                debug!(
                    target: LOGGING_TARGET,
                    "Compiler unknown field {} on {}, available: {:?}",
                    field,
                    resolver.type_name(),
                    resolver.field_names()
                );
                Err(CompileError::UnknownField(field.to_string()))
            }
        }
    }
}

use std::sync::Arc;

use crate::catalog::{
    BooleanAccessor, DoubleAccessor, FieldResolver, Getter, IntegerAccessor, VarcharAccessor,
};
use crate::types::{LogicalType, ScalarValue};

/// A tree node after its names were resolved against a schema.
pub(crate) enum BoundExpr<'a, R> {
    /// A record valued node, only usable as the target of a field access.
    Record(Scope<'a, R>),
    Operand(BoundOperand<R>),
}

impl<R> BoundExpr<'_, R> {
    pub(crate) fn return_type(&self) -> LogicalType {
        match self {
            BoundExpr::Record(scope) => {
                LogicalType::Record(scope.resolver().type_name().to_string())
            }
            BoundExpr::Operand(operand) => operand.data_type.clone(),
        }
    }
}

pub(crate) enum Scope<'a, R> {
    /// the predicate's input record
    Root(&'a dyn FieldResolver<R>),
    /// a record reached through one or more field accesses
    Field(Arc<dyn FieldResolver<R>>),
}

impl<R> Scope<'_, R> {
    pub(crate) fn resolver(&self) -> &dyn FieldResolver<R> {
        match self {
            Scope::Root(resolver) => *resolver,
            Scope::Field(resolver) => resolver.as_ref(),
        }
    }
}

/// A scalar valued node with its value reads already resolved to accessors.
pub(crate) struct BoundOperand<R> {
    pub(crate) data_type: LogicalType,
    pub(crate) value: Operand<R>,
}

pub(crate) enum Operand<R> {
    Boolean(BooleanAccessor<R>),
    Integer(IntegerAccessor<R>),
    Double(DoubleAccessor<R>),
    Varchar(Text<R>),
}

/// String operands: constants are kept out of closures so they can be borrowed per call.
pub(crate) enum Text<R> {
    Field(VarcharAccessor<R>),
    Constant(Arc<str>),
}

impl<R> Text<R> {
    #[inline]
    pub(crate) fn get<'r>(&'r self, record: &'r R) -> &'r str {
        match self {
            Text::Field(f) => f(record),
            Text::Constant(s) => s,
        }
    }
}

impl<R: 'static> BoundOperand<R> {
    pub(crate) fn from_getter(data_type: LogicalType, getter: Getter<R>) -> Self {
        let value = match getter {
            Getter::Boolean(f) => Operand::Boolean(f),
            Getter::Integer(f) => Operand::Integer(f),
            Getter::Double(f) => Operand::Double(f),
            Getter::Varchar(f) => Operand::Varchar(Text::Field(f)),
        };
        Self { data_type, value }
    }

    pub(crate) fn constant(value: &ScalarValue) -> Self {
        let data_type = value.logical_type();
        let value = match value {
            ScalarValue::Boolean(v) => {
                let v = *v;
                Operand::Boolean(Arc::new(move |_: &R| v))
            }
            ScalarValue::Int32(v) => {
                let v = i64::from(*v);
                Operand::Integer(Arc::new(move |_: &R| v))
            }
            ScalarValue::Int64(v) => {
                let v = *v;
                Operand::Integer(Arc::new(move |_: &R| v))
            }
            ScalarValue::Float64(v) => {
                let v = v.into_inner();
                Operand::Double(Arc::new(move |_: &R| v))
            }
            ScalarValue::String(v) => Operand::Varchar(Text::Constant(Arc::from(v.as_str()))),
        };
        Self { data_type, value }
    }

    pub(crate) fn into_boolean(self) -> Option<BooleanAccessor<R>> {
        match self.value {
            Operand::Boolean(f) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn into_integer(self) -> Option<IntegerAccessor<R>> {
        match self.value {
            Operand::Integer(f) => Some(f),
            _ => None,
        }
    }

    /// Integers are widened, the only implicit cast a comparison performs.
    pub(crate) fn into_double(self) -> Option<DoubleAccessor<R>> {
        match self.value {
            Operand::Double(f) => Some(f),
            Operand::Integer(f) => Some(Arc::new(move |r: &R| f(r) as f64)),
            _ => None,
        }
    }

    pub(crate) fn into_text(self) -> Option<Text<R>> {
        match self.value {
            Operand::Varchar(text) => Some(text),
            _ => None,
        }
    }
}

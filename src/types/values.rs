use std::fmt;

use ordered_float::OrderedFloat;

use super::LogicalType;

/// Represents a dynamically typed single literal value.
/// The variant fixes the literal's [`LogicalType`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarValue {
    /// true or false value
    Boolean(bool),
    /// signed 32bit int
    Int32(i32),
    /// signed 64bit int
    Int64(i64),
    /// 64bit float
    Float64(OrderedFloat<f64>),
    /// utf-8 encoded string.
    String(String),
}

macro_rules! impl_scalar {
    ($ty:ty, $scalar:tt) => {
        impl From<$ty> for ScalarValue {
            fn from(value: $ty) -> Self {
                ScalarValue::$scalar(value.into())
            }
        }
    };
}

impl_scalar!(f64, Float64);
impl_scalar!(i32, Int32);
impl_scalar!(i64, Int64);
impl_scalar!(bool, Boolean);
impl_scalar!(String, String);
impl_scalar!(&str, String);

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Int32(_) => LogicalType::Integer,
            ScalarValue::Int64(_) => LogicalType::Bigint,
            ScalarValue::Float64(_) => LogicalType::Double,
            ScalarValue::String(_) => LogicalType::Varchar,
        }
    }

    /// Parse a numeric literal the way the source text spells it: the narrowest integer type
    /// that holds it, otherwise a double.
    pub fn parse_number(literal: &str) -> Option<ScalarValue> {
        if let Ok(int) = literal.parse::<i32>() {
            Some(int.into())
        } else if let Ok(bigint) = literal.parse::<i64>() {
            Some(bigint.into())
        } else if let Ok(float) = literal.parse::<f64>() {
            Some(float.into())
        } else {
            None
        }
    }

    /// Arithmetic negation, used for signed literals.
    pub fn negate(&self) -> Option<ScalarValue> {
        match self {
            ScalarValue::Int32(v) => v.checked_neg().map(ScalarValue::Int32),
            ScalarValue::Int64(v) => v.checked_neg().map(ScalarValue::Int64),
            ScalarValue::Float64(v) => Some(ScalarValue::Float64(-*v)),
            ScalarValue::Boolean(_) | ScalarValue::String(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Boolean(v) => write!(f, "{}", v),
            ScalarValue::Int32(v) => write!(f, "{}", v),
            ScalarValue::Int64(v) => write!(f, "{}", v),
            // keep a fraction so the literal reads back as a double
            ScalarValue::Float64(v) if v.0.fract() == 0.0 && v.0.is_finite() => {
                write!(f, "{:.1}", v.0)
            }
            ScalarValue::Float64(v) => write!(f, "{}", v.0),
            ScalarValue::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
        }
    }
}

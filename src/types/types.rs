use std::fmt;

use super::TypeError;

/// Predrs type conversion:
/// record field accessor / literal -> LogicalType -> arrow::datatypes::DataType
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalType {
    Boolean,
    /// 32bit signed integer
    Integer,
    /// 64bit signed integer
    Bigint,
    Double,
    Varchar,
    /// a nested record, identified by its schema name
    Record(String),
}

impl LogicalType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::Bigint | LogicalType::Double
        )
    }

    /// The type both operands are coerced to before they are compared.
    pub fn max_logical_type(
        left: &LogicalType,
        right: &LogicalType,
    ) -> Result<LogicalType, TypeError> {
        match (left, right) {
            // records only hold fields, they are never a comparison operand
            (LogicalType::Record(_), _) | (_, LogicalType::Record(_)) => {
                Err(TypeError::Incomparable(left.clone(), right.clone()))
            }
            _ if left == right => Ok(left.clone()),
            _ if left.is_numeric() && right.is_numeric() => {
                LogicalType::combine_numeric_types(left, right)
            }
            _ => Err(TypeError::Incomparable(left.clone(), right.clone())),
        }
    }

    fn combine_numeric_types(
        left: &LogicalType,
        right: &LogicalType,
    ) -> Result<LogicalType, TypeError> {
        if left == right {
            return Ok(left.clone());
        }
        if LogicalType::can_implicit_cast(left, right) {
            return Ok(right.clone());
        }
        if LogicalType::can_implicit_cast(right, left) {
            return Ok(left.clone());
        }
        Err(TypeError::NumericCombination(left.clone(), right.clone()))
    }

    fn can_implicit_cast(from: &LogicalType, to: &LogicalType) -> bool {
        if from == to {
            return true;
        }
        match from {
            LogicalType::Integer => matches!(to, LogicalType::Bigint | LogicalType::Double),
            LogicalType::Bigint => matches!(to, LogicalType::Double),
            LogicalType::Boolean
            | LogicalType::Double
            | LogicalType::Varchar
            | LogicalType::Record(_) => false,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Boolean => write!(f, "BOOLEAN"),
            LogicalType::Integer => write!(f, "INTEGER"),
            LogicalType::Bigint => write!(f, "BIGINT"),
            LogicalType::Double => write!(f, "DOUBLE"),
            LogicalType::Varchar => write!(f, "VARCHAR"),
            LogicalType::Record(name) => write!(f, "RECORD({})", name),
        }
    }
}

impl TryFrom<LogicalType> for arrow::datatypes::DataType {
    type Error = TypeError;

    fn try_from(value: LogicalType) -> Result<Self, Self::Error> {
        use arrow::datatypes::DataType;
        match value {
            LogicalType::Boolean => Ok(DataType::Boolean),
            LogicalType::Integer => Ok(DataType::Int32),
            LogicalType::Bigint => Ok(DataType::Int64),
            LogicalType::Double => Ok(DataType::Float64),
            LogicalType::Varchar => Ok(DataType::Utf8),
            LogicalType::Record(_) => Err(TypeError::NoColumnarType(value)),
        }
    }
}

#[cfg(test)]
mod types_test {
    use test_case::test_case;

    use super::LogicalType::{self, *};
    use super::TypeError;

    #[test_case(Integer, Integer, Integer)]
    #[test_case(Integer, Bigint, Bigint)]
    #[test_case(Bigint, Integer, Bigint)]
    #[test_case(Integer, Double, Double)]
    #[test_case(Double, Bigint, Double)]
    #[test_case(Varchar, Varchar, Varchar)]
    #[test_case(Boolean, Boolean, Boolean)]
    fn test_max_logical_type(left: LogicalType, right: LogicalType, expected: LogicalType) {
        assert_eq!(
            LogicalType::max_logical_type(&left, &right).unwrap(),
            expected
        );
    }

    #[test_case(Varchar, Double)]
    #[test_case(Boolean, Integer)]
    #[test_case(Varchar, Boolean)]
    #[test_case(Record("coach".to_string()), Record("coach".to_string()))]
    #[test_case(Record("coach".to_string()), Varchar)]
    fn test_incomparable_types(left: LogicalType, right: LogicalType) {
        assert_eq!(
            LogicalType::max_logical_type(&left, &right),
            Err(TypeError::Incomparable(left, right))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Double.to_string(), "DOUBLE");
        assert_eq!(Record("Coach".to_string()).to_string(), "RECORD(Coach)");
    }
}

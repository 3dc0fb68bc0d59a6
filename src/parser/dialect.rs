use sqlparser::dialect::Dialect;

/// Identifiers in lambda source text: letters, digits and `_`, not starting with a digit.
#[derive(Debug, Default)]
pub struct LambdaDialect {}

impl Dialect for LambdaDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }
}

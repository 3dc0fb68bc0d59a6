mod dialect;
mod errors;
mod lambda;
mod lexer;

pub use dialect::*;
pub use errors::*;
pub use lambda::*;
pub(crate) use lexer::*;

/// Default bound on parenthesis nesting inside a lambda body.
pub const DEFAULT_MAX_NESTING: usize = 64;

/// Parse the source text of a single-argument lambda such as `tp -> tp.victory > 19400000`.
pub fn parse_lambda(source: &str) -> Result<Lambda, SyntaxError> {
    LambdaParser::new(source, DEFAULT_MAX_NESTING)?.parse()
}

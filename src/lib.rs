pub mod catalog;
pub mod compiler;
pub mod executor;
pub mod expression;
pub mod function;
pub mod parser;
pub mod predicate;
pub mod source;
pub mod types;
pub mod util;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::compiler::{compile, compile_comparison, CompileError};
pub use self::executor::{filter, filter_stream};
pub use self::predicate::Predicate;
pub use self::source::{compile_from_source, compile_from_source_async, SourceCompiler, SourceError};

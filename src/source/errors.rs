use std::time::Duration;

use crate::compiler::CompileError;
use crate::parser::SyntaxError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error(transparent)]
    SyntaxError(#[from] SyntaxError),
    #[error("unauthorized reference: {0}")]
    UnauthorizedReference(String),
    #[error("compile error: {0}")]
    Compile(
        #[from]
        #[source]
        CompileError,
    ),
    #[error("record type {name} does not describe {requested}")]
    RecordTypeMismatch { name: String, requested: String },
    #[error("record type {0} is ambiguous, candidates: {1:?}")]
    AmbiguousRecordType(String, Vec<String>),
    #[error("source text is {len} bytes, the limit is {limit}")]
    SourceTooLong { len: usize, limit: usize },
    #[error("compilation timed out after {0:?}")]
    TimedOut(Duration),
    #[error("compilation was cancelled")]
    Cancelled,
}

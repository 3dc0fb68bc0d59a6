use std::time::Duration;

use derive_builder::Builder;

use crate::parser::DEFAULT_MAX_NESTING;

pub const DEFAULT_MAX_SOURCE_LEN: usize = 64 * 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resource limits applied to every source compilation.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// in bytes
    #[builder(default = "DEFAULT_MAX_SOURCE_LEN")]
    pub max_source_len: usize,
    /// parenthesis depth inside the lambda body
    #[builder(default = "DEFAULT_MAX_NESTING")]
    pub max_nesting: usize,
    /// only enforced by the async entry points
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
            max_nesting: DEFAULT_MAX_NESTING,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

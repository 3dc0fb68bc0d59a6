use std::fmt;

use derive_new::new;
use sqlparser::tokenizer::TokenizerError;

/// 1-based position in the source text.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl Location {
    pub(crate) fn start() -> Self {
        Self::new(1, 1)
    }

    /// Move past `text`.
    pub(crate) fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at {position}: {message}")]
pub struct SyntaxError {
    pub position: Location,
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: Location, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Render the error under the offending source line with a caret at the column.
    pub fn format_with_source(&self, source: &str) -> String {
        let line = source
            .lines()
            .nth(self.position.line.saturating_sub(1) as usize)
            .unwrap_or_default();
        format!(
            "{}\n{}\n{}^",
            self,
            line,
            " ".repeat(self.position.column.saturating_sub(1) as usize)
        )
    }
}

impl From<TokenizerError> for SyntaxError {
    fn from(err: TokenizerError) -> Self {
        SyntaxError::new(Location::new(err.line, err.col), err.message)
    }
}

//! Recoverable, per-line parse problems.

use std::fmt;
use thiserror::Error;

/// Quoting style of a quoted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `"..."`, with escape processing.
    Double,
    /// `'...'`, literal.
    Single,
    /// `` `...` ``, literal.
    Backtick,
}

impl Quote {
    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Quote::Double),
            '\'' => Some(Quote::Single),
            '`' => Some(Quote::Backtick),
            _ => None,
        }
    }

    pub(crate) fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
            Quote::Backtick => '`',
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quote::Double => "double",
            Quote::Single => "single",
            Quote::Backtick => "backtick",
        };
        f.write_str(name)
    }
}

/// A line that produced no entry. Never fatal to the surrounding parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("line {line}: expected a key made of [A-Za-z0-9_.-]")]
    InvalidKey { line: usize },

    #[error("line {line}: key {key} is not followed by '='")]
    MissingAssignment { line: usize, key: String },

    #[error("line {line}: unterminated {quote} quote in value of {key}")]
    UnterminatedQuote {
        line: usize,
        key: String,
        quote: Quote,
    },

    #[error("Failed to parse JSON in the environment file for key {key}: {value}")]
    InvalidJson {
        line: usize,
        key: String,
        value: String,
        message: String,
    },
}

impl ParseIssue {
    /// 1-based source line of the issue.
    pub fn line(&self) -> usize {
        match self {
            ParseIssue::InvalidKey { line }
            | ParseIssue::MissingAssignment { line, .. }
            | ParseIssue::UnterminatedQuote { line, .. }
            | ParseIssue::InvalidJson { line, .. } => *line,
        }
    }

    /// Key the issue is attached to, when one was recognised.
    pub fn key(&self) -> Option<&str> {
        match self {
            ParseIssue::InvalidKey { .. } => None,
            ParseIssue::MissingAssignment { key, .. }
            | ParseIssue::UnterminatedQuote { key, .. }
            | ParseIssue::InvalidJson { key, .. } => Some(key),
        }
    }
}

//! Env file parser.
//!
//! Responsibilities:
//! - Turn env file text into an ordered list of entries plus the lines that
//!   were skipped, and fold those entries into a `RawEnvMap`.
//! - Read files through the `Filesystem` collaborator.
//!
//! Does NOT handle:
//! - Discovery or merging across files (see `manager::discovery`).
//! - Type inference beyond list/object literals (see `value`).
//!
//! Invariants:
//! - Within one file, a later assignment to the same key wins.
//! - Malformed lines never abort the parse; they are reported as `ParseIssue`s.
//! - Failing to read a file that exists is fatal (`EnvError::Io`).

mod issue;
mod line;
pub(crate) mod literal;

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::EnvError;
use crate::fs::Filesystem;

pub use issue::{ParseIssue, Quote};
use line::{Line, tokenize};

/// Raw key/value pairs, before any schema is applied.
pub type RawEnvMap = BTreeMap<String, RawValue>;

/// Surface syntax of a raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawKind {
    /// Unquoted text, already trimmed.
    Plain,
    /// Quoted text, after escape processing for double quotes.
    Quoted(Quote),
    /// An unquoted `[...]` literal.
    List(Vec<String>),
    /// An unquoted `{...}` literal holding a JSON object.
    Object(Map<String, Value>),
}

/// A value as extracted from an env file or the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValue {
    text: String,
    kind: RawKind,
}

impl RawValue {
    pub fn new(text: impl Into<String>, kind: RawKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RawKind::Plain)
    }

    pub fn quoted(text: impl Into<String>, quote: Quote) -> Self {
        Self::new(text, RawKind::Quoted(quote))
    }

    /// The extracted text. For list and object literals this is the literal
    /// source, brackets included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &RawKind {
        &self.kind
    }

    /// True for the empty string. List and object literals always exist.
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, RawKind::Plain | RawKind::Quoted(_)) && self.text.is_empty()
    }
}

/// One `KEY=value` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: RawValue,
    /// 1-based source line.
    pub line: usize,
}

/// Result of parsing one env file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEnv {
    pub entries: Vec<Entry>,
    pub issues: Vec<ParseIssue>,
}

impl ParsedEnv {
    /// Folds entries into a map; the last assignment of a key wins.
    pub fn into_map(self) -> RawEnvMap {
        self.entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect()
    }

    /// Looks up the effective value of `key`.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }
}

/// Parses env file text.
pub fn parse_str(input: &str) -> ParsedEnv {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut parsed = ParsedEnv::default();

    for (idx, raw_line) in input.split('\n').enumerate() {
        match tokenize(raw_line, idx + 1) {
            Line::Blank | Line::Comment => {}
            Line::Assignment { key, value } => parsed.entries.push(Entry {
                key,
                value,
                line: idx + 1,
            }),
            Line::Skipped(issue) => parsed.issues.push(issue),
        }
    }

    parsed
}

/// Reads and parses the env file at `path`.
pub fn parse_file(fs: &dyn Filesystem, path: &Path) -> Result<ParsedEnv, EnvError> {
    let contents = fs.read_text(path).map_err(|source| EnvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_str(&contents);

    tracing::debug!(
        path = %path.display(),
        entries = parsed.entries.len(),
        skipped = parsed.issues.len(),
        "Parsed env file"
    );

    Ok(parsed)
}

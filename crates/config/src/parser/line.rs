//! Single-line tokenizer for the `KEY=value` grammar.
//!
//! Responsibilities:
//! - Recognise blank lines, full-line comments and assignments.
//! - Strip an optional `export ` prefix and accept `=` or `: ` separators.
//! - Extract double-quoted (escaped), single-quoted and backtick (literal)
//!   values, and unquoted values up to an unescaped `#`.
//! - Turn unquoted `[...]` and `{...}` values into lists and JSON objects.
//!
//! Does NOT handle:
//! - Merging entries across lines or files (see `parser::ParsedEnv`).
//! - Schema-driven coercion (see `schema`).
//!
//! Invariants:
//! - Unquoted values are trimmed; quoted values keep interior whitespace.
//! - A malformed line yields a `ParseIssue`, never a panic or a partial entry.

use crate::constants::{COMMENT_CHAR, EXPORT_KEYWORD};

use super::issue::{ParseIssue, Quote};
use super::literal::{bracket_body, is_brace_literal, parse_object, scan_escaped, split_list};
use super::{RawKind, RawValue};

/// What a single physical line contributed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line {
    Blank,
    Comment,
    Assignment { key: String, value: RawValue },
    Skipped(ParseIssue),
}

pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Tokenizes one line. `line_no` is 1-based and only used for diagnostics.
pub(crate) fn tokenize(line: &str, line_no: usize) -> Line {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with(COMMENT_CHAR) {
        return Line::Comment;
    }

    let rest = strip_export(trimmed);
    let key_len = rest
        .char_indices()
        .find(|&(_, c)| !is_key_char(c))
        .map_or(rest.len(), |(i, _)| i);
    if key_len == 0 {
        return Line::Skipped(ParseIssue::InvalidKey { line: line_no });
    }
    let key = &rest[..key_len];

    let Some(value_src) = strip_separator(&rest[key_len..]) else {
        return Line::Skipped(ParseIssue::MissingAssignment {
            line: line_no,
            key: key.to_string(),
        });
    };

    match read_value(key, value_src, line_no) {
        Ok(value) => Line::Assignment {
            key: key.to_string(),
            value,
        },
        Err(issue) => Line::Skipped(issue),
    }
}

fn strip_export(line: &str) -> &str {
    match line.strip_prefix(EXPORT_KEYWORD) {
        Some(rest) if rest.starts_with([' ', '\t']) => rest.trim_start(),
        _ => line,
    }
}

/// Consumes `=` (optionally surrounded by blanks) or `: `, returning what follows.
fn strip_separator(after_key: &str) -> Option<&str> {
    let rest = after_key.trim_start_matches([' ', '\t']);
    if let Some(value) = rest.strip_prefix('=') {
        return Some(value.trim_start_matches([' ', '\t']));
    }
    let value = after_key.strip_prefix(':')?;
    if value.is_empty() || value.starts_with([' ', '\t']) {
        return Some(value.trim_start_matches([' ', '\t']));
    }
    None
}

fn read_value(key: &str, src: &str, line_no: usize) -> Result<RawValue, ParseIssue> {
    let Some(quote) = src.chars().next().and_then(Quote::from_char) else {
        return read_unquoted(key, src, line_no);
    };

    let body = &src[1..];
    let scanned = match quote {
        Quote::Double => scan_escaped(body),
        Quote::Single | Quote::Backtick => body
            .find(quote.as_char())
            .map(|end| (body[..end].to_string(), &body[end + 1..])),
    };

    let Some((text, trailing)) = scanned else {
        return Err(ParseIssue::UnterminatedQuote {
            line: line_no,
            key: key.to_string(),
            quote,
        });
    };

    let trailing = trailing.trim();
    if !trailing.is_empty() && !trailing.starts_with(COMMENT_CHAR) {
        tracing::debug!(key = %key, line = line_no, "ignoring text after closing quote");
    }

    Ok(RawValue::quoted(text, quote))
}

fn read_unquoted(key: &str, src: &str, line_no: usize) -> Result<RawValue, ParseIssue> {
    let structured = src.starts_with(['[', '{']);
    let text = scan_unquoted(src, structured);
    let text = text.trim();

    if let Some(body) = bracket_body(text) {
        return Ok(RawValue::new(text, RawKind::List(split_list(body))));
    }

    if is_brace_literal(text) {
        return match parse_object(text) {
            Ok(object) => Ok(RawValue::new(text, RawKind::Object(object))),
            Err(e) => Err(ParseIssue::InvalidJson {
                line: line_no,
                key: key.to_string(),
                value: text.to_string(),
                message: e.to_string(),
            }),
        };
    }

    Ok(RawValue::plain(text))
}

/// Reads up to the first unescaped `#`. `\#` yields a literal `#`. Inside a
/// bracket or brace literal, `#` within quotes does not start a comment.
fn scan_unquoted(src: &str, structured: bool) -> String {
    let mut out = String::with_capacity(src.len());
    let mut open: Option<char> = None;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&COMMENT_CHAR) {
            out.push(COMMENT_CHAR);
            chars.next();
            continue;
        }
        match open {
            Some('"') if c == '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
                continue;
            }
            Some(q) if c == q => open = None,
            Some(_) => {}
            None if c == COMMENT_CHAR => break,
            None if structured && Quote::from_char(c).is_some() => open = Some(c),
            None => {}
        }
        out.push(c);
    }
    out
}

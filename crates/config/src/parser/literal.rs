//! Bracket and brace literals shared by the line tokenizer and the coercer.

use serde_json::{Map, Value};

use crate::constants::LIST_SEPARATOR;

use super::issue::Quote;

/// Returns the inside of `[...]` if `text` is a bracket literal.
pub(crate) fn bracket_body(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

/// Returns true if `text` looks like a `{...}` literal.
pub(crate) fn is_brace_literal(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('{') && text.ends_with('}')
}

/// Splits the body of a bracket literal into trimmed, unquoted elements.
///
/// Commas inside quoted elements do not split. An all-whitespace body is the
/// empty list.
pub(crate) fn split_list(body: &str) -> Vec<String> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut open: Option<char> = None;

    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match open {
            Some('"') if c == '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(q) if c == q => {
                open = None;
                current.push(c);
            }
            Some(_) => current.push(c),
            None if c == LIST_SEPARATOR => {
                items.push(finish_item(current.trim()));
                current.clear();
            }
            None => {
                if Quote::from_char(c).is_some() {
                    open = Some(c);
                }
                current.push(c);
            }
        }
    }
    items.push(finish_item(current.trim()));
    items
}

/// Unescapes a double-quoted element; other elements only lose their quotes.
fn finish_item(item: &str) -> String {
    if let Some(body) = item.strip_prefix('"') {
        if let Some((text, "")) = scan_escaped(body) {
            return text;
        }
    }
    strip_matching_quotes(item).to_string()
}

/// Scans a double-quoted body, returning the unescaped text and the remainder
/// after the closing quote.
pub(crate) fn scan_escaped(body: &str) -> Option<(String, &str)> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &body[i + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    None
}

/// Removes one pair of identical surrounding quote characters.
pub(crate) fn strip_matching_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && Quote::from_char(first).is_some() => {
            &text[first.len_utf8()..text.len() - last.len_utf8()]
        }
        _ => text,
    }
}

/// Parses a brace literal as a JSON object.
pub(crate) fn parse_object(text: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str(text)
}

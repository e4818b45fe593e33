//! Output formatters for CLI commands.
//!
//! Provides JSON, env-file and table renderings of loaded values.

use anyhow::Result;
use envguard_config::EnvValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Env,
    Table,
}

impl OutputFormat {
    /// Parse from string, accepting only `allowed`.
    pub fn parse(s: &str, allowed: &[OutputFormat]) -> Result<Self> {
        let format = match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "env" => Some(OutputFormat::Env),
            "table" => Some(OutputFormat::Table),
            _ => None,
        };

        match format {
            Some(format) if allowed.contains(&format) => Ok(format),
            _ => {
                let names: Vec<&str> = allowed.iter().map(|f| f.name()).collect();
                anyhow::bail!(
                    "Invalid output format: {}. Valid options: {}",
                    s,
                    names.join(", ")
                )
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Env => "env",
            OutputFormat::Table => "table",
        }
    }
}

/// Renders every value, one entry per key, in key order.
pub fn format_values(values: &BTreeMap<String, EnvValue>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(values)? + "\n"),
        OutputFormat::Env => Ok(values
            .iter()
            .map(|(key, value)| format!("{key}={}\n", env_literal(value)))
            .collect()),
        OutputFormat::Table => {
            let rows: Vec<[String; 3]> = values
                .iter()
                .map(|(key, value)| [key.clone(), value.type_name().to_string(), display(value)])
                .collect();
            Ok(render_table(["KEY", "TYPE", "VALUE"], &rows))
        }
    }
}

/// Human-readable rendering of a single value.
pub fn display(value: &EnvValue) -> String {
    match value {
        EnvValue::Array(items) => format!("[{}]", items.join(", ")),
        other => other.to_string(),
    }
}

/// Renders a value so that reading it back yields the same value.
pub fn env_literal(value: &EnvValue) -> String {
    match value {
        EnvValue::String(s) if needs_quotes(s) => quote(s),
        EnvValue::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| {
                    if needs_quotes(item) || item.contains([',', ']']) {
                        quote(item)
                    } else {
                        item.clone()
                    }
                })
                .collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || s == "true"
        || s == "false"
        || s.starts_with(['[', '{'])
        || s.contains(['#', '"', '\'', '`', '\\', '\n', '\r', '\t'])
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// One line of `check` output.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRow {
    pub key: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<EnvValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn format_check(rows: &[CheckRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        _ => {
            let rows: Vec<[String; 3]> = rows
                .iter()
                .map(|row| {
                    let detail = match (&row.value, &row.error) {
                        (_, Some(error)) => error.clone(),
                        (Some(value), None) => display(value),
                        (None, None) => "-".to_string(),
                    };
                    [row.key.clone(), row.status.to_string(), detail]
                })
                .collect();
            Ok(render_table(["KEY", "STATUS", "DETAIL"], &rows))
        }
    }
}

fn render_table(headers: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = format!(
        "{:<w0$}  {:<w1$}  {}\n",
        headers[0],
        headers[1],
        headers[2],
        w0 = widths[0],
        w1 = widths[1]
    );
    for row in rows {
        output.push_str(&format!(
            "{:<w0$}  {:<w1$}  {}\n",
            row[0],
            row[1],
            row[2].replace('\n', "\\n"),
            w0 = widths[0],
            w1 = widths[1]
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use envguard_config::parse_str;
    use envguard_config::value::coerce;

    fn values() -> BTreeMap<String, EnvValue> {
        BTreeMap::from([
            ("DEBUG".to_string(), EnvValue::Boolean(true)),
            ("HOSTS".to_string(), EnvValue::from(vec!["a", "b,c"])),
            ("NAME".to_string(), EnvValue::from("two words")),
            ("PORT".to_string(), EnvValue::Integer(8080)),
            ("QUOTED_TRUE".to_string(), EnvValue::from("true")),
        ])
    }

    #[test]
    fn test_parse_restricts_formats() {
        let allowed = [OutputFormat::Json, OutputFormat::Env];
        assert_eq!(OutputFormat::parse("JSON", &allowed).unwrap(), OutputFormat::Json);
        let err = OutputFormat::parse("table", &allowed).unwrap_err();
        assert!(err.to_string().contains("Valid options: json, env"));
    }

    #[test]
    fn test_env_format_quotes_ambiguous_strings() {
        let output = format_values(&values(), OutputFormat::Env).unwrap();
        assert_eq!(
            output,
            "DEBUG=true\nHOSTS=[a, \"b,c\"]\nNAME=two words\nPORT=8080\nQUOTED_TRUE=\"true\"\n"
        );
    }

    #[test]
    fn test_env_literal_escapes() {
        assert_eq!(env_literal(&EnvValue::from("a\"b\\c\n")), "\"a\\\"b\\\\c\\n\"");
        assert_eq!(env_literal(&EnvValue::from("")), "\"\"");
        assert_eq!(env_literal(&EnvValue::from(" padded")), "\" padded\"");
    }

    #[test]
    fn test_env_literal_reads_back_as_same_value() {
        let cases = [
            EnvValue::from(vec!["a\"b", "c\\d", "e\nf", "g#h", "i,j", "k]"]),
            EnvValue::from(vec!["plain", " padded ", ""]),
            EnvValue::from("a\"b\\c\nd"),
            EnvValue::from("true"),
        ];

        for value in cases {
            let line = format!("K={}", env_literal(&value));
            let parsed = parse_str(&line);
            assert!(parsed.issues.is_empty(), "{line}: {:?}", parsed.issues);
            let raw = parsed.get("K").unwrap();
            assert_eq!(coerce(raw), value, "{line}");
        }
    }

    #[test]
    fn test_json_format_is_typed() {
        let output = format_values(&values(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["PORT"], serde_json::json!(8080));
        assert_eq!(parsed["DEBUG"], serde_json::json!(true));
        assert_eq!(parsed["HOSTS"], serde_json::json!(["a", "b,c"]));
    }

    #[test]
    fn test_check_table_prefers_error_detail() {
        let rows = vec![
            CheckRow {
                key: "PORT".to_string(),
                status: "ok",
                value: Some(EnvValue::Integer(80)),
                error: None,
            },
            CheckRow {
                key: "EMAIL".to_string(),
                status: "invalid",
                value: None,
                error: Some("bad email".to_string()),
            },
        ];
        let output = format_check(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "KEY    STATUS   DETAIL");
        assert_eq!(lines[1], "PORT   ok       80");
        assert_eq!(lines[2], "EMAIL  invalid  bad email");
    }
}

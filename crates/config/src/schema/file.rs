//! Declarative schema files.
//!
//! A schema file is JSON or YAML with an ordered `fields` list. Each field
//! names its `key`, its `type` and the constraints for that type. `custom`
//! rules need code and cannot be expressed here.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::error::EnvError;
use crate::fs::Filesystem;

use super::{FieldRule, Schema, SchemaDefinition, StringFormat};

/// Top-level schema file document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaSpec {
    pub fields: Vec<FieldSpec>,
}

/// One field of a schema file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub kind: FieldSpecKind,
}

/// Field type and its constraints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldSpecKind {
    String {
        format: Option<String>,
        pattern: Option<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        #[serde(default)]
        positive: bool,
    },
    Boolean,
    Enum {
        values: Vec<String>,
    },
    Array,
}

impl SchemaSpec {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    /// Reads a schema file; `.yaml`/`.yml` are YAML, anything else JSON.
    pub fn load(fs: &dyn Filesystem, path: &Path) -> Result<Self, EnvError> {
        let contents = fs.read_text(path).map_err(|source| EnvError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&contents).map_err(|e| EnvError::schema_file(path, e.to_string()))
        } else {
            Self::from_json_str(&contents).map_err(|e| EnvError::schema_file(path, e.to_string()))
        }
    }

    /// Reads a schema file and builds its definition.
    pub fn load_definition(fs: &dyn Filesystem, path: &Path) -> Result<SchemaDefinition, EnvError> {
        Self::load(fs, path)?
            .to_definition()
            .map_err(|message| EnvError::schema_file(path, message))
    }

    /// Builds the rule for every field, in file order.
    pub fn to_definition(&self) -> Result<SchemaDefinition, String> {
        let mut definition = SchemaDefinition::new();
        for field in &self.fields {
            let rule = field.to_rule()?;
            definition.insert(field.key.clone(), rule);
        }
        Ok(definition)
    }
}

impl FieldSpec {
    fn to_rule(&self) -> Result<FieldRule, String> {
        let schema = Schema;
        let rule: FieldRule = match &self.kind {
            FieldSpecKind::String {
                format,
                pattern,
                min_length,
                max_length,
            } => {
                let mut rule = schema.string();
                if let Some(format) = self.string_format(format.as_deref(), pattern.as_deref())? {
                    rule = rule.format(format);
                }
                if let Some(min) = min_length {
                    rule = rule.min_length(*min);
                }
                if let Some(max) = max_length {
                    rule = rule.max_length(*max);
                }
                rule.into()
            }
            FieldSpecKind::Number { min, max, positive } => {
                let mut rule = schema.number();
                if let Some(min) = min {
                    rule = rule.min(*min);
                }
                if let Some(max) = max {
                    rule = rule.max(*max);
                }
                if *positive {
                    rule = rule.positive();
                }
                rule.into()
            }
            FieldSpecKind::Boolean => schema.boolean(),
            FieldSpecKind::Enum { values } => {
                if values.is_empty() {
                    return Err(format!("field {}: enum needs at least one value", self.key));
                }
                schema.enumeration(values.iter().cloned())
            }
            FieldSpecKind::Array => schema.array(),
        };

        Ok(if self.optional { rule.optional() } else { rule })
    }

    fn string_format(
        &self,
        format: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Option<StringFormat>, String> {
        match (format, pattern) {
            (None, None) => Ok(None),
            (Some("regex") | None, Some(pattern)) => Regex::new(pattern)
                .map(|re| Some(StringFormat::Regex(re)))
                .map_err(|e| format!("field {}: invalid pattern: {e}", self.key)),
            (Some("regex"), None) => Err(format!(
                "field {}: format regex requires a pattern",
                self.key
            )),
            (Some(name), Some(_)) => Err(format!(
                "field {}: pattern is only allowed with format regex, not {name:?}",
                self.key
            )),
            (Some(name), None) => StringFormat::from_name(name)
                .map(Some)
                .ok_or_else(|| format!("field {}: unknown format {name:?}", self.key)),
        }
    }
}

//! The environment manager.
//!
//! Responsibilities:
//! - Orchestrate discovery, parsing, merging and validation at construction.
//! - Apply the strict/lenient failure policy.
//! - Expose the resulting values through `get`, `set`, `all` and typed
//!   accessors.
//!
//! Does NOT handle:
//! - Line grammar (see `parser`) or per-field checks (see `schema`).
//!
//! Invariants:
//! - Construction either returns a fully populated manager or an error; in
//!   strict mode the first failure in schema order aborts it.
//! - Accessors never re-read files or re-validate. Only `reload()` does.
//! - Failed or absent schema fields are not stored. Keys the schema does not
//!   name are stored as their schema-less coercion.

mod discovery;
mod options;

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::EnvError;
use crate::parser::{RawEnvMap, RawValue};
use crate::schema::{FieldFailure, RuleEngine, Schema, SchemaDefinition, SchemaEngine};
use crate::value::{EnvValue, FromEnvValue, coerce};

pub use options::{EnvFile, FileResolution, ManagerOptions, ProcessEnv};

/// Loaded, validated environment values.
#[derive(Debug)]
pub struct EnvironmentManager<E: SchemaEngine = RuleEngine> {
    options: ManagerOptions,
    engine: Option<E>,
    raw: RawEnvMap,
    envs: BTreeMap<String, EnvValue>,
    failures: Vec<FieldFailure>,
    loaded_files: Vec<PathBuf>,
}

impl EnvironmentManager<RuleEngine> {
    /// Builds a manager validated against the schema returned by `builder`.
    ///
    /// # Errors
    ///
    /// In strict mode: `FileNotFound`/`NoEnvFileFound` when no env file
    /// exists, and the first `MissingRequired`/`WrongType` failure. In either
    /// mode: `Io` when an existing file cannot be read.
    pub fn create_schema<F>(builder: F, options: ManagerOptions) -> Result<Self, EnvError>
    where
        F: FnOnce(&Schema) -> SchemaDefinition,
    {
        Self::from_definition(builder(&Schema), options)
    }

    pub fn from_definition(
        definition: SchemaDefinition,
        options: ManagerOptions,
    ) -> Result<Self, EnvError> {
        Self::with_engine(RuleEngine::compile(definition), options)
    }

    /// Builds a schema-less manager. Never fails on a missing env file and
    /// never validates; every value is stored as its coercion.
    pub fn get_instance(options: ManagerOptions) -> Result<Self, EnvError> {
        Self::build(None, options)
    }
}

impl<E: SchemaEngine> EnvironmentManager<E> {
    /// Builds a manager validated by a caller-supplied engine.
    pub fn with_engine(engine: E, options: ManagerOptions) -> Result<Self, EnvError> {
        Self::build(Some(engine), options)
    }

    fn build(engine: Option<E>, mut options: ManagerOptions) -> Result<Self, EnvError> {
        options.freeze_process_env();

        let mut manager = Self {
            options,
            engine,
            raw: RawEnvMap::new(),
            envs: BTreeMap::new(),
            failures: Vec::new(),
            loaded_files: Vec::new(),
        };
        manager.populate()?;
        Ok(manager)
    }

    fn populate(&mut self) -> Result<(), EnvError> {
        let fail_when_missing = self.engine.is_some() && self.options.strict;
        let discovered = discovery::discover(&self.options, fail_when_missing)?;

        let mut envs: BTreeMap<String, EnvValue> = discovered
            .raw
            .iter()
            .map(|(key, raw)| (key.clone(), coerce(raw)))
            .collect();

        let mut failures = Vec::new();
        if let Some(engine) = &self.engine {
            let mut report = engine.validate(&discovered.raw);
            if self.options.strict {
                report = report.into_strict()?;
            }

            for (key, value) in report.values {
                match value {
                    Some(value) => {
                        envs.insert(key, value);
                    }
                    None => {
                        envs.remove(&key);
                    }
                }
            }

            if self.options.logs {
                for failure in &report.failures {
                    self.options.logger().error(&failure.to_error(), None);
                }
            }
            failures = report.failures;
        }

        tracing::debug!(
            keys = envs.len(),
            files = discovered.files.len(),
            failures = failures.len(),
            "Environment populated"
        );

        self.raw = discovered.raw;
        self.envs = envs;
        self.failures = failures;
        self.loaded_files = discovered.files;
        Ok(())
    }

    /// Re-runs discovery, parsing, merging and validation. Values written
    /// with `set` are discarded.
    pub fn reload(&mut self) -> Result<(), EnvError> {
        self.populate()
    }

    /// Returns the stored value, or `None` when absent or the empty string.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.envs.get(key).filter(|value| !value.is_empty_string())
    }

    /// Returns the stored value, or `default` when absent or the empty string.
    pub fn get_or(&self, key: &str, default: impl Into<EnvValue>) -> EnvValue {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Returns the stored value converted to `T`, or `None` when absent or
    /// of another type.
    pub fn get_typed<T: FromEnvValue>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_env_value)
    }

    pub fn get_typed_or<T: FromEnvValue>(&self, key: &str, default: T) -> T {
        self.get_typed(key).unwrap_or(default)
    }

    /// Overwrites the stored value for `key`. Not validated.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.envs.insert(key.into(), value.into());
    }

    /// Every stored key and its current value.
    pub fn all(&self) -> &BTreeMap<String, EnvValue> {
        &self.envs
    }

    /// The merged pre-validation value for `key`.
    pub fn raw(&self, key: &str) -> Option<&RawValue> {
        self.raw.get(key)
    }

    /// Deserializes every stored value into `T`.
    ///
    /// Keys map to field names, so `T` typically uses
    /// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, EnvError> {
        let value = serde_json::to_value(&self.envs)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Failures collected in lenient mode, in schema order.
    pub fn validation_failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Env files read during the last population, in merge order.
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded_files
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// The validation engine, or `None` for schema-less managers.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }
}

#[cfg(test)]
mod tests;

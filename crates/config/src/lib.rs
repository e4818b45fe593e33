//! Env file loading and schema validation.
//!
//! This crate reads `.env`-style files, merges them (optionally over a
//! snapshot of the process environment), validates the result against a
//! typed schema and exposes the values through an `EnvironmentManager`.
//!
//! ```no_run
//! use envguard_config::{ManagerOptions, SchemaDefinition, StringFormat, create_schema};
//!
//! let env = create_schema(
//!     |s| {
//!         SchemaDefinition::new()
//!             .field("PORT", s.number().min(1.0).max(65535.0))
//!             .field("ADMIN_EMAIL", s.string().format(StringFormat::Email))
//!             .field("DEBUG", s.boolean().optional())
//!     },
//!     ManagerOptions::new().with_env_file([".env", ".env.local"]),
//! )?;
//!
//! let port: i64 = env.get_typed("PORT").unwrap_or(8080);
//! # let _ = port;
//! # Ok::<(), envguard_config::EnvError>(())
//! ```

pub mod constants;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manager;
pub mod parser;
pub mod schema;
pub mod value;

pub use error::EnvError;
pub use fs::{Filesystem, MemoryFilesystem, OsFilesystem};
pub use logging::{Logger, TracingLogger};
pub use manager::{EnvFile, EnvironmentManager, FileResolution, ManagerOptions, ProcessEnv};
pub use parser::{ParseIssue, ParsedEnv, RawEnvMap, RawKind, RawValue, parse_str};
pub use schema::{
    FieldRule, RuleEngine, Schema, SchemaDefinition, SchemaEngine, SchemaSpec, StringFormat,
    ValidationIssue,
};
pub use value::{EnvValue, FromEnvValue};

/// Builds a manager validated against the schema returned by `builder`.
///
/// See [`EnvironmentManager::create_schema`].
pub fn create_schema<F>(builder: F, options: ManagerOptions) -> Result<EnvironmentManager, EnvError>
where
    F: FnOnce(&Schema) -> SchemaDefinition,
{
    EnvironmentManager::create_schema(builder, options)
}

/// Builds a schema-less manager.
///
/// See [`EnvironmentManager::get_instance`].
pub fn get_instance(options: ManagerOptions) -> Result<EnvironmentManager, EnvError> {
    EnvironmentManager::get_instance(options)
}

//! Centralized constants for the envguard workspace.
//!
//! This module contains default values shared by the library and the CLI
//! to avoid string duplication between option defaults, help text and tests.

// =============================================================================
// Discovery Defaults
// =============================================================================

/// Env file consulted when the caller does not name one.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Keyword that may prefix an assignment (`export KEY=value`).
pub const EXPORT_KEYWORD: &str = "export";

// =============================================================================
// Value Syntax
// =============================================================================

/// Separator used when splitting list values.
pub const LIST_SEPARATOR: char = ',';

/// Starts a full-line or trailing comment.
pub const COMMENT_CHAR: char = '#';

// =============================================================================
// Type Names
// =============================================================================

/// Type names reported in `wrong_type` failures.
pub mod type_names {
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const BOOLEAN: &str = "boolean";
    pub const ARRAY: &str = "array";
    pub const OBJECT: &str = "object";
}

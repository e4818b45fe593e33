//! Tests for the environment manager.
//!
//! Invariants:
//! - Tests run against `MemoryFilesystem` rooted at `/app` unless they need
//!   the real filesystem or process environment.
//! - Tests that touch the real process environment are `#[serial]`.

use crate::fs::MemoryFilesystem;
use crate::logging::recording::RecordingLogger;

use super::ManagerOptions;

pub mod discovery_tests;
pub mod validation_tests;

pub const ROOT: &str = "/app";

/// Options rooted at `/app` over `fs`, logging into `logger`.
pub fn options_for(fs: MemoryFilesystem, logger: &RecordingLogger) -> ManagerOptions {
    ManagerOptions::new()
        .with_root_path(ROOT)
        .with_filesystem(fs)
        .with_logger(logger.clone())
}

/// A filesystem holding a single `/app/.env`.
pub fn dotenv(contents: &str) -> MemoryFilesystem {
    MemoryFilesystem::new().with_file("/app/.env", contents)
}

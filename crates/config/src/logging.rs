//! Logger collaborator.
//!
//! Informational lines are gated by the caller's `logs` flag; error lines are
//! always forwarded. Neither affects control flow.

use std::error::Error;

/// Side channel for diagnostics produced while loading env files.
pub trait Logger: Send + Sync {
    /// Emits an informational line when `enabled` is true.
    fn info(&self, message: &str, enabled: bool);

    /// Emits an error line, optionally prefixed with context.
    fn error(&self, error: &dyn Error, context: Option<&str>);
}

/// Forwards everything to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str, enabled: bool) {
        if !enabled {
            return;
        }
        tracing::info!("{}", message);
    }

    fn error(&self, error: &dyn Error, context: Option<&str>) {
        match context {
            Some(context) => tracing::error!(error = %error, "{}", context),
            None => tracing::error!("{}", error),
        }
    }
}

//! Command dispatch logic.
//!
//! Routes parsed CLI arguments to the matching command handler, writing
//! results to stdout.

use anyhow::Result;
use std::io::Write;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let options = cli.manager_options();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Dump { format } => commands::dump::run(options, &format, &mut out)?,
        Commands::Get { key, default } => {
            commands::get::run(options, &key, default.as_deref(), &mut out)?
        }
        Commands::Check {
            schema,
            lenient,
            format,
        } => commands::check::run(options, &schema, lenient, &format, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

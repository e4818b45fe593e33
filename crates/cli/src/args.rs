//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate global flags into `ManagerOptions`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use envguard_config::{EnvFile, FileResolution, ManagerOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envguard")]
#[command(about = "Load, inspect and validate .env files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envguard dump\n  envguard --env-file .env --env-file .env.local dump --format env\n  envguard get DATABASE_URL --default postgres://localhost/dev\n  envguard check --schema env.schema.yaml\n  envguard --process-env check --schema env.schema.json --lenient\n"
)]
pub struct Cli {
    /// Directory env files are resolved against (defaults to the working directory)
    #[arg(long, global = true, env = "ENVGUARD_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Env file to read; repeat to merge several, later files win
    #[arg(short = 'f', long = "env-file", global = true, value_name = "FILE")]
    pub env_files: Vec<PathBuf>,

    /// Read only the first env file that exists instead of merging all
    #[arg(long, global = true)]
    pub first_found: bool,

    /// Merge the inherited process environment beneath the env files
    #[arg(long, global = true)]
    pub process_env: bool,

    /// Suppress informational and lenient-mode log lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Manager options for the global flags. `strict` is left at its default.
    pub fn manager_options(&self) -> ManagerOptions {
        let mut options = ManagerOptions::new()
            .with_logs(!self.quiet)
            .with_load_from_process_env(self.process_env);

        if let Some(root) = &self.root {
            options = options.with_root_path(root.clone());
        }
        match self.env_files.as_slice() {
            [] => {}
            [single] => options = options.with_env_file(EnvFile::Single(single.clone())),
            many => options = options.with_env_file(EnvFile::List(many.to_vec())),
        }
        if self.first_found {
            options = options.with_resolution(FileResolution::FirstFound);
        }
        options
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every loaded value without validation
    Dump {
        /// Output format (json, env, table)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Print a single value
    Get {
        /// The key to look up
        key: String,

        /// Printed when the key is absent or empty
        #[arg(short, long, value_name = "VALUE")]
        default: Option<String>,
    },

    /// Validate env files against a schema file (JSON or YAML)
    Check {
        /// Path to the schema file
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Report every failure instead of stopping at the first one
        #[arg(long)]
        lenient: bool,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

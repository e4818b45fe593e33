//! Env file discovery and merging.
//!
//! Responsibilities:
//! - Resolve the root path and the candidate env files beneath it.
//! - Apply the resolution policy (merge-all or first-found).
//! - Parse the selected files and merge them over the process snapshot.
//!
//! Does NOT handle:
//! - Validation or the strict/lenient treatment of field failures.
//!
//! Invariants:
//! - Merge order is process snapshot, then files in candidate order; later
//!   sources win.
//! - Skipped lines are reported through the logger and never abort loading.

use std::path::{Path, PathBuf};

use crate::error::EnvError;
use crate::parser::{RawEnvMap, parse_file};
use crate::value::infer;

use super::options::{EnvFile, FileResolution, ManagerOptions};

/// Merged raw values plus the files they came from.
#[derive(Debug, Default)]
pub(crate) struct Discovered {
    pub raw: RawEnvMap,
    pub files: Vec<PathBuf>,
}

/// Resolves `root` against the working directory when it is relative.
pub(crate) fn resolve_root(root: &Path) -> Result<PathBuf, EnvError> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(EnvError::WorkingDirectory)?;
    if root.as_os_str().is_empty() {
        Ok(cwd)
    } else {
        Ok(cwd.join(root))
    }
}

/// Selects the candidate files that exist, per the resolution policy.
///
/// When nothing exists and `fail_when_missing` is set, returns the
/// not-found error for the configured `EnvFile` shape.
pub(crate) fn select_files(
    options: &ManagerOptions,
    root: &Path,
    fail_when_missing: bool,
) -> Result<Vec<PathBuf>, EnvError> {
    let fs = options.filesystem();
    let logger = options.logger();
    let candidates: Vec<PathBuf> = options
        .env_file
        .paths()
        .iter()
        .map(|path| root.join(path))
        .collect();

    let mut selected = Vec::new();
    for path in &candidates {
        if fs.exists(path) {
            selected.push(path.clone());
            if options.resolution == FileResolution::FirstFound {
                break;
            }
            continue;
        }

        let message = match options.resolution {
            FileResolution::MergeAll => {
                format!("Environment file not found: {}", path.display())
            }
            FileResolution::FirstFound => format!(
                "Environment file not found: {}. Trying next environment file...",
                path.display()
            ),
        };
        logger.info(&message, options.logs);
    }

    if selected.is_empty() {
        if fail_when_missing {
            return Err(match &options.env_file {
                EnvFile::Single(_) => EnvError::FileNotFound {
                    path: candidates.into_iter().next().unwrap_or_default(),
                },
                EnvFile::List(_) => EnvError::NoEnvFileFound { candidates },
            });
        }
        logger.info("No environment file found", options.logs);
    }

    Ok(selected)
}

/// Runs discovery, parsing and merging.
pub(crate) fn discover(
    options: &ManagerOptions,
    fail_when_missing: bool,
) -> Result<Discovered, EnvError> {
    let root = resolve_root(&options.root_path)?;
    let files = select_files(options, &root, fail_when_missing)?;
    let mut raw = RawEnvMap::new();

    if options.load_from_process_env {
        if let Some(snapshot) = options.process_env() {
            raw.extend(
                snapshot
                    .iter()
                    .map(|(key, value)| (key.to_string(), infer(value))),
            );
        }
    }

    for path in &files {
        let parsed = parse_file(options.filesystem(), path)?;
        let context = format!("Skipped line in {}", path.display());
        for issue in &parsed.issues {
            options.logger().error(issue, Some(context.as_str()));
        }

        tracing::debug!(path = %path.display(), "Merging env file");
        raw.extend(parsed.into_map());
    }

    options.logger().info(
        &format!("Loaded {} environment values from {} file(s)", raw.len(), files.len()),
        options.logs,
    );

    Ok(Discovered { raw, files })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_keeps_absolute_paths() {
        assert_eq!(resolve_root(Path::new("/srv/app")).unwrap(), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_resolve_root_joins_relative_paths_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_root(Path::new("")).unwrap(), cwd);
        assert_eq!(resolve_root(Path::new("conf")).unwrap(), cwd.join("conf"));
    }
}

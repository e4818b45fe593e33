//! Manager options.
//!
//! Responsibilities:
//! - Hold every knob recognized by `create_schema` / `get_instance`.
//! - Carry the filesystem and logger collaborators and the process
//!   environment snapshot.
//!
//! Invariants:
//! - Defaults: logs on, strict on, `.env` in the working directory, merge-all
//!   resolution, process environment ignored.
//! - A `ProcessEnv` is immutable once captured; nothing writes back to the
//!   real process environment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::DEFAULT_ENV_FILE;
use crate::fs::{Filesystem, OsFilesystem};
use crate::logging::{Logger, TracingLogger};

/// Which env file(s) to read, relative to the root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    /// Exactly one file. A missing file is reported as `FileNotFound`.
    Single(PathBuf),
    /// An ordered candidate list. If none exist, `NoEnvFileFound`.
    List(Vec<PathBuf>),
}

impl EnvFile {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            EnvFile::Single(path) => std::slice::from_ref(path),
            EnvFile::List(paths) => paths,
        }
    }
}

impl Default for EnvFile {
    fn default() -> Self {
        EnvFile::List(vec![PathBuf::from(DEFAULT_ENV_FILE)])
    }
}

impl From<&str> for EnvFile {
    fn from(path: &str) -> Self {
        EnvFile::Single(PathBuf::from(path))
    }
}

impl From<String> for EnvFile {
    fn from(path: String) -> Self {
        EnvFile::Single(PathBuf::from(path))
    }
}

impl From<PathBuf> for EnvFile {
    fn from(path: PathBuf) -> Self {
        EnvFile::Single(path)
    }
}

impl From<&Path> for EnvFile {
    fn from(path: &Path) -> Self {
        EnvFile::Single(path.to_path_buf())
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for EnvFile {
    fn from(paths: Vec<P>) -> Self {
        EnvFile::List(paths.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<PathBuf>, const N: usize> From<[P; N]> for EnvFile {
    fn from(paths: [P; N]) -> Self {
        EnvFile::List(paths.into_iter().map(Into::into).collect())
    }
}

/// How a candidate list is turned into files to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileResolution {
    /// Read every existing candidate; later files win on key collision.
    #[default]
    MergeAll,
    /// Read only the first existing candidate.
    FirstFound,
}

/// Immutable snapshot of inherited environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEnv {
    vars: BTreeMap<String, String>,
}

impl ProcessEnv {
    /// Captures the current process environment. Non UTF-8 names and values
    /// are converted lossily.
    pub fn capture() -> Self {
        std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProcessEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Options for building an `EnvironmentManager`.
#[derive(Clone)]
pub struct ManagerOptions {
    /// Emit informational lines and lenient-mode failures.
    pub logs: bool,
    /// Base directory for env files; relative paths resolve against the
    /// working directory.
    pub root_path: PathBuf,
    /// Abort on the first validation failure (and on a missing env file).
    pub strict: bool,
    pub env_file: EnvFile,
    pub resolution: FileResolution,
    /// Merge a process environment snapshot beneath the file values.
    pub load_from_process_env: bool,
    process_env: Option<ProcessEnv>,
    filesystem: Arc<dyn Filesystem>,
    logger: Arc<dyn Logger>,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            logs: true,
            root_path: PathBuf::new(),
            strict: true,
            env_file: EnvFile::default(),
            resolution: FileResolution::default(),
            load_from_process_env: false,
            process_env: None,
            filesystem: Arc::new(OsFilesystem),
            logger: Arc::new(TracingLogger),
        }
    }
}

impl fmt::Debug for ManagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerOptions")
            .field("logs", &self.logs)
            .field("root_path", &self.root_path)
            .field("strict", &self.strict)
            .field("env_file", &self.env_file)
            .field("resolution", &self.resolution)
            .field("load_from_process_env", &self.load_from_process_env)
            .field("process_env_vars", &self.process_env.as_ref().map(ProcessEnv::len))
            .finish_non_exhaustive()
    }
}

impl ManagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(mut self, logs: bool) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_root_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = root.into();
        self
    }

    /// Strict mode aborts on the first failure; lenient mode logs and continues.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_env_file(mut self, env_file: impl Into<EnvFile>) -> Self {
        self.env_file = env_file.into();
        self
    }

    pub fn with_resolution(mut self, resolution: FileResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_load_from_process_env(mut self, enabled: bool) -> Self {
        self.load_from_process_env = enabled;
        self
    }

    /// Supplies the process environment snapshot instead of capturing the
    /// real one. Only consulted when `load_from_process_env` is set.
    pub fn with_process_env(mut self, snapshot: ProcessEnv) -> Self {
        self.process_env = Some(snapshot);
        self
    }

    pub fn with_filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Arc::new(filesystem);
        self
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn process_env(&self) -> Option<&ProcessEnv> {
        self.process_env.as_ref()
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Captures the real process environment if it will be needed and no
    /// snapshot was supplied. Called once per manager.
    pub(crate) fn freeze_process_env(&mut self) {
        if self.load_from_process_env && self.process_env.is_none() {
            self.process_env = Some(ProcessEnv::capture());
        }
    }
}

//! Shared test utilities for envguard integration tests.
//!
//! Invariants / Assumptions:
//! - Every command runs with `ENVGUARD_ROOT` and `RUST_LOG` cleared so host
//!   settings cannot leak in.
//! - Fixtures live in a fresh temporary directory per test.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Returns a hermetic `envguard` command rooted at `root`.
pub fn envguard_cmd(root: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envguard");
    cmd.env_remove("ENVGUARD_ROOT").env_remove("RUST_LOG");
    cmd.arg("--root").arg(root.path());
    cmd
}

/// Writes `files` into a fresh temporary directory.
pub fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write fixture");
    }
    dir
}

//! # CyberChat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `cyberchat` binary against a temporary configuration file so
//! results never depend on the user's own config.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Trigger table used by most tests: `hello` before `help`, default `D`.
pub const EXAMPLE_CONFIG: &str = r#"
[responder]
default_response = "D"

[[responder.triggers]]
keyword = "hello"
response = "A"

[[responder.triggers]]
keyword = "help"
response = "B"
"#;

/// # Get CyberChat Command (`cyberchat_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `cyberchat` binary with
/// `CYBERCHAT_CONFIG` and `RUST_LOG` cleared.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn cyberchat_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cyberchat").expect("Failed to find cyberchat binary for testing");
    cmd.env_remove("CYBERCHAT_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Writes `content` to `cyberchat.toml` inside `dir` and returns its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("cyberchat.toml");
    fs::write(&path, content).expect("Failed to write test config");
    path
}

//! # CyberChat CLI Triggers Integration Tests
//!
//! File: cli/tests/triggers.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Checks the `cyberchat triggers` listing for configured and built-in tables.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_triggers_lists_configured_table() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), EXAMPLE_CONFIG);

    cyberchat_cmd()
        .arg("--config")
        .arg(&config)
        .arg("triggers")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("first match wins")
                .and(predicate::str::is_match(r"(?s)hello.*help").unwrap())
                .and(predicate::str::contains("Default response: D")),
        );
}

#[test]
fn test_triggers_reports_unreachable_entries() {
    let dir = tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"
        [[responder.triggers]]
        keyword = "scan"
        response = "generic"

        [[responder.triggers]]
        keyword = "port scan"
        response = "specific"
        "#,
    );

    cyberchat_cmd()
        .arg("--config")
        .arg(&config)
        .arg("triggers")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "#2 'port scan' is always beaten by #1 'scan'",
        ));
}

#[test]
fn test_triggers_builtin_table() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "");

    cyberchat_cmd()
        .arg("--config")
        .arg(&config)
        .args(["triggers", "--full"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("phishing")
                .and(predicate::str::contains("firewall"))
                .and(predicate::str::contains("Unreachable").not()),
        );
}

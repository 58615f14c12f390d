//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including test
//! environment setup with temporary directories and command builder
//! helpers for common patterns.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the bookable data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created yet; bookable creates it on
    /// first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("bookable-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak state from the invoking
    /// shell are cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookable").expect("Failed to find bookable binary");
        cmd.env_remove("BOOKABLE_DATA_DIR")
            .env_remove("BOOKABLE_BUSY_TIMEOUT")
            .env_remove("BOOKABLE_DISABLE_AUTOINIT")
            .env_remove("BOOKABLE_OUTPUT_FORMAT")
            .env_remove("BOOKABLE_LOG_MODE");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Register a user and return its printed id.
    pub fn add_user(&self, name: &str) -> String {
        let output = self
            .command()
            .arg("add-user")
            .arg(name)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_trailing_id(&output)
    }

    /// Create a listing and return its printed id.
    pub fn add_listing(&self, host: &str, title: &str, moderated: bool) -> String {
        let mut cmd = self.command();
        cmd.arg("add-listing").arg("--host").arg(host).arg(title);
        if moderated {
            cmd.arg("--moderated");
        }
        let output = cmd.assert().success().get_output().stdout.clone();
        parse_trailing_id(&output)
    }

    /// Add a group slot and return its printed id.
    pub fn add_group_slot(&self, listing: &str, capacity: &str) -> String {
        let output = self
            .command()
            .arg("add-slot")
            .arg("--listing")
            .arg(listing)
            .arg("--date")
            .arg("2025-06-01")
            .arg("--start")
            .arg("10:00")
            .arg("--end")
            .arg("12:00")
            .arg("--per-guest")
            .arg("25.00")
            .arg("--capacity")
            .arg(capacity)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_trailing_id(&output)
    }

    /// Add a private slot and return its printed id.
    pub fn add_private_slot(&self, listing: &str) -> String {
        let output = self
            .command()
            .arg("add-slot")
            .arg("--listing")
            .arg(listing)
            .arg("--date")
            .arg("2025-06-01")
            .arg("--start")
            .arg("14:00")
            .arg("--end")
            .arg("16:00")
            .arg("--price")
            .arg("100.00")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_trailing_id(&output)
    }
}

/// Extract the trailing numeric id from "Created <thing> <id>" output.
pub fn parse_trailing_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    text.lines()
        .next()
        .and_then(|line| line.split_whitespace().last())
        .expect("expected an id in command output")
        .to_string()
}

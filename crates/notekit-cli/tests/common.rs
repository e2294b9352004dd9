//! Shared fixture for CLI integration tests.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".notekit");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Points the client at a port nothing listens on, so any request that
    /// slips through fails fast.
    pub fn with_unreachable_server(self) -> Self {
        fs::write(
            self.data_dir.join("config.toml"),
            "base_url = \"http://127.0.0.1:9\"\nrequest_timeout_secs = 2\n",
        )
        .expect("Failed to write config");
        self
    }

    pub fn signed_in(self) -> Self {
        fs::write(
            self.data_dir.join("session.json"),
            r#"{"token": "test-token", "userId": "u1"}"#,
        )
        .expect("Failed to write session");
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("notekit");
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .env_remove("RUST_LOG");
        cmd
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::Path;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Config for tests: JSON-file remote in the data directory, no network probe.
pub const TEST_CONFIG: &str = "\
[remote]
url = \"file:remote\"

[sync]
probe_url = \"\"
";

/// `spot` bound to `dir`, with color and remote overrides cleared.
pub fn spot(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("spot");
    cmd.env("ELECTROSPOT_DIR", dir)
        .env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env_remove("ELECTROSPOT_REMOTE_URL")
        .env_remove("ELECTROSPOT_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// A data directory with the test config.
pub fn data_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), TEST_CONFIG).unwrap();
    temp
}

/// A data directory with `user` signed in.
pub fn signed_in(user: &str) -> TempDir {
    let temp = data_dir();
    spot(temp.path()).args(["login", user]).assert().success();
    temp
}

/// Parses the JSON document stored under `key`.
pub fn stored(dir: &Path, key: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join(format!("{}.json", key))).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Parses stdout of a `--json` run.
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

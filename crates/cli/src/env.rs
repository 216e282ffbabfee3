// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

/// Returns the value of `ELECTROSPOT_DIR` if set.
pub fn data_dir() -> Option<PathBuf> {
    non_empty(vars::ELECTROSPOT_DIR).map(PathBuf::from)
}

/// Returns the value of `XDG_DATA_HOME` if set.
pub fn xdg_data_home() -> Option<PathBuf> {
    non_empty(vars::XDG_DATA_HOME).map(PathBuf::from)
}

/// Returns the value of `ELECTROSPOT_REMOTE_URL` if set.
pub fn remote_url() -> Option<String> {
    non_empty(vars::ELECTROSPOT_REMOTE_URL)
}

/// Returns the value of `ELECTROSPOT_API_KEY` if set.
pub fn api_key() -> Option<String> {
    non_empty(vars::ELECTROSPOT_API_KEY)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sign-in commands. These touch only the session document, so they work
//! while another process holds the data directory.

use std::path::Path;

use super::open_storage;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;

pub fn login(dir: &Path, user: &str) -> Result<()> {
    let session = Session::user(user)?;
    session.save(&open_storage(dir)?)?;
    println!("Signed in as {}", user);
    Ok(())
}

pub fn visitor(dir: &Path, config: &Config) -> Result<()> {
    if !config.features.visitor_mode {
        return Err(Error::Config(
            "visitor mode is disabled\n  hint: set features.visitor_mode = true in config.toml"
                .to_string(),
        ));
    }
    Session::Visitor.save(&open_storage(dir)?)?;
    println!("Visitor mode: changes stay on this device");
    Ok(())
}

pub fn logout(dir: &Path) -> Result<()> {
    Session::clear(&open_storage(dir)?)?;
    println!("Signed out");
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

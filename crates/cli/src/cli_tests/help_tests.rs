// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeSet;

use clap::CommandFactory;

use crate::help;

/// The grouped listing without escape sequences.
fn plain_commands() -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in help::commands().chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, c) => out.push(c),
        }
    }
    out
}

/// Command names in the grouped listing, in order.
fn listed() -> Vec<String> {
    plain_commands()
        .lines()
        .filter(|l| l.starts_with("  "))
        .filter_map(|l| l.split_whitespace().next())
        .filter(|name| *name != "help")
        .map(str::to_string)
        .collect()
}

#[test]
fn listing_matches_subcommands() {
    let defined: BTreeSet<String> = crate::Cli::command()
        .get_subcommands()
        .filter(|s| !s.is_hide_set())
        .map(|s| s.get_name().to_string())
        .collect();
    let listed: BTreeSet<String> = listed().into_iter().collect();

    assert_eq!(listed, defined);
}

#[test]
fn listing_is_grouped() {
    let text = plain_commands();
    let stations = text.find("Stations & Data:").unwrap_or(usize::MAX);
    let session = text.find("Session:").unwrap_or(usize::MAX);
    let sync = text.find("Sync:").unwrap_or(usize::MAX);

    assert!(stations < session && session < sync, "{}", text);
    assert_eq!(listed().first().map(String::as_str), Some("stations"));
}

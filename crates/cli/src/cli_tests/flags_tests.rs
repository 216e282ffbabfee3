// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use clap::CommandFactory;

use super::*;

/// Every `(command path, short, long)` triple in the tree, help excluded.
fn short_flags(cmd: &clap::Command, path: &str, out: &mut BTreeSet<(String, char, String)>) {
    for arg in cmd.get_arguments() {
        let (Some(short), long) = (arg.get_short(), arg.get_long()) else {
            continue;
        };
        if short == 'h' {
            continue;
        }
        out.insert((
            path.to_string(),
            short,
            long.unwrap_or("(none)").to_string(),
        ));
    }
    for sub in cmd.get_subcommands() {
        let path = if path.is_empty() {
            sub.get_name().to_string()
        } else {
            format!("{} {}", path, sub.get_name())
        };
        short_flags(sub, &path, out);
    }
}

#[test]
fn test_short_flags_are_the_known_set() {
    let mut found = BTreeSet::new();
    short_flags(&Cli::command(), "", &mut found);

    let pairs: BTreeSet<(char, String)> = found
        .iter()
        .map(|(_, short, long)| (*short, long.clone()))
        .collect();
    let expected: BTreeSet<(char, String)> = [('V', "version"), ('v', "verbose"), ('n', "limit")]
        .into_iter()
        .map(|(s, l)| (s, l.to_string()))
        .collect();
    assert_eq!(pairs, expected);

    let limit_paths: Vec<&str> = found
        .iter()
        .filter(|(_, short, _)| *short == 'n')
        .map(|(path, _, _)| path.as_str())
        .collect();
    assert_eq!(limit_paths, vec!["history list"]);
}

#[test]
fn test_short_flags_keep_one_meaning() {
    let mut found = BTreeSet::new();
    short_flags(&Cli::command(), "", &mut found);

    let mut meanings = std::collections::BTreeMap::new();
    for (path, short, long) in found {
        if let Some(previous) = meanings.insert(short, long.clone()) {
            assert_eq!(previous, long, "-{} reused by '{}'", short, path);
        }
    }
}

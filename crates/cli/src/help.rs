// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = fg(colors::codes::HEADER);
    let context = fg(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
        .error(fg(colors::codes::ERROR))
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    let rows: [(&str, &str); 12] = [
        ("stations", "List the station catalog"),
        ("favorite", "Add, remove, toggle or list favorites"),
        ("history", "Simulate and list charging sessions"),
        ("prefs", "Save preferences"),
        ("login", "Sign in as a user"),
        ("visitor", "Browse in visitor mode (nothing is synced)"),
        ("logout", "Sign out"),
        ("queue", "Inspect the sync queue"),
        ("sync", "Run, retry or watch synchronization"),
        ("status", "Show the sync status indicator"),
        ("probe", "Check actual connectivity"),
        ("help", "Print help for a command"),
    ];
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (i, (name, about)) in rows.iter().enumerate() {
        match i {
            0 => out.push_str(&colors::header("Stations & Data:")),
            4 => out.push_str(&format!("\n\n{}", colors::header("Session:"))),
            7 => out.push_str(&format!("\n\n{}", colors::header("Sync:"))),
            _ => {}
        }
        out.push_str(&format!(
            "\n  {}{}  {}",
            colors::literal(name),
            " ".repeat(width - name.len()),
            about
        ));
    }
    out
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  spot login alice           Sign in
  spot favorite add 5        Favorite a station
  spot --offline status      Show pending changes
  spot sync run              Push queued changes",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;

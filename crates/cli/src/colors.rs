// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help output and toasts.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Default values/context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Success toasts and synced state: soft green
    pub const SUCCESS: u8 = 114;
    /// Warnings and pending state: amber
    pub const WARNING: u8 = 179;
    /// Errors and offline state: soft red
    pub const ERROR: u8 = 167;
}

fn enabled_for(is_terminal: bool) -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    is_terminal
}

/// Check if colors should be enabled for stdout.
pub fn should_colorize() -> bool {
    enabled_for(std::io::stdout().is_terminal())
}

/// Check if colors should be enabled for stderr, where toasts go.
pub fn should_colorize_stderr() -> bool {
    enabled_for(std::io::stderr().is_terminal())
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    format!("{}{}{}", fg256(code), text, RESET)
}

/// Apply header color (section titles) to text.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Apply literal color (commands, options) to text.
pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

/// Apply context color (default values, hints) to text.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

pub fn success(text: &str) -> String {
    paint(codes::SUCCESS, text)
}

pub fn warning(text: &str) -> String {
    paint(codes::WARNING, text)
}

pub fn error(text: &str) -> String {
    paint(codes::ERROR, text)
}

/// Colorize an examples help block.
///
/// Lines ending with `:` are headers; in other lines the command (everything
/// before the first run of two or more spaces) is a literal and the
/// description is left plain.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{}{}", indent, header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{}{}{}",
                    indent,
                    literal(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find where the description starts (after 2+ spaces following the command).
pub fn find_description_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut run_start = None;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b' ' {
            run_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = run_start.take() {
            if start > 0 && i - start >= 2 {
                return Some(start);
            }
        }
    }

    None
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;

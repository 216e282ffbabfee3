// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::colors;
use crate::help;
use clap::{Args, Parser, Subcommand};
use spot_core::Entity;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "spot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Find EV charging stations and keep your data in sync, even offline")]
#[command(
    long_about = "Find EV charging stations and keep your data in sync, even offline.\n\n\
    Favorites, charging sessions and preferences are saved locally first and \
    queued; the queue is replayed against the remote store once the network is back."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Print version
    #[arg(short = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct GlobalArgs {
    /// Act as if the network were down: queue changes, never probe
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log sync activity to stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Stations & Data
    // ─────────────────────────────────────────────────────────────────────────
    /// List the station catalog
    #[command(after_help = colors::examples("\
Examples:
  spot stations                   All stations, favorites marked with ★
  spot stations --city Niterói    Stations in one city
  spot stations --json            Output as JSON"))]
    Stations {
        /// Only stations in this city
        #[arg(long, value_parser = non_empty_string)]
        city: Option<String>,
    },

    /// Add, remove, toggle or list favorite stations
    #[command(subcommand)]
    Favorite(FavoriteCommand),

    /// Simulate and list charging sessions
    #[command(subcommand)]
    History(HistoryCommand),

    /// Show or save preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Sign in as a user
    #[command(arg_required_else_help = true)]
    Login {
        /// User id (letters, digits, '-', '_', '.', '@')
        user: String,
    },

    /// Browse in visitor mode (nothing is synced)
    Visitor,

    /// Sign out
    Logout,

    // ─────────────────────────────────────────────────────────────────────────
    // Sync
    // ─────────────────────────────────────────────────────────────────────────
    /// Inspect the sync queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Run, retry or watch synchronization
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Show the sync status indicator
    Status,

    /// Check actual connectivity
    Probe,
}

/// Favorite station commands.
#[derive(Subcommand)]
pub enum FavoriteCommand {
    /// Favorite a station
    #[command(arg_required_else_help = true)]
    Add {
        /// Station id
        id: u32,
    },
    /// Drop a favorite
    #[command(arg_required_else_help = true)]
    Remove {
        /// Station id
        id: u32,
    },
    /// Favorite a station, or drop it if it already is one
    #[command(arg_required_else_help = true)]
    Toggle {
        /// Station id
        id: u32,
    },
    /// List favorite stations
    List,
}

/// Charging history commands.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Simulate a charging session at a station
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  spot history simulate 3     Charge at Ponto Carga Ipanema")
    )]
    Simulate {
        /// Station id
        id: u32,
    },
    /// List recent charging sessions
    List {
        /// Number of sessions to show
        #[arg(short = 'n', long, default_value_t = crate::features::DEFAULT_RECENT)]
        limit: usize,
    },
}

/// Preference commands.
#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show saved preferences
    Show,
    /// Save one or more preferences
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  spot prefs set theme=dark                  String value
  spot prefs set notifications=false         JSON literals are typed
  spot prefs set radius_km=25 city=Niterói   Several at once")
    )]
    Set {
        /// KEY=VALUE pairs
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Drop all preferences
    Reset,
}

/// Sync queue commands.
#[derive(Subcommand)]
pub enum QueueCommand {
    /// List queued operations
    #[command(after_help = colors::examples("\
Examples:
  spot queue list                       Every record
  spot queue list --pending             Only records awaiting sync
  spot queue list --entity favorites    Only one entity"))]
    List {
        /// Only pending and failed records
        #[arg(long)]
        pending: bool,

        /// Only records of this entity (favorites, chargingHistory, preferences)
        #[arg(long)]
        entity: Option<Entity>,
    },
    /// Drop one queued operation
    #[command(arg_required_else_help = true)]
    Remove {
        /// Operation id
        id: String,
    },
    /// Drop completed records
    ClearCompleted,
}

/// Synchronization commands.
#[derive(Subcommand)]
pub enum SyncCommand {
    /// Replay queued operations now
    Run,
    /// Reset operations that ran out of retries, then replay
    Retry,
    /// Sync periodically and on reconnect until interrupted
    #[command(after_help = colors::examples("\
Examples:
  spot sync watch                Use sync.interval_secs from config.toml
  spot sync watch --every 60     Sync every minute"))]
    Watch {
        /// Seconds between syncs (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        every: Option<u64>,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;

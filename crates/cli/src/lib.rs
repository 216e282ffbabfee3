// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! electrospot - EV charging station finder with an offline-first sync queue.
//!
//! This crate provides the functionality behind the `spot` CLI: favorites,
//! charging history and preferences are written locally first, queued, and
//! replayed against a remote store when the network allows.
//!
//! # Main Components
//!
//! - [`sync`] - Sync queue, processor, network monitor and status tracker
//! - [`features`] - Favorites, charging history and preferences hooks
//! - [`Config`] - Data directory configuration (`config.toml`)
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use electrospot::sync::{open_remote, HttpProbe, SyncService};
//!
//! let service = SyncService::open(settings, storage, remote, probe, notifier, true)?;
//! service.enqueue(NewOperation::favorite(Action::Create, 5, "alice")).await?;
//! let result = service.sync_now("alice").await?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
pub mod help;

pub mod config;
pub mod error;
pub mod features;
pub mod notify;
pub mod session;
pub mod sync;

pub use cli::{
    Cli, Command, FavoriteCommand, GlobalArgs, HistoryCommand, PrefsCommand, QueueCommand,
    SyncCommand,
};
pub use config::Config;
pub use error::{Error, Result};

use commands::App;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;
    rt.block_on(run_async(cli.command, cli.global))
}

async fn run_async(command: Command, global: GlobalArgs) -> Result<()> {
    match command {
        Command::Login { user } => commands::session::login(&config::data_dir()?, &user),
        Command::Visitor => {
            let dir = config::data_dir()?;
            commands::session::visitor(&dir, &commands::load_config(&dir)?)
        }
        Command::Logout => commands::session::logout(&config::data_dir()?),
        command => {
            let mut app = App::open(global)?;
            run_with_app(&mut app, command).await
        }
    }
}

async fn run_with_app(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Stations { city } => commands::stations::run(app, city.as_deref()).await,
        Command::Favorite(cmd) => match cmd {
            FavoriteCommand::Add { id } => commands::favorite::add(app, id).await,
            FavoriteCommand::Remove { id } => commands::favorite::remove(app, id).await,
            FavoriteCommand::Toggle { id } => commands::favorite::toggle(app, id).await,
            FavoriteCommand::List => commands::favorite::list(app).await,
        },
        Command::History(cmd) => match cmd {
            HistoryCommand::Simulate { id } => commands::history::simulate(app, id).await,
            HistoryCommand::List { limit } => commands::history::list(app, limit).await,
        },
        Command::Prefs(cmd) => match cmd {
            PrefsCommand::Show => commands::prefs::show(app).await,
            PrefsCommand::Set { assignments } => commands::prefs::set(app, &assignments).await,
            PrefsCommand::Reset => commands::prefs::reset(app).await,
        },
        Command::Queue(cmd) => match cmd {
            QueueCommand::List { pending, entity } => {
                commands::queue::list(app, pending, entity).await
            }
            QueueCommand::Remove { id } => commands::queue::remove(app, &id).await,
            QueueCommand::ClearCompleted => commands::queue::clear_completed(app).await,
        },
        Command::Sync(cmd) => match cmd {
            SyncCommand::Run => commands::sync::run(app).await,
            SyncCommand::Retry => commands::sync::retry(app).await,
            SyncCommand::Watch { every } => commands::sync::watch(app, every).await,
        },
        Command::Status => commands::status::run(app).await,
        Command::Probe => commands::status::probe(app).await,
        Command::Login { .. } | Command::Visitor | Command::Logout => Ok(()),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

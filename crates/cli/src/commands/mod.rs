// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod favorite;
pub mod history;
pub mod prefs;
pub mod queue;
pub mod session;
pub mod stations;
pub mod status;
pub mod sync;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use spot_core::LocalStorage;

use crate::cli::GlobalArgs;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::features::HookContext;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::session::Session;
use crate::sync::{open_remote, FixedProbe, HttpProbe, Probe, SyncService};

/// Opens the local storage in `dir`, creating the directory.
pub fn open_storage(dir: &Path) -> Result<LocalStorage> {
    Ok(LocalStorage::open(dir)?)
}

/// Loads `config.toml` from `dir` with environment overrides applied.
pub fn load_config(dir: &Path) -> Result<Config> {
    Ok(Config::load(dir)?.with_env_overrides())
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Everything a data command needs, opened once per invocation.
///
/// Holds the data directory lock for as long as it lives.
pub struct App {
    pub dir: PathBuf,
    pub config: Config,
    pub session: Option<Session>,
    pub service: SyncService,
    pub global: GlobalArgs,
}

impl App {
    /// Opens the app over the resolved data directory, printing toasts to
    /// stderr.
    pub fn open(global: GlobalArgs) -> Result<Self> {
        let dir = config::data_dir()?;
        let storage = open_storage(&dir)?;
        let config = load_config(&dir)?;
        App::open_in(&dir, storage, config, global, Arc::new(ConsoleNotifier))
    }

    pub fn open_in(
        dir: &Path,
        storage: LocalStorage,
        config: Config,
        global: GlobalArgs,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let session = Session::load(&storage)?;
        let remote = open_remote(
            &config.remote.url,
            config.remote.api_key.as_deref(),
            config.request_timeout(),
            dir,
        )?;

        let probe: Arc<dyn Probe> = if global.offline {
            Arc::new(FixedProbe::new(false))
        } else if config.sync.probe_url.is_empty() {
            Arc::new(FixedProbe::new(true))
        } else {
            Arc::new(HttpProbe::new(&config.sync.probe_url, config.probe_timeout()))
        };

        let service = SyncService::open(
            config.sync_settings(),
            storage,
            remote,
            probe,
            notifier,
            !global.offline,
        )?;
        tracing::debug!(dir = %dir.display(), remote = %config.remote.url, "app opened");

        Ok(App {
            dir: dir.to_path_buf(),
            config,
            session,
            service,
            global,
        })
    }

    /// Replaces the cached connectivity flag with the probe's answer.
    pub async fn connect(&self) -> bool {
        if self.global.offline {
            return false;
        }
        self.service.monitor().refresh().await
    }

    /// The active session. A visitor session counts as signed out when
    /// visitor mode is disabled.
    pub fn session(&self) -> Result<&Session> {
        match &self.session {
            Some(Session::Visitor) if !self.config.features.visitor_mode => Err(Error::NotSignedIn),
            Some(session) => Ok(session),
            None => Err(Error::NotSignedIn),
        }
    }

    pub fn hooks(&self) -> Result<HookContext<'_>> {
        Ok(HookContext::new(&self.service, self.session()?))
    }

    /// User id of a signed-in user; visitors cannot sync.
    pub fn user_id(&self) -> Result<&str> {
        self.session()?.user_id().ok_or(Error::VisitorMode)
    }
}

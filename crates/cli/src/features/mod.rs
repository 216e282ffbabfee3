// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Feature hooks.
//!
//! Each hook keeps a local snapshot that is updated and cached first, so the
//! change is visible immediately. For a signed-in user the change is then
//! queued and, when online, synced right away. Visitors never queue.

mod favorites;
mod history;
mod preferences;

pub use favorites::{visitor_favorites, Favorites, FAVORITES_KEY};
pub use history::{
    simulate_session, ChargingHistory, DEFAULT_RECENT, HISTORY_KEY, MAX_SESSIONS, PRICE_PER_KWH,
};
pub use preferences::{parse_assignment, Preferences, PREFERENCES_KEY};

use spot_core::NewOperation;

use crate::error::Result;
use crate::notify::Toast;
use crate::session::Session;
use crate::sync::{BatchResult, SyncService};

/// What happened to a local change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Visitor mode: kept on the device only.
    Visitor,
    /// Queued while offline.
    Queued,
    /// Queued and replayed by an immediate batch.
    Synced(BatchResult),
}

/// What a hook needs from the running app.
#[derive(Clone, Copy)]
pub struct HookContext<'a> {
    pub service: &'a SyncService,
    pub session: &'a Session,
}

impl<'a> HookContext<'a> {
    pub fn new(service: &'a SyncService, session: &'a Session) -> Self {
        HookContext { service, session }
    }

    pub fn notify(&self, toast: Toast) {
        self.service.notifier().notify(toast);
    }

    /// User id of a signed-in user; `None` for visitors.
    pub fn user_id(&self) -> Option<&'a str> {
        self.session.user_id()
    }

    pub fn is_online(&self) -> bool {
        self.service.monitor().is_online()
    }

    /// Queues the operation built by `build` for the signed-in user.
    ///
    /// Online, an immediate batch runs; its failure is logged and the
    /// operation stays queued. Offline, a "Modo Offline" toast carrying
    /// `offline_note` is shown.
    pub async fn record<F>(&self, build: F, offline_note: &str) -> Result<Recorded>
    where
        F: FnOnce(&str) -> spot_core::Result<NewOperation>,
    {
        let Some(user_id) = self.user_id() else {
            self.notify(
                Toast::info("Modo Visitante")
                    .with_description("Esta ação não será salva permanentemente."),
            );
            return Ok(Recorded::Visitor);
        };

        let op = self.service.enqueue(build(user_id)?).await?;
        tracing::debug!(id = %op.id, entity = %op.entity, action = %op.action, "queued");

        if !self.is_online() {
            self.notify(Toast::info("Modo Offline").with_description(offline_note));
            return Ok(Recorded::Queued);
        }

        match self.service.sync_now(user_id).await {
            Ok(result) => Ok(Recorded::Synced(result)),
            Err(e) => {
                tracing::warn!(error = %e, "immediate sync failed");
                Ok(Recorded::Queued)
            }
        }
    }
}


#[cfg(test)]
mod history_tests;

#[cfg(test)]
mod preferences_tests;

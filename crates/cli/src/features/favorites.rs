// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Favorite stations.

use serde_json::Value;
use spot_core::{catalog, Action, Entity, FavoritePayload, NewOperation, Station, SyncOperation};

use super::{HookContext, Recorded};
use crate::error::Result;
use crate::notify::Toast;
use crate::sync::{Filter, Table};

/// Storage key of the cached favorite stations.
pub const FAVORITES_KEY: &str = "favorites";

const VISITOR_DEMO_IDS: [u32; 2] = [1, 5];

/// Demo favorites shown in visitor mode.
pub fn visitor_favorites() -> Vec<Station> {
    catalog::stations()
        .into_iter()
        .filter(|s| VISITOR_DEMO_IDS.contains(&s.id))
        .collect()
}

/// Favorite stations of the current session.
pub struct Favorites<'a> {
    ctx: HookContext<'a>,
    items: Vec<Station>,
}

impl<'a> Favorites<'a> {
    /// Loads the favorites.
    ///
    /// Visitors get the demo set. A signed-in user online reads the remote
    /// table, with still-queued changes applied on top, and refreshes the
    /// cache; offline, or if the remote fails, the cache is used.
    pub async fn load(ctx: HookContext<'a>) -> Result<Self> {
        let Some(user_id) = ctx.user_id() else {
            return Ok(Favorites {
                ctx,
                items: visitor_favorites(),
            });
        };

        let mut favorites = Favorites {
            ctx,
            items: cached(&ctx)?,
        };
        if ctx.is_online() {
            favorites.refresh(user_id).await?;
        }
        Ok(favorites)
    }

    pub fn items(&self) -> &[Station] {
        &self.items
    }

    pub fn is_favorite(&self, station_id: u32) -> bool {
        self.items.iter().any(|s| s.id == station_id)
    }

    /// Favorites `station`. Returns `None` if it already was one.
    pub async fn add_favorite(&mut self, station: &Station) -> Result<Option<Recorded>> {
        if self.is_favorite(station.id) {
            return Ok(None);
        }
        self.items.push(station.clone());
        self.persist()?;

        let recorded = self
            .ctx
            .record(
                |user| Ok(NewOperation::favorite(Action::Create, station.id, user)),
                "Favoritado localmente. Será sincronizado quando online.",
            )
            .await?;
        self.after_record(recorded).await?;

        if recorded != Recorded::Visitor {
            self.ctx.notify(Toast::success(format!(
                "{} adicionada aos favoritos",
                station.name
            )));
        }
        Ok(Some(recorded))
    }

    /// Drops `station` from the favorites. Returns `None` if it was not one.
    pub async fn remove_favorite(&mut self, station: &Station) -> Result<Option<Recorded>> {
        if !self.is_favorite(station.id) {
            return Ok(None);
        }
        self.items.retain(|s| s.id != station.id);
        self.persist()?;

        let recorded = self
            .ctx
            .record(
                |user| Ok(NewOperation::favorite(Action::Delete, station.id, user)),
                "Removido localmente. Será sincronizado quando online.",
            )
            .await?;
        self.after_record(recorded).await?;

        if recorded != Recorded::Visitor {
            self.ctx.notify(Toast::success(format!(
                "{} removida dos favoritos",
                station.name
            )));
        }
        Ok(Some(recorded))
    }

    /// Adds or removes `station`. Returns true if it is now a favorite.
    pub async fn toggle_favorite(&mut self, station: &Station) -> Result<bool> {
        if self.is_favorite(station.id) {
            self.remove_favorite(station).await?;
            Ok(false)
        } else {
            self.add_favorite(station).await?;
            Ok(true)
        }
    }

    async fn after_record(&mut self, recorded: Recorded) -> Result<()> {
        if let (Recorded::Synced(result), Some(user_id)) = (recorded, self.ctx.user_id()) {
            if result.processed_count > 0 && result.error_count == 0 {
                self.refresh(user_id).await?;
            }
        }
        Ok(())
    }

    /// Replaces the list with the remote rows plus outstanding queued changes.
    async fn refresh(&mut self, user_id: &str) -> Result<()> {
        let rows = match self
            .ctx
            .service
            .remote()
            .select(Table::Favorites, Filter::eq("user_id", user_id))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "favorites: using cached list");
                return Ok(());
            }
        };

        let mut ids: Vec<u32> = rows.iter().filter_map(row_station_id).collect();
        let pending = self
            .ctx
            .service
            .queue()
            .lock()
            .await
            .get_pending_operations(Some(Entity::Favorites));
        for op in pending.iter().filter(|op| op.belongs_to(user_id)) {
            apply_pending(&mut ids, op);
        }

        self.items = ids
            .into_iter()
            .filter_map(|id| match catalog::find(id) {
                Ok(station) => Some(station),
                Err(_) => {
                    tracing::debug!(station_id = id, "favorites: unknown station skipped");
                    None
                }
            })
            .collect();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if self.ctx.session.is_visitor() {
            return Ok(());
        }
        Ok(self.ctx.service.storage().set(FAVORITES_KEY, &self.items)?)
    }
}

fn cached(ctx: &HookContext<'_>) -> Result<Vec<Station>> {
    Ok(ctx
        .service
        .storage()
        .get::<Vec<Station>>(FAVORITES_KEY)?
        .unwrap_or_default())
}

fn row_station_id(row: &Value) -> Option<u32> {
    row.get("station_id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
}

fn apply_pending(ids: &mut Vec<u32>, op: &SyncOperation) {
    let Ok(fav) = op.payload::<FavoritePayload>() else {
        return;
    };
    match op.action {
        Action::Create => {
            if !ids.contains(&fav.station_id) {
                ids.push(fav.station_id);
            }
        }
        Action::Delete => ids.retain(|&id| id != fav.station_id),
        Action::Update => {}
    }
}

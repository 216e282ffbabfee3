// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User preferences: a flat JSON object stored whole.

use serde_json::{Map, Value};
use spot_core::{Action, NewOperation};

use super::{HookContext, Recorded};
use crate::error::{Error, Result};
use crate::notify::Toast;

/// Storage key of the cached preferences document.
pub const PREFERENCES_KEY: &str = "preferences";

/// Parses `key=value`. The value is read as JSON when it parses
/// (`true`, `42`, `"x"`) and kept as a string otherwise.
pub fn parse_assignment(text: &str) -> Result<(String, Value)> {
    let (key, raw) = text
        .split_once('=')
        .ok_or_else(|| Error::InvalidPreference(text.to_string()))?;
    let key = key.trim();
    if key.is_empty() || key == "user_id" {
        return Err(Error::InvalidPreference(text.to_string()));
    }
    let raw = raw.trim();
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub struct Preferences<'a> {
    ctx: HookContext<'a>,
    values: Map<String, Value>,
}

impl<'a> Preferences<'a> {
    /// Loads the cached document; an absent one is empty.
    pub fn load(ctx: HookContext<'a>) -> Result<Self> {
        let values = ctx
            .service
            .storage()
            .get::<Map<String, Value>>(PREFERENCES_KEY)?
            .unwrap_or_default();
        Ok(Preferences { ctx, values })
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Merges `updates` into the document and queues the whole document.
    pub async fn set(&mut self, updates: Map<String, Value>) -> Result<Recorded> {
        self.values.extend(updates);
        self.ctx
            .service
            .storage()
            .set(PREFERENCES_KEY, &self.values)?;

        let document = Value::Object(self.values.clone());
        let recorded = self
            .ctx
            .record(
                |user| Ok(NewOperation::preferences(Action::Update, document, user)),
                "Preferências salvas localmente. Serão sincronizadas quando online.",
            )
            .await?;
        if recorded != Recorded::Visitor {
            self.ctx.notify(Toast::success("Preferências salvas"));
        }
        Ok(recorded)
    }

    /// Drops the document locally and remotely.
    pub async fn reset(&mut self) -> Result<Recorded> {
        self.values.clear();
        self.ctx.service.storage().remove(PREFERENCES_KEY)?;

        let recorded = self
            .ctx
            .record(
                |user| Ok(NewOperation::preferences(Action::Delete, Value::Null, user)),
                "Preferências removidas localmente. Serão sincronizadas quando online.",
            )
            .await?;
        if recorded != Recorded::Visitor {
            self.ctx.notify(Toast::success("Preferências restauradas"));
        }
        Ok(recorded)
    }
}

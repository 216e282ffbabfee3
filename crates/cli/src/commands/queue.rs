// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use spot_core::{Entity, SyncOperation};

use super::{print_json, App};
use crate::display::format_operation;
use crate::error::{Error, Result};

/// Lists queued operations in enqueue order.
pub async fn list(app: &App, pending: bool, entity: Option<Entity>) -> Result<()> {
    let ops: Vec<SyncOperation> = {
        let queue = app.service.queue();
        let queue = queue.lock().await;
        if pending {
            queue.get_pending_operations(entity)
        } else {
            queue
                .operations()
                .iter()
                .filter(|op| entity.is_none_or(|e| op.entity == e))
                .cloned()
                .collect()
        }
    };

    if app.global.json {
        return print_json(&ops);
    }
    if ops.is_empty() {
        println!("Queue is empty");
        return Ok(());
    }
    let max_retries = app.service.settings().max_retries;
    for op in &ops {
        println!("{}", format_operation(op, max_retries));
    }
    Ok(())
}

pub async fn remove(app: &App, id: &str) -> Result<()> {
    let removed = app.service.queue().lock().await.remove_operation(id)?;
    if !removed {
        return Err(Error::OperationNotFound(id.to_string()));
    }
    println!("Removed {}", id);
    Ok(())
}

pub async fn clear_completed(app: &App) -> Result<()> {
    let removed = app
        .service
        .queue()
        .lock()
        .await
        .clear_completed_operations()?;
    println!("Removed {} completed operation(s)", removed);
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

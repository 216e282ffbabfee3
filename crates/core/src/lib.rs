// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! spot-core: Shared data model for the ElectroSpot offline sync queue
//!
//! This crate provides the queued operation record, the station and charging
//! session types, the built-in station catalog, and the file-backed local
//! storage the queue persists into.

pub mod catalog;
pub mod error;
pub mod id;
pub mod op;
pub mod station;
pub mod storage;

pub use error::{Error, Result};
pub use op::{Action, Entity, FavoritePayload, NewOperation, SyncOperation, SyncStatus};
pub use station::{Availability, ChargingSession, ChargingStatus, Favorite, Station};
pub use storage::{LocalStorage, StorageLock};

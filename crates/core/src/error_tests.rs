// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    operation_not_found = { Error::OperationNotFound("1700000000000-ab12cd34".into()), "1700000000000-ab12cd34" },
    station_not_found = { Error::StationNotFound(42), "42" },
    invalid_entity = { Error::InvalidEntity("reservations".into()), "chargingHistory" },
    invalid_action = { Error::InvalidAction("upsert".into()), "create, update, delete" },
    invalid_status = { Error::InvalidSyncStatus("done".into()), "processing" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}

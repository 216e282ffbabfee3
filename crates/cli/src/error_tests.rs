// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    station = { spot_core::Error::StationNotFound(99), "station not found: 99" },
    operation = { spot_core::Error::OperationNotFound("1-x".into()), "operation not found: 1-x" },
    locked = { spot_core::Error::StorageLocked("/tmp/spot.lock".into()), "data directory is in use: /tmp/spot.lock" },
    corrupted = { spot_core::Error::CorruptedData("bad".into()), "corrupted data: bad" },
    passthrough = { spot_core::Error::InvalidKey("a/b".into()), "invalid storage key: 'a/b'" },
)]
fn core_errors_convert(core: spot_core::Error, prefix: &str) {
    let err: Error = core.into();
    assert!(err.to_string().starts_with(prefix), "{}", err);
}

#[test]
fn hints_are_on_their_own_line() {
    for err in [Error::NotSignedIn, Error::VisitorMode, Error::StationNotFound(1)] {
        let text = err.to_string();
        assert!(text.contains("\n  hint: "), "{}", text);
    }
}

#[test]
fn remote_errors_convert() {
    let err: Error = RemoteError::Rejected("nope".into()).into();
    assert_eq!(err.to_string(), "remote error: rejected: nope");
}

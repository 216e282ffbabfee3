// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use sha2::{Digest, Sha256};

use crate::op::NewOperation;

/// Generate an operation ID from the enqueue timestamp and the operation.
/// Format: {timestamp_ms}-{hash} where hash is first 8 hex chars of
/// SHA256(timestamp + entity + action + user + payload + salt).
pub fn generate_operation_id(timestamp_ms: i64, op: &NewOperation, salt: u64) -> String {
    let input = format!(
        "{}{}{}{}{}{}",
        timestamp_ms,
        op.entity,
        op.action,
        op.user_id.as_deref().unwrap_or(""),
        op.data,
        salt
    );
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]); // First 8 hex chars (4 bytes)
    format!("{}-{}", timestamp_ms, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_operation_id<F>(
    timestamp_ms: i64,
    op: &NewOperation,
    salt: u64,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_operation_id(timestamp_ms, op, salt);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

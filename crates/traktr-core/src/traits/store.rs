// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value persistence trait for device-local state.

use async_trait::async_trait;

use crate::error::TraktrError;

/// String-keyed store holding JSON-serialized values.
///
/// Implementations must make a completed `set` visible to every later `get`
/// on the same key, including through other handles to the same backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Reads the raw value for `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, TraktrError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), TraktrError>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), TraktrError>;
}

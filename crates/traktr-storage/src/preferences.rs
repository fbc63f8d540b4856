// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme accent preference.

use std::sync::Arc;

use tracing::warn;
use traktr_core::{KeyValueStore, TraktrError};

/// Reads and writes the accent colour (`#RRGGBB`).
///
/// The value is stored as a JSON string, like every other record.
#[derive(Clone)]
pub struct AccentStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl AccentStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The saved accent, or `None` when unset or invalid.
    pub async fn get(&self) -> Option<String> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "accent preference unreadable");
                return None;
            }
        };

        match serde_json::from_str::<String>(&raw) {
            Ok(color) if is_hex_color(&color) => Some(color.to_ascii_uppercase()),
            _ => {
                warn!(key = %self.key, "ignoring malformed accent preference");
                None
            }
        }
    }

    /// Saves `color`, which must look like `#1A2B3C`.
    pub async fn set(&self, color: &str) -> Result<(), TraktrError> {
        let color = color.trim();
        if !is_hex_color(color) {
            return Err(TraktrError::Validation(format!(
                "accent `{color}` is not a #RRGGBB colour"
            )));
        }
        let raw = serde_json::to_string(&color.to_ascii_uppercase())?;
        self.store.set(&self.key, &raw).await
    }

    /// Forgets the saved accent.
    pub async fn reset(&self) -> Result<(), TraktrError> {
        self.store.remove(&self.key).await
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

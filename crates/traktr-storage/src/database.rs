// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite connection management: PRAGMA setup, migrations and the
//! [`KeyValueStore`] implementation on top of the `kv_store` table.
//!
//! All statements run on tokio-rusqlite's single background thread, so one
//! `Database` handle is the only writer for its file.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;
use tracing::debug;
use traktr_core::{KeyValueStore, TraktrError};

use crate::migrations;

/// Converts tokio-rusqlite errors into [`TraktrError::Storage`].
pub(crate) fn storage_err(e: tokio_rusqlite::Error) -> TraktrError {
    TraktrError::storage(e)
}

/// A migrated SQLite database used as a key-value store.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TraktrError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(TraktrError::storage)?;
        }

        let conn = Connection::open(path).await.map_err(TraktrError::storage)?;
        conn.call(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

        let db = Self { conn };
        db.migrate().await?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database (tests and dry runs).
    pub async fn open_in_memory() -> Result<Self, TraktrError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(TraktrError::storage)?;
        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), TraktrError> {
        self.conn
            .call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e: tokio_rusqlite::Error<refinery::Error>| TraktrError::storage(e))
    }
}

#[async_trait]
impl KeyValueStore for Database {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, TraktrError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .await
            .map_err(storage_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TraktrError> {
        let key = key.to_string();
        let value = value.to_string();
        let now = traktr_core::types::now_millis();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                    updated_at = excluded.updated_at",
                    params![key, value, now],
                )?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    async fn remove(&self, key: &str) -> Result<(), TraktrError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }
}

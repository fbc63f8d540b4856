// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of config, storage and services shared by every command.

use std::sync::Arc;

use tracing::debug;
use traktr_ai_gate::PreviewService;
use traktr_config::TraktrConfig;
use traktr_core::{KeyValueStore, TraktrError};
use traktr_router::{IntentClassifier, SessionGate};
use traktr_storage::{AccentStore, ChatLog, Database, SessionStore};

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: TraktrConfig,
    pub sessions: SessionStore,
    pub accent: AccentStore,
    store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    /// Opens the SQLite store named in `config.storage.database_path`.
    pub async fn open(config: TraktrConfig) -> Result<Self, TraktrError> {
        let db = Database::open(&config.storage.database_path).await?;
        debug!(path = %config.storage.database_path, "local store ready");
        Ok(Self::with_store(config, Arc::new(db)))
    }

    /// Builds the context over an existing store.
    pub fn with_store(config: TraktrConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let sessions = SessionStore::new(store.clone(), config.storage.session_key.clone());
        let accent = AccentStore::new(store.clone(), config.storage.accent_key.clone());
        Self {
            config,
            sessions,
            accent,
            store,
        }
    }

    /// An unloaded chat log for `job_id`.
    pub fn chat_log(&self, job_id: Option<&str>) -> ChatLog {
        ChatLog::open(self.store.clone(), &self.config.storage, job_id)
    }

    pub fn gate(&self) -> SessionGate {
        SessionGate::new(self.config.gate.clone(), self.sessions.clone())
    }

    pub fn classifier(&self) -> IntentClassifier {
        IntentClassifier::new(&self.config.classifier)
    }

    pub fn preview_service(&self) -> Result<PreviewService, TraktrError> {
        PreviewService::new(&self.config.ai_gate, self.classifier())
    }
}

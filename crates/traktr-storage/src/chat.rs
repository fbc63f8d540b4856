// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-job chat log persisted to the local key-value store.
//!
//! The log is append-only and ordered by insertion. Once loaded, every
//! append rewrites the whole list under the job's key. Conversations are
//! small, so there is no pagination and no incremental write.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use traktr_config::model::StorageConfig;
use traktr_core::{ChatMessage, ChatRole, Intent, KeyValueStore};

/// Storage key for a job's chat log: `{prefix}_{job_id}`, or `fallback` when
/// no usable job id is given.
pub fn chat_key(prefix: &str, fallback: &str, job_id: Option<&str>) -> String {
    match job_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => format!("{prefix}_{id}"),
        None => fallback.to_string(),
    }
}

/// The two example messages a new conversation starts with.
pub fn example_seed(now_ms: i64) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: "seed-boss".to_string(),
            author_label: "Boss".to_string(),
            role: ChatRole::Boss,
            text: "Morning crew. Post progress, problems and material needs here.".to_string(),
            created_at: now_ms - 60_000,
            intent: Some(Intent::Other),
            image_uri: None,
        },
        ChatMessage {
            id: "seed-employee".to_string(),
            author_label: "Employee".to_string(),
            role: ChatRole::Employee,
            text: "On site, starting rough-in on the kitchen circuits.".to_string(),
            created_at: now_ms,
            intent: Some(Intent::Progress),
            image_uri: None,
        },
    ]
}

/// One job's ordered, append-only message log.
pub struct ChatLog {
    store: Arc<dyn KeyValueStore>,
    key: String,
    messages: Vec<ChatMessage>,
    loaded: bool,
}

impl ChatLog {
    /// Opens the log for `job_id` using the key layout from `config`.
    /// Nothing is read until [`load`](Self::load).
    pub fn open(store: Arc<dyn KeyValueStore>, config: &StorageConfig, job_id: Option<&str>) -> Self {
        let key = chat_key(&config.chat_key_prefix, &config.chat_fallback_key, job_id);
        Self::with_key(store, key)
    }

    /// Opens the log stored under an explicit key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            messages: Vec::new(),
            loaded: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages tagged with `intent`, in log order.
    pub fn filter_by_intent(&self, intent: Intent) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(move |m| m.intent == Some(intent))
    }

    /// Loads the persisted log, or `seed` when nothing usable is stored.
    ///
    /// Runs once per log; later calls return immediately.
    pub async fn load(&mut self, seed: Vec<ChatMessage>) {
        self.load_cancellable(seed, &CancellationToken::new()).await;
    }

    /// Like [`load`](Self::load), but commits nothing if `cancel` fires
    /// before the read completes (the screen went away).
    ///
    /// Returns true when the log is loaded afterwards.
    pub async fn load_cancellable(
        &mut self,
        seed: Vec<ChatMessage>,
        cancel: &CancellationToken,
    ) -> bool {
        if self.loaded {
            return true;
        }

        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(key = %self.key, "chat load cancelled");
                return false;
            }
            read = self.store.get(&self.key) => read,
        };
        if cancel.is_cancelled() {
            debug!(key = %self.key, "chat load cancelled after read");
            return false;
        }

        let (messages, seeded) = match read {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ChatMessage>>(&raw) {
                Ok(messages) => (messages, false),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "corrupt chat log, starting from seed");
                    (seed, true)
                }
            },
            Ok(None) => (seed, true),
            Err(e) => {
                warn!(key = %self.key, error = %e, "chat log unreadable, starting from seed");
                (seed, true)
            }
        };

        if !self.messages.is_empty() {
            debug!(
                key = %self.key,
                dropped = self.messages.len(),
                "discarding messages appended before load"
            );
        }
        self.messages = messages;
        self.loaded = true;
        debug!(key = %self.key, count = self.messages.len(), seeded, "chat log loaded");

        if seeded {
            self.persist().await;
        }
        true
    }

    /// Appends `message` and, once loaded, rewrites the stored log.
    pub async fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.loaded {
            self.persist().await;
        } else {
            debug!(key = %self.key, "append before load kept in memory only");
        }
    }

    async fn persist(&self) {
        let raw = match serde_json::to_string(&self.messages) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to serialize chat log");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &raw).await {
            warn!(key = %self.key, error = %e, "failed to persist chat log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use traktr_core::TraktrError;

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }
        async fn get(&self, _key: &str) -> Result<Option<String>, TraktrError> {
            Err(TraktrError::storage(std::io::Error::other("disk gone")))
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), TraktrError> {
            Err(TraktrError::storage(std::io::Error::other("disk gone")))
        }
        async fn remove(&self, _key: &str) -> Result<(), TraktrError> {
            Ok(())
        }
    }

    fn msg(text: &str) -> ChatMessage {
        ChatMessage::compose("You", ChatRole::You, text, None)
    }

    #[test]
    fn key_layout() {
        assert_eq!(chat_key("job_chat", "job_chat_general", Some("j42")), "job_chat_j42");
        assert_eq!(chat_key("job_chat", "job_chat_general", None), "job_chat_general");
        assert_eq!(chat_key("job_chat", "job_chat_general", Some("  ")), "job_chat_general");
        assert_eq!(chat_key("job_chat", "job_chat_general", Some("")), "job_chat_general");
    }

    #[test]
    fn non_blank_ids_are_used_verbatim() {
        let padded = chat_key("job_chat", "job_chat_general", Some(" j1"));
        assert_eq!(padded, "job_chat_ j1");
        assert_ne!(padded, chat_key("job_chat", "job_chat_general", Some("j1")));
    }

    #[test]
    fn open_uses_config_layout() {
        let config = StorageConfig::default();
        let log = ChatLog::open(Arc::new(MemoryStore::new()), &config, Some("j1"));
        assert_eq!(log.key(), "job_chat_j1");
        assert!(!log.is_loaded());
    }

    #[tokio::test]
    async fn empty_store_loads_seed_and_persists_it() {
        let backend = MemoryStore::new();
        let mut log = ChatLog::with_key(Arc::new(backend.clone()), "job_chat_1");
        log.load(example_seed(1_000_000)).await;

        assert!(log.is_loaded());
        assert_eq!(log.len(), 2);
        assert!(backend.get("job_chat_1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn appends_reload_in_order() {
        let backend = MemoryStore::new();
        let mut log = ChatLog::with_key(Arc::new(backend.clone()), "job_chat_1");
        log.load(Vec::new()).await;

        let sent: Vec<ChatMessage> = (0..5).map(|i| msg(&format!("update {i}"))).collect();
        for m in &sent {
            log.append(m.clone()).await;
        }

        let mut reopened = ChatLog::with_key(Arc::new(backend), "job_chat_1");
        reopened.load(example_seed(0)).await;
        assert_eq!(reopened.messages(), sent.as_slice());
    }

    #[tokio::test]
    async fn load_runs_once() {
        let backend = MemoryStore::new();
        let mut log = ChatLog::with_key(Arc::new(backend.clone()), "k");
        log.load(Vec::new()).await;
        log.append(msg("first")).await;

        // A second load must not reset the log to the new seed.
        log.load(example_seed(0)).await;
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].text, "first");
    }

    #[tokio::test]
    async fn append_before_load_is_not_persisted() {
        let backend = MemoryStore::new();
        backend
            .set("k", &serde_json::to_string(&vec![msg("stored")]).unwrap())
            .await
            .unwrap();

        let mut log = ChatLog::with_key(Arc::new(backend.clone()), "k");
        log.append(msg("early")).await;
        assert_eq!(log.len(), 1);

        log.load(Vec::new()).await;
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].text, "stored");
    }

    #[tokio::test]
    async fn corrupt_blob_falls_back_to_seed() {
        let backend = MemoryStore::new();
        backend.set("k", "[{\"id\":").await.unwrap();

        let mut log = ChatLog::with_key(Arc::new(backend), "k");
        log.load(example_seed(5_000)).await;
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].id, "seed-boss");
    }

    #[tokio::test]
    async fn storage_failures_are_swallowed() {
        let mut log = ChatLog::with_key(Arc::new(BrokenStore), "k");
        log.load(example_seed(0)).await;
        assert!(log.is_loaded());
        assert_eq!(log.len(), 2);

        log.append(msg("still works")).await;
        assert_eq!(log.len(), 3);
    }

    #[tokio::test]
    async fn cancelled_load_commits_nothing() {
        let backend = MemoryStore::new();
        let mut log = ChatLog::with_key(Arc::new(backend.clone()), "k");

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(!log.load_cancellable(example_seed(0), &cancel).await);
        assert!(!log.is_loaded());
        assert!(log.is_empty());
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn filter_by_intent_keeps_order() {
        let mut log = ChatLog::with_key(Arc::new(MemoryStore::new()), "k");
        log.load(Vec::new()).await;
        for (text, intent) in [
            ("wire", Intent::Materials),
            ("done", Intent::Progress),
            ("conduit", Intent::Materials),
        ] {
            log.append(ChatMessage::compose("You", ChatRole::You, text, Some(intent)))
                .await;
        }

        let texts: Vec<&str> = log
            .filter_by_intent(Intent::Materials)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["wire", "conduit"]);
    }
}

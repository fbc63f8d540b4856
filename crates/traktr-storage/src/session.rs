// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The cached session record and its single owner.
//!
//! [`SessionStore`] is the only code path that reads or writes the session
//! key. Screens and the gate receive a handle instead of reading storage
//! directly.

use std::sync::Arc;

use tracing::{debug, info, warn};
use traktr_core::{KeyValueStore, Role, Session, TraktrError};

/// Load/save/update access to the locally cached [`Session`].
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    /// Creates a store reading and writing `key` in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key of the session record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the session, reporting storage and parse failures.
    pub async fn try_load(&self) -> Result<Option<Session>, TraktrError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    /// Reads the session; a missing, unreadable or corrupt record is `None`.
    pub async fn load(&self) -> Option<Session> {
        match self.try_load().await {
            Ok(session) => session,
            Err(e) => {
                warn!(key = %self.key, error = %e, "cached session unreadable, treating as signed out");
                None
            }
        }
    }

    /// Replaces the cached session (login, signup, profile save).
    pub async fn save(&self, session: &Session) -> Result<(), TraktrError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(&self.key, &raw).await?;
        debug!(uid = %session.uid, role = %session.role, "session saved");
        Ok(())
    }

    /// Applies `change` to the cached session and writes it back.
    ///
    /// Returns the updated session, or `None` when nobody is signed in.
    pub async fn update<F>(&self, change: F) -> Result<Option<Session>, TraktrError>
    where
        F: FnOnce(&mut Session) + Send,
    {
        let Some(mut session) = self.try_load().await? else {
            return Ok(None);
        };
        change(&mut session);
        self.save(&session).await?;
        Ok(Some(session))
    }

    /// Records that the signed-in employee joined `company_id`.
    pub async fn join_company(&self, company_id: &str) -> Result<Session, TraktrError> {
        let company_id = company_id.trim();
        if company_id.is_empty() {
            return Err(TraktrError::Validation("company id must not be empty".into()));
        }

        let mut session = self
            .try_load()
            .await?
            .ok_or_else(|| TraktrError::InvalidState("no signed-in session to update".into()))?;
        if session.role != Role::Employee {
            return Err(TraktrError::InvalidState(format!(
                "only employees join a company by code (role is {})",
                session.role
            )));
        }

        session.company_id = Some(company_id.to_string());
        self.save(&session).await?;
        info!(uid = %session.uid, company = company_id, "employee joined company");
        Ok(session)
    }

    /// Removes the cached session (logout).
    pub async fn clear(&self) -> Result<(), TraktrError> {
        self.store.remove(&self.key).await?;
        debug!(key = %self.key, "session cleared");
        Ok(())
    }
}

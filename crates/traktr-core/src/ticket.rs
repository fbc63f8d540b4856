// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work tickets: immutable records of work performed on a job.
//!
//! A ticket is final from the moment it is submitted. The only transition is
//! the owner's review, which flips `is_reviewed` from false to true once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TraktrError;
use crate::types::{Role, Session};

/// Fields an employee fills in before submitting a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub job_id: String,
    pub job_title: String,
    pub job_address: String,
    pub work_performed: String,
    pub labor_hours: f64,
    pub materials_used: String,
}

/// A submitted work ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTicket {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub job_address: String,
    pub work_performed: String,
    pub labor_hours: f64,
    pub materials_used: String,
    pub created_by_uid: String,
    pub created_by_name: String,
    pub created_by_email: String,
    pub created_by_role: Role,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// `YYYY-MM-DD` (UTC) of `created_at`.
    pub day_key: String,
    pub is_final: bool,
    pub is_reviewed: bool,
    #[serde(default)]
    pub reviewed_at: Option<i64>,
    #[serde(default)]
    pub reviewed_by_uid: Option<String>,
}

impl WorkTicket {
    /// Submits a draft on behalf of `author`.
    pub fn submit(
        draft: TicketDraft,
        author: &Session,
        created_at: i64,
    ) -> Result<Self, TraktrError> {
        if draft.job_id.trim().is_empty() {
            return Err(TraktrError::Validation("ticket needs a job id".into()));
        }
        if draft.work_performed.trim().is_empty() {
            return Err(TraktrError::Validation(
                "describe the work performed before submitting".into(),
            ));
        }
        if !draft.labor_hours.is_finite() || draft.labor_hours < 0.0 {
            return Err(TraktrError::Validation(format!(
                "labor hours must be a non-negative number, got {}",
                draft.labor_hours
            )));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: draft.job_id,
            job_title: draft.job_title,
            job_address: draft.job_address,
            work_performed: draft.work_performed,
            labor_hours: draft.labor_hours,
            materials_used: draft.materials_used,
            created_by_uid: author.uid.clone(),
            created_by_name: author.name.clone(),
            created_by_email: author.email.clone(),
            created_by_role: author.role,
            created_at,
            day_key: day_key(created_at),
            is_final: true,
            is_reviewed: false,
            reviewed_at: None,
            reviewed_by_uid: None,
        })
    }

    /// Marks the ticket reviewed. Only owners may review, and only once.
    pub fn review(&mut self, reviewer: &Session, at: i64) -> Result<(), TraktrError> {
        if reviewer.role != Role::Owner {
            return Err(TraktrError::PermissionDenied(format!(
                "only company owners can review tickets (role is {})",
                reviewer.role
            )));
        }
        if self.is_reviewed {
            return Err(TraktrError::InvalidState(format!(
                "ticket {} was already reviewed",
                self.id
            )));
        }

        self.is_reviewed = true;
        self.reviewed_at = Some(at);
        self.reviewed_by_uid = Some(reviewer.uid.clone());
        debug!(ticket = %self.id, reviewer = %reviewer.uid, "ticket reviewed");
        Ok(())
    }
}

/// Calendar day (UTC) of an epoch-millisecond timestamp.
pub fn day_key(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared by the gate, the chat log and the preview flow.
//!
//! All persisted documents use camelCase JSON field names so that records
//! written by the mobile client and by these crates are interchangeable.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of the signed-in identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Runs a company, issues join codes, reviews tickets.
    Owner,
    /// Works for a company; must join one before using the app.
    Employee,
    /// Works alone, no company membership required.
    Independent,
}

/// Locally cached record describing the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub profile_complete: bool,
    /// Older client builds wrote `photoURL`; both spellings are read.
    #[serde(default, alias = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Session {
    /// Creates a fresh session as written on login/signup.
    pub fn new(uid: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            name: String::new(),
            role,
            company_id: None,
            profile_complete: false,
            photo_url: None,
        }
    }

    /// Returns the company id, treating a blank string as absent.
    pub fn company(&self) -> Option<&str> {
        self.company_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// An employee without a company must finish the join flow first.
    pub fn must_join_company(&self) -> bool {
        self.role == Role::Employee && self.company().is_none()
    }
}

/// Author role of a chat message, relative to the viewer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    You,
    Boss,
    Employee,
}

/// Coarse category assigned to a chat message for filtering and display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    Progress,
    Issue,
    Materials,
    Other,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 4] = [
        Intent::Progress,
        Intent::Issue,
        Intent::Materials,
        Intent::Other,
    ];
}

/// A single message in a job's chat log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub author_label: String,
    pub role: ChatRole,
    pub text: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl ChatMessage {
    /// Builds a new message with a fresh id, stamped with the current time.
    pub fn compose(
        author_label: impl Into<String>,
        role: ChatRole,
        text: impl Into<String>,
        intent: Option<Intent>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author_label: author_label.into(),
            role,
            text: text.into(),
            created_at: now_millis(),
            intent,
            image_uri: None,
        }
    }

    /// Attaches an image reference.
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_reads_legacy_photo_key() {
        let json = r#"{
            "uid": "u1",
            "email": "sam@example.com",
            "name": "Sam",
            "role": "employee",
            "companyId": null,
            "profileComplete": true,
            "photoURL": "https://cdn.example.com/sam.jpg"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(
            session.photo_url.as_deref(),
            Some("https://cdn.example.com/sam.jpg")
        );

        let written = serde_json::to_string(&session).unwrap();
        assert!(written.contains("\"photoUrl\""));
        assert!(!written.contains("photoURL"));
    }

    #[test]
    fn session_tolerates_missing_optional_fields() {
        let json = r#"{"uid":"u2","email":"a@b.c","role":"owner"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.role, Role::Owner);
        assert!(session.company_id.is_none());
        assert!(!session.profile_complete);
    }

    #[test]
    fn must_join_only_for_employee_without_company() {
        let mut session = Session::new("u1", "e@x.io", Role::Employee);
        assert!(session.must_join_company());

        session.company_id = Some("   ".into());
        assert!(session.must_join_company(), "blank company id counts as absent");

        session.company_id = Some("acme".into());
        assert!(!session.must_join_company());

        let owner = Session::new("u2", "o@x.io", Role::Owner);
        assert!(!owner.must_join_company());
        let solo = Session::new("u3", "i@x.io", Role::Independent);
        assert!(!solo.must_join_company());
    }

    #[test]
    fn chat_message_wire_format() {
        let msg = ChatMessage {
            id: "m1".into(),
            author_label: "Boss".into(),
            role: ChatRole::Boss,
            text: "Order more conduit".into(),
            created_at: 1_700_000_000_000,
            intent: Some(Intent::Materials),
            image_uri: None,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["authorLabel"], "Boss");
        assert_eq!(value["role"], "boss");
        assert_eq!(value["createdAt"], 1_700_000_000_000i64);
        assert_eq!(value["intent"], "materials");
        assert!(value.get("imageUri").is_none());
    }

    #[test]
    fn null_intent_deserializes_to_none() {
        let json = r#"{"id":"m","authorLabel":"You","role":"you","text":"hi","createdAt":1,"intent":null}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert!(msg.intent.is_none());
    }

    #[test]
    fn compose_assigns_unique_ids() {
        let a = ChatMessage::compose("You", ChatRole::You, "one", None);
        let b = ChatMessage::compose("You", ChatRole::You, "two", None);
        assert_ne!(a.id, b.id);
        assert!(a.created_at > 0);
    }

    #[test]
    fn intent_parses_from_lowercase() {
        use std::str::FromStr;
        for intent in Intent::ALL {
            assert_eq!(Intent::from_str(&intent.to_string()).unwrap(), intent);
        }
        assert_eq!(Role::from_str("independent").unwrap(), Role::Independent);
    }
}

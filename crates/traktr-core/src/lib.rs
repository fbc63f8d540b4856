// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Traktr client.
//!
//! This crate provides the domain types (sessions, chat messages, work
//! tickets), the shared error type and the traits through which the other
//! crates reach device-local storage and navigation.

pub mod error;
pub mod ticket;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TraktrError;
pub use ticket::{TicketDraft, WorkTicket};
pub use traits::{KeyValueStore, Navigator};
pub use types::{ChatMessage, ChatRole, Intent, Role, Session};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traktr_error_variants_render() {
        let cases = [
            TraktrError::Config("bad".into()).to_string(),
            TraktrError::storage(std::io::Error::other("disk")).to_string(),
            TraktrError::Network {
                message: "refused".into(),
                source: None,
            }
            .to_string(),
            TraktrError::PermissionDenied("nope".into()).to_string(),
            TraktrError::InvalidState("twice".into()).to_string(),
            TraktrError::Validation("empty".into()).to_string(),
        ];
        assert!(cases[0].starts_with("configuration error"));
        assert!(cases[1].contains("disk"));
        assert!(cases[2].starts_with("network error"));
        assert!(cases[3].starts_with("permission denied"));
    }

    #[test]
    fn serde_json_errors_convert() {
        let err: TraktrError = serde_json::from_str::<Session>("{").unwrap_err().into();
        assert!(matches!(err, TraktrError::Serialization(_)));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn traits_are_object_safe() {
        fn _assert_store(_: &dyn KeyValueStore) {}
        fn _assert_navigator(_: &dyn Navigator) {}
    }
}

// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device-local persistence for the Traktr client.
//!
//! Everything is stored as JSON text under string keys in a
//! [`KeyValueStore`](traktr_core::KeyValueStore). The SQLite-backed
//! [`Database`] is the on-disk store; [`MemoryStore`] serves tests and
//! dry runs. Typed access lives in [`SessionStore`], [`AccentStore`] and
//! [`ChatLog`].

pub mod chat;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod preferences;
pub mod session;

pub use chat::{chat_key, example_seed, ChatLog};
pub use database::Database;
pub use memory::MemoryStore;
pub use preferences::AccentStore;
pub use session::SessionStore;

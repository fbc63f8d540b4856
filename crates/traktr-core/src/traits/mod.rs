// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams to the host environment: local persistence and navigation.

pub mod navigator;
pub mod store;

pub use navigator::Navigator;
pub use store::KeyValueStore;

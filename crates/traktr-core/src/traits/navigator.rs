// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation side effect used by the session gate.

/// Performs route changes on behalf of the gate.
pub trait Navigator: Send + Sync {
    /// Replaces the current route (no new history entry).
    fn replace(&self, route: &str);
}

// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route gating and chat intent classification for the Traktr client.
//!
//! This crate provides:
//! - [`SessionGate`]: role and company-membership checks on every route change
//! - [`IntentClassifier`]: ordered keyword rules tagging chat messages

pub mod classifier;
pub mod gate;

pub use classifier::{ClassificationResult, IntentClassifier};
pub use gate::{GateDecision, GateOutcome, GateRules, GateTrigger, RedirectReason, SessionGate};

// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `traktr gate` command implementation.

use traktr_core::{Navigator, TraktrError};
use traktr_router::{GateDecision, GateTrigger};

use crate::context::AppContext;

/// Navigator that reports the replacement route on stdout.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn replace(&self, route: &str) {
        println!("replace -> {route}");
    }
}

/// Evaluates `path` against the cached session as a mount would.
pub async fn run_gate(ctx: &AppContext, path: &str, authenticated: bool) -> Result<(), TraktrError> {
    let gate = ctx.gate();
    let outcome = gate
        .run(GateTrigger::Mount, path, authenticated, &StdoutNavigator)
        .await;

    match outcome.decision {
        GateDecision::Allow => println!("allow {path}"),
        GateDecision::Redirect { target, reason } => {
            println!("redirect {path} -> {target} ({reason})");
        }
    }
    Ok(())
}

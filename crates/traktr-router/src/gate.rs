// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role and company-membership route gate.
//!
//! The gate decides whether the current route may stay on screen and, if
//! not, which route replaces it. It is evaluated on mount, on every path
//! change and whenever the app returns to the foreground. The session is
//! re-read from storage each time.
//!
//! Decision order:
//! 1. public route: allow
//! 2. no authenticated identity: allow (the login flow handles it)
//! 3. no readable cached session: allow
//! 4. employee without a company, off the join route: join route
//! 5. employee on the job creation route: home route
//!
//! The gate fails open. Storage problems never block navigation.

use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, info};
use traktr_config::model::GateConfig;
use traktr_core::{Navigator, Role, Session};
use traktr_storage::SessionStore;

/// What caused a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GateTrigger {
    Mount,
    PathChanged,
    Foreground,
}

/// Why the gate moved the user elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RedirectReason {
    /// Employee has not joined a company yet.
    MustJoinCompany,
    /// Employees cannot create jobs.
    EmployeeCannotCreateJobs,
}

/// Outcome of evaluating a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect {
        target: String,
        reason: RedirectReason,
    },
}

impl GateDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GateDecision::Redirect { .. })
    }
}

/// Result of [`SessionGate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision: GateDecision,
    /// Whether the navigator was called. False for allows and for a redirect
    /// already issued for this pathname.
    pub navigated: bool,
}

/// Pure routing rules, independent of storage.
#[derive(Debug, Clone)]
pub struct GateRules {
    config: GateConfig,
}

impl GateRules {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether `path` is reachable without any session checks.
    pub fn is_public(&self, path: &str) -> bool {
        self.config
            .public_routes
            .iter()
            .any(|route| public_prefix_matches(route, path))
    }

    /// Evaluates the decision order for one route.
    pub fn evaluate(
        &self,
        path: &str,
        authenticated: bool,
        session: Option<&Session>,
    ) -> GateDecision {
        if self.is_public(path) || !authenticated {
            return GateDecision::Allow;
        }
        let Some(session) = session else {
            return GateDecision::Allow;
        };

        if session.must_join_company() && !route_matches(&self.config.join_route, path) {
            return GateDecision::Redirect {
                target: self.config.join_route.clone(),
                reason: RedirectReason::MustJoinCompany,
            };
        }

        if session.role == Role::Employee && route_matches(&self.config.job_create_route, path) {
            return GateDecision::Redirect {
                target: self.config.home_route.clone(),
                reason: RedirectReason::EmployeeCannotCreateJobs,
            };
        }

        GateDecision::Allow
    }
}

/// Allow-list entry check: `/` matches only the root, any other entry
/// matches every path it prefixes (`/join-company` covers
/// `/join-company-success`).
fn public_prefix_matches(route: &str, path: &str) -> bool {
    let route = normalize(route);
    let path = normalize(path);
    if route == "/" {
        return path == "/";
    }
    path.starts_with(route)
}

/// `/` matches only the root; any other route matches itself and its
/// sub-paths on a segment boundary. Trailing slashes are ignored.
fn route_matches(route: &str, path: &str) -> bool {
    let route = normalize(route);
    let path = normalize(path);
    if route == "/" {
        return path == "/";
    }
    path == route
        || path
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// The gate bound to a session store, remembering its last redirect.
pub struct SessionGate {
    rules: GateRules,
    sessions: SessionStore,
    /// `(normalized pathname, target)` of the last redirect issued.
    last_redirect: Mutex<Option<(String, String)>>,
}

impl SessionGate {
    pub fn new(config: GateConfig, sessions: SessionStore) -> Self {
        Self {
            rules: GateRules::new(config),
            sessions,
            last_redirect: Mutex::new(None),
        }
    }

    pub fn rules(&self) -> &GateRules {
        &self.rules
    }

    /// Re-reads the session, evaluates `path` and performs at most one
    /// redirect per pathname through `navigator`.
    pub async fn run(
        &self,
        trigger: GateTrigger,
        path: &str,
        authenticated: bool,
        navigator: &dyn Navigator,
    ) -> GateOutcome {
        // Cheap checks first so public routes never touch storage.
        let decision = if self.rules.is_public(path) || !authenticated {
            GateDecision::Allow
        } else {
            let session = self.sessions.load().await;
            self.rules.evaluate(path, authenticated, session.as_ref())
        };

        let pathname = normalize(path);
        let mut last = self.last_redirect.lock().await;
        let GateDecision::Redirect { target, reason } = &decision else {
            *last = None;
            debug!(%trigger, path, "gate allows route");
            return GateOutcome {
                decision,
                navigated: false,
            };
        };

        let already_sent = last
            .as_ref()
            .is_some_and(|(p, t)| p == pathname && t == target);
        if already_sent {
            debug!(%trigger, path, target = %target, "redirect already issued");
            return GateOutcome {
                decision,
                navigated: false,
            };
        }

        info!(%trigger, path, target = %target, %reason, "gate redirect");
        navigator.replace(target);
        *last = Some((pathname.to_string(), target.clone()));
        GateOutcome {
            decision,
            navigated: true,
        }
    }
}

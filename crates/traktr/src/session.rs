// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `traktr session` and `traktr accent` command implementations.
//!
//! These edit the locally cached records directly. Nothing here talks to
//! an auth provider.

use traktr_core::{Role, Session, TraktrError};

use crate::context::AppContext;

/// Fields for `traktr session set`.
#[derive(Debug, Clone)]
pub struct SessionFields {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub company_id: Option<String>,
    pub profile_complete: bool,
}

pub async fn run_session_show(ctx: &AppContext, json: bool) -> Result<(), TraktrError> {
    let Some(session) = ctx.sessions.load().await else {
        println!("signed out");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!("uid:      {}", session.uid);
    println!("email:    {}", session.email);
    println!("name:     {}", session.name);
    println!("role:     {}", session.role);
    println!("company:  {}", session.company().unwrap_or("-"));
    println!("profile:  {}", if session.profile_complete { "complete" } else { "incomplete" });
    if session.must_join_company() {
        println!("note:     employee must join a company before using the app");
    }
    Ok(())
}

pub async fn run_session_set(ctx: &AppContext, fields: SessionFields) -> Result<(), TraktrError> {
    if fields.uid.trim().is_empty() || fields.email.trim().is_empty() {
        return Err(TraktrError::Validation("uid and email must not be empty".into()));
    }

    let mut session = Session::new(fields.uid, fields.email, fields.role);
    session.name = fields.name.unwrap_or_default();
    session.company_id = fields.company_id.filter(|c| !c.trim().is_empty());
    session.profile_complete = fields.profile_complete;

    ctx.sessions.save(&session).await?;
    println!("session saved for {} ({})", session.uid, session.role);
    Ok(())
}

pub async fn run_session_join(ctx: &AppContext, company_id: &str) -> Result<(), TraktrError> {
    let session = ctx.sessions.join_company(company_id).await?;
    println!(
        "{} joined company {}",
        session.uid,
        session.company().unwrap_or(company_id)
    );
    Ok(())
}

pub async fn run_session_clear(ctx: &AppContext) -> Result<(), TraktrError> {
    ctx.sessions.clear().await?;
    println!("signed out");
    Ok(())
}

pub async fn run_accent_show(ctx: &AppContext) -> Result<(), TraktrError> {
    match ctx.accent.get().await {
        Some(color) => println!("{color}"),
        None => println!("default"),
    }
    Ok(())
}

pub async fn run_accent_set(ctx: &AppContext, color: &str) -> Result<(), TraktrError> {
    ctx.accent.set(color).await?;
    println!("accent saved");
    Ok(())
}

pub async fn run_accent_reset(ctx: &AppContext) -> Result<(), TraktrError> {
    ctx.accent.reset().await?;
    println!("accent reset");
    Ok(())
}

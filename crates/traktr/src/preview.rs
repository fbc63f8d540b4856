// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `traktr classify` and `traktr preview` command implementations.

use traktr_ai_gate::AiGateRequest;
use traktr_core::TraktrError;

use crate::context::AppContext;

pub fn run_classify(ctx: &AppContext, text: &str) -> Result<(), TraktrError> {
    let result = ctx.classifier().classify_with_match(text);
    match result.matched {
        Some(keyword) => println!("{} (matched \"{keyword}\")", result.intent),
        None => println!("{}", result.intent),
    }
    Ok(())
}

pub async fn run_preview(
    ctx: &AppContext,
    job_id: &str,
    job_title: &str,
    text: &str,
    json: bool,
) -> Result<(), TraktrError> {
    let service = ctx.preview_service()?;
    let preview = service
        .preview(&AiGateRequest::new(text, job_title, job_id))
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    if let Some(notice) = &preview.notice {
        eprintln!("note: {notice}");
    }
    println!("[{}] {}", preview.intent, preview.text);
    println!("source: {}", preview.source);
    Ok(())
}

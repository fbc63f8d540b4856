// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `traktr chat` command implementation.

use tokio_util::sync::CancellationToken;
use traktr_core::types::now_millis;
use traktr_core::{ChatMessage, ChatRole, Intent, TraktrError};
use traktr_storage::example_seed;

use crate::context::AppContext;

/// Prints a job's chat log, optionally filtered by intent.
pub async fn run_chat_show(
    ctx: &AppContext,
    job_id: Option<&str>,
    intent: Option<Intent>,
    json: bool,
    cancel: &CancellationToken,
) -> Result<(), TraktrError> {
    let mut log = ctx.chat_log(job_id);
    if !log.load_cancellable(example_seed(now_millis()), cancel).await {
        eprintln!("cancelled");
        return Ok(());
    }

    let shown: Vec<&ChatMessage> = match intent {
        Some(intent) => log.filter_by_intent(intent).collect(),
        None => log.messages().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!("{} ({} messages)", log.key(), shown.len());
    for message in shown {
        println!("{}", format_message(message));
    }
    Ok(())
}

/// Classifies `text`, appends it to the job's log and prints it.
pub async fn run_chat_append(
    ctx: &AppContext,
    job_id: Option<&str>,
    author: &str,
    role: ChatRole,
    text: &str,
    image: Option<&str>,
) -> Result<(), TraktrError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TraktrError::Validation("message text must not be empty".into()));
    }

    let mut log = ctx.chat_log(job_id);
    log.load(example_seed(now_millis())).await;

    let intent = ctx.classifier().classify(text);
    let mut message = ChatMessage::compose(author, role, text, Some(intent));
    if let Some(uri) = image {
        message = message.with_image(uri);
    }
    println!("{}", format_message(&message));
    log.append(message).await;
    Ok(())
}

fn format_message(message: &ChatMessage) -> String {
    let when = chrono::DateTime::from_timestamp_millis(message.created_at)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| message.created_at.to_string());
    let intent = message
        .intent
        .map(|i| format!(" [{i}]"))
        .unwrap_or_default();
    let image = if message.image_uri.is_some() { " (photo)" } else { "" };
    format!(
        "{when} {} ({}){intent}: {}{image}",
        message.author_label, message.role, message.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_message_line() {
        let message = ChatMessage {
            id: "m1".into(),
            author_label: "Boss".into(),
            role: ChatRole::Boss,
            text: "Need conduit".into(),
            created_at: 0,
            intent: Some(Intent::Materials),
            image_uri: Some("file:///tmp/a.jpg".into()),
        };
        assert_eq!(
            format_message(&message),
            "1970-01-01 00:00 Boss (boss) [materials]: Need conduit (photo)"
        );
    }
}

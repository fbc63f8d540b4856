// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traktr operator CLI.
//!
//! Exercises the client core against the local store: route gate checks,
//! job chat logs, draft previews and the cached session.

mod chat;
mod context;
mod gate;
mod preview;
mod session;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use traktr_config::TraktrConfig;
use traktr_core::{ChatRole, Intent, Role, TraktrError};

use crate::context::AppContext;

/// Traktr operator CLI.
#[derive(Parser, Debug)]
#[command(name = "traktr", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON where a command supports it.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the intent a message would be tagged with.
    Classify {
        /// Message text.
        text: String,
    },
    /// Preview a chat draft through the AI gate (local rewrite on failure).
    Preview {
        #[arg(long)]
        job_id: String,
        #[arg(long, default_value = "")]
        job_title: String,
        /// Draft text.
        text: String,
    },
    /// Evaluate the session gate for a route.
    Gate {
        /// Route pathname, e.g. `/jobs/create`.
        path: String,
        /// Evaluate as if no identity were signed in.
        #[arg(long)]
        unauthenticated: bool,
    },
    /// Read or append to a job's chat log.
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },
    /// Inspect or edit the cached session.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Inspect or edit the accent colour preference.
    Accent {
        #[command(subcommand)]
        action: AccentCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ChatCommands {
    /// Print the log (seeded on first use).
    Show {
        /// Job id; omitted uses the general log.
        #[arg(long)]
        job_id: Option<String>,
        /// Only messages with this intent.
        #[arg(long)]
        intent: Option<Intent>,
    },
    /// Append a message, tagging its intent.
    Append {
        #[arg(long)]
        job_id: Option<String>,
        #[arg(long, default_value = "You")]
        author: String,
        #[arg(long, default_value = "you")]
        role: ChatRole,
        /// Attached image URI.
        #[arg(long)]
        image: Option<String>,
        text: String,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommands {
    Show,
    /// Replace the cached session.
    Set {
        #[arg(long)]
        uid: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        profile_complete: bool,
    },
    /// Join a company by id (employees only).
    Join { company_id: String },
    /// Sign out.
    Clear,
}

#[derive(Subcommand, Debug)]
enum AccentCommands {
    Show,
    /// Save a `#RRGGBB` colour.
    Set { color: String },
    Reset,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            traktr_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let ctx = match AppContext::open(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(&ctx, cli.command, cli.json).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<TraktrConfig, Vec<traktr_config::ConfigError>> {
    match path {
        Some(path) => traktr_config::load_and_validate_path(path),
        None => traktr_config::load_and_validate(),
    }
}

async fn dispatch(ctx: &AppContext, command: Commands, json: bool) -> Result<(), TraktrError> {
    match command {
        Commands::Classify { text } => preview::run_classify(ctx, &text),
        Commands::Preview {
            job_id,
            job_title,
            text,
        } => preview::run_preview(ctx, &job_id, &job_title, &text, json).await,
        Commands::Gate {
            path,
            unauthenticated,
        } => gate::run_gate(ctx, &path, !unauthenticated).await,
        Commands::Chat { action } => match action {
            ChatCommands::Show { job_id, intent } => {
                let cancel = shutdown::install_signal_handler();
                chat::run_chat_show(ctx, job_id.as_deref(), intent, json, &cancel).await
            }
            ChatCommands::Append {
                job_id,
                author,
                role,
                image,
                text,
            } => {
                chat::run_chat_append(
                    ctx,
                    job_id.as_deref(),
                    &author,
                    role,
                    &text,
                    image.as_deref(),
                )
                .await
            }
        },
        Commands::Session { action } => match action {
            SessionCommands::Show => session::run_session_show(ctx, json).await,
            SessionCommands::Set {
                uid,
                email,
                role,
                name,
                company,
                profile_complete,
            } => {
                let fields = session::SessionFields {
                    uid,
                    email,
                    role,
                    name,
                    company_id: company,
                    profile_complete,
                };
                session::run_session_set(ctx, fields).await
            }
            SessionCommands::Join { company_id } => {
                session::run_session_join(ctx, &company_id).await
            }
            SessionCommands::Clear => session::run_session_clear(ctx).await,
        },
        Commands::Accent { action } => match action {
            AccentCommands::Show => session::run_accent_show(ctx).await,
            AccentCommands::Set { color } => session::run_accent_set(ctx, &color).await,
            AccentCommands::Reset => session::run_accent_reset(ctx).await,
        },
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins when set; otherwise `traktr*` crates log at `log_level`
/// and everything else at warn.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "traktr={log_level},traktr_core={log_level},traktr_storage={log_level},\
             traktr_router={log_level},traktr_ai_gate={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_chat_append_with_role() {
        let cli = Cli::try_parse_from([
            "traktr", "chat", "append", "--job-id", "j1", "--role", "boss", "need wire",
        ])
        .unwrap();
        match cli.command {
            Commands::Chat {
                action: ChatCommands::Append { job_id, role, text, .. },
            } => {
                assert_eq!(job_id.as_deref(), Some("j1"));
                assert_eq!(role, ChatRole::Boss);
                assert_eq!(text, "need wire");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(
            Cli::try_parse_from([
                "traktr", "session", "set", "--uid", "u", "--email", "e", "--role", "admin",
            ])
            .is_err()
        );
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = traktr_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "traktr");
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MSMA console command-line client.
//!
//! Signs in, runs one console command, prints the JSON result and signs out.

use anyhow::Context;
use clap::{Parser, Subcommand};
use msma_console::{
    config::Config,
    models::{PaginationAccountRequest, PaginationRequest, PaginationSongRequest, SignInRequest},
    services::LogRedirect,
    session::MemorySessionStore,
    Console,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "msma-console", about = "MSMA admin/artist console client")]
struct Cli {
    /// Account e-mail
    #[arg(long, env = "MSMA_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "MSMA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Search text for listing commands
    #[arg(long, default_value = "")]
    search: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Page size
    #[arg(long, default_value_t = 10)]
    size: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List songs
    Songs,
    /// List accounts (admin)
    Accounts,
    /// List albums
    Albums,
    /// List playlists
    Playlists,
    /// Show artist dashboard counters
    Totals,
    /// Delete one of the artist's songs
    DeleteSong { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api = %config.api_base_url, "Starting MSMA console");

    let session = Arc::new(MemorySessionStore::new());
    let console = Console::new(config, session, Arc::new(LogRedirect))?;

    let user_type = console
        .auth
        .sign_in(&SignInRequest::new(&cli.email, &cli.password))
        .await
        .context("Sign-in failed")?;
    tracing::info!(%user_type, "Signed in");

    let outcome = run(&console, &cli).await;

    if let Err(e) = console.auth.sign_out().await {
        tracing::warn!(error = %e, "Sign-out failed");
    }

    let output = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(console: &Console, cli: &Cli) -> anyhow::Result<serde_json::Value> {
    let page = PaginationRequest {
        page: cli.page,
        size: cli.size,
        search: cli.search.clone(),
        ..Default::default()
    };

    let value = match &cli.command {
        Command::Songs => {
            let request = PaginationSongRequest {
                page: cli.page,
                size: cli.size,
                search: cli.search.clone(),
                ..Default::default()
            };
            serde_json::to_value(console.api.search_songs(&request).await?)?
        }
        Command::Accounts => {
            let request = PaginationAccountRequest {
                page: cli.page,
                size: cli.size,
                search: cli.search.clone(),
                ..Default::default()
            };
            serde_json::to_value(console.api.search_accounts(&request).await?)?
        }
        Command::Albums => serde_json::to_value(console.api.search_albums(&page).await?)?,
        Command::Playlists => serde_json::to_value(console.api.search_playlists(&page).await?)?,
        Command::Totals => serde_json::to_value(console.api.artist_totals().await?)?,
        Command::DeleteSong { id } => {
            console.api.delete_song(*id).await?;
            serde_json::json!({ "deleted": id })
        }
    };

    Ok(value)
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("msma_console=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}

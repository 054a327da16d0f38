use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gleaner::api::{AppState, create_router};
use gleaner::config::CONFIG;
use gleaner::data_models::{ErrorPayload, QueryOptions};
use gleaner::providers::duckduckgo::DuckDuckGoProvider;
use gleaner::query_engine::QueryEngine;
use gleaner::storage::ensure_dirs;
use gleaner::summarizer::Summarizer;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gleaner", version, about = "Extractive answers with citations from web search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to bind, overrides GLEANER_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Answer a single query and print the payload as JSON
    Ask {
        query: String,
        /// Also look up prices
        #[arg(long)]
        prices: bool,
    },
    /// Search for a person and print the citations as JSON
    People { name: String },
}

fn build_engine() -> anyhow::Result<QueryEngine> {
    let provider = Arc::new(
        DuckDuckGoProvider::new(CONFIG.duckduckgo()).context("Failed to build search provider")?,
    );
    Ok(QueryEngine::new(
        provider.clone(),
        provider,
        Summarizer::new(CONFIG.summarizer()),
        CONFIG.pipeline(),
    ))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // log crate records are bridged into tracing by the fmt subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind } => {
            ensure_dirs(&CONFIG.runtime_dirs()).context("Failed to create runtime directories")?;

            let state = Arc::new(AppState {
                engine: build_engine()?,
                uploads_dir: CONFIG.uploads_dir.clone(),
            });
            let app = create_router(state, &CONFIG.static_dir, CONFIG.max_upload_bytes);

            let bind = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            tracing::info!("listening on {bind}");
            axum::serve(listener, app).await?;
        }
        Command::Ask { query, prices } => {
            let engine = build_engine()?;
            match engine.search(&QueryOptions::new(query, prices)).await {
                Ok(payload) => print_json(&payload)?,
                Err(e) => print_json(&ErrorPayload::new(e.code()))?,
            }
        }
        Command::People { name } => {
            let engine = build_engine()?;
            match engine.people(&name).await {
                Ok(payload) => print_json(&payload)?,
                Err(e) => print_json(&ErrorPayload::new(e.code()))?,
            }
        }
    }
    Ok(())
}

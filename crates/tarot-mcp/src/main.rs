//! Tarot tool server speaking newline-delimited JSON-RPC over stdio.

mod protocol;
mod server;
mod tools;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tarot_core::{TarotConfig, TarotService};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::server::McpServer;
use crate::tools::ToolHandler;

#[derive(Parser)]
#[command(
    name = "tarot-mcp",
    about = "Tarot tool server over stdio",
    version
)]
struct Args {
    /// Card data file (default: the bundled Rider-Waite deck)
    #[arg(long, env = "TAROT_DECK")]
    deck: Option<PathBuf>,

    /// Hours of inactivity before a session is dropped
    #[arg(long, env = "TAROT_SESSION_TTL_HOURS", default_value_t = 24)]
    session_ttl_hours: u32,

    /// Seconds between idle-session sweeps
    #[arg(long, env = "TAROT_SWEEP_INTERVAL_SECS", default_value_t = 3600)]
    sweep_interval_secs: u64,
}

impl Args {
    fn config(&self) -> TarotConfig {
        let config = TarotConfig::default()
            .with_session_ttl_hours(self.session_ttl_hours)
            .with_sweep_interval_secs(self.sweep_interval_secs);
        match &self.deck {
            Some(path) => config.with_deck_path(path),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args.config()).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(config: TarotConfig) -> Result<(), String> {
    let sweep_interval = config.sweep_interval;
    let service = Arc::new(TarotService::new(config).map_err(|e| e.to_string())?);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        cards = service.deck().len(),
        "starting tarot-mcp"
    );

    let sweeper = Arc::clone(&service);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = sweeper.sweep_sessions();
            debug!(removed, "session sweep");
        }
    });

    McpServer::new(ToolHandler::new(service))
        .run()
        .await
        .map_err(|e| e.to_string())
}

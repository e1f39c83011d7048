//! Locale gate (v1)
//!
//! An edge service that normalizes locale-prefixed URLs before requests
//! reach the page renderer.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  LOCALE GATE                      │
//!   Client Request     │  ┌──────────┐   ┌──────────────┐   ┌──────────┐  │
//!   ───────────────────┼─▶│ request  │──▶│    locale    │──▶│ upstream │──┼──▶ Page
//!                      │  │ id/trace │   │  middleware  │   │ forward  │  │    Origin
//!                      │  └──────────┘   └──────┬───────┘   └──────────┘  │
//!                      │                        │ redirect                 │
//!   308 + Set-Cookie   │                        ▼                          │
//!   ◀──────────────────┼──────────────── response.rs                       │
//!                      │                                                   │
//!                      │  config · routing (router + rule table)           │
//!                      │  observability · lifecycle                        │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use locale_gate::config::load_or_default;
use locale_gate::lifecycle::{self, Shutdown};
use locale_gate::observability::logging;

#[derive(Parser)]
#[command(name = "locale-gate")]
#[command(about = "Edge locale redirector", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "LOCALE_GATE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!("locale-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        locales = ?config.locales.supported,
        default_locale = %config.locales.default,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    lifecycle::start(config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

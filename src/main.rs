//! Student records HTTP API.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ──▶ middleware ──▶ handlers ──▶ StudentStore
//!                                (request id,                (in-memory,
//!                                 trace, limits)              seeded)
//!     Client Response
//!     ◀────────────── JSON body + status ◀────────────────────────┘
//!
//!     Cross-cutting: config (TOML), observability (tracing, metrics),
//!     lifecycle (startup, signals, shutdown)
//! ```

use clap::Parser;
use std::path::PathBuf;

use student_api::config::validation::validate_config;
use student_api::config::{load_or_default, ConfigError};
use student_api::lifecycle;
use student_api::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "student-api")]
#[command(about = "In-memory student records HTTP API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "student-api starting"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

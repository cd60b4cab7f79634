//! # Sift - Faceted Search
//!
//! The main binary for the Sift catalog search engine.
//!
//! This application provides:
//! - CLI interface for searching a catalog and checking its records
//! - HTTP search API (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  apps/sift (THE BINARY)                 │
//! │                                                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌──────────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │ Catalog      │  │
//! │  │   (clap)    │   │   (axum)    │   │ source (I/O) │  │
//! │  └──────┬──────┘   └──────┬──────┘   └──────┬───────┘  │
//! │         └─────────────────┼─────────────────┘          │
//! │                           ▼                            │
//! │                   ┌───────────────┐                    │
//! │                   │   sift-core   │                    │
//! │                   │  (THE LOGIC)  │                    │
//! │                   └───────────────┘                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Search the default catalog (search-index.json)
//! sift search -s soup --sort title_asc
//!
//! # Replay a shared URL against a recipes catalog
//! sift --profile recipes search --url "?diet=vegan&page=2"
//!
//! # Serve the search API
//! sift serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use sift::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // SIFT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SIFT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sift=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Sift startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┬┌─┐┌┬┐
  └─┐│├┤  │
  └─┘┴└   ┴   v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

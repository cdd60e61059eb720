// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Chain Explorer Server
//!
//! Entry point for the `chain-explorer` binary. Parses CLI arguments,
//! initializes logging and metrics, and either serves the explorer over HTTP
//! or acts as a client of a running one.
//!
//! The binary supports four subcommands:
//!
//! - `serve`   — start the HTTP server
//! - `show`    — print one snapshot as text
//! - `watch`   — print a remote chain on a fixed refresh interval
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;
mod refresh;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use chain_explorer::render::render_text;
use chain_explorer::{HttpProvider, SnapshotProvider, StaticProvider};

use cli::{Commands, ExplorerCli};
use logging::LogFormat;
use metrics::ExplorerMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ExplorerCli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Show(args) => show(args).await,
        Commands::Watch(args) => watch(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the explorer: API + static server and the metrics endpoint.
async fn serve(args: cli::ServeArgs) -> Result<()> {
    logging::init_logging(logging::SERVE_FILTER, args.log_format);

    tracing::info!(
        port = args.port,
        metrics_port = args.metrics_port,
        static_dir = %args.static_dir.display(),
        upstream = args.upstream.as_deref().unwrap_or("none"),
        "starting chain-explorer"
    );

    if !args.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %args.static_dir.display(),
            "static directory not found, only API routes will answer"
        );
    }

    // --- Snapshot provider ---
    let provider: Arc<dyn SnapshotProvider> = match &args.upstream {
        Some(url) => Arc::new(
            HttpProvider::new(url)
                .with_context(|| format!("failed to set up upstream provider for {}", url))?,
        ),
        None => Arc::new(StaticProvider::server_sample()),
    };
    tracing::info!(provider = %provider.describe(), "snapshot provider ready");

    // --- Metrics ---
    let explorer_metrics = Arc::new(ExplorerMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider,
        metrics: Arc::clone(&explorer_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state, &args.static_dir);
    let api_addr = format!("0.0.0.0:{}", args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", api_addr))?;
    tracing::info!("Server running at http://localhost:{}", args.port);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&explorer_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("HTTP server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("chain-explorer stopped");
    Ok(())
}

/// Fetches a single snapshot and prints its text rendering to stdout.
async fn show(args: cli::ShowArgs) -> Result<()> {
    logging::init_logging(logging::CLIENT_FILTER, LogFormat::Pretty);

    let provider: Box<dyn SnapshotProvider> = match &args.url {
        Some(url) => Box::new(HttpProvider::new(url)?),
        None => Box::new(args.sample.provider()),
    };

    let snapshot = provider
        .get_snapshot()
        .await
        .with_context(|| format!("failed to fetch snapshot from {}", provider.describe()))?;
    println!("{}", refresh::summary_line(&snapshot));
    print!("{}", render_text(&snapshot)?);
    Ok(())
}

/// Re-fetches and re-prints a remote chain on a fixed interval until Ctrl+C.
async fn watch(args: cli::WatchArgs) -> Result<()> {
    logging::init_logging(logging::CLIENT_FILTER, LogFormat::Pretty);

    let provider = HttpProvider::new(&args.url)?;
    let period = Duration::from_secs(args.interval_secs.max(1));
    tracing::info!(url = provider.url(), period_secs = period.as_secs(), "watching");

    let cycles = refresh::refresh_loop(&provider, period, shutdown_signal(), |snapshot| {
        match render_text(snapshot) {
            Ok(text) => {
                println!(
                    "--- {} @ {} | {} ---",
                    provider.url(),
                    chrono::Local::now().format("%H:%M:%S"),
                    refresh::summary_line(snapshot)
                );
                print!("{}", text);
            }
            Err(e) => tracing::error!("failed to render snapshot: {}", e),
        }
    })
    .await;

    tracing::info!(cycles, "watch stopped");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("chain-explorer {}", env!("CARGO_PKG_VERSION"));
    println!("rustc          {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

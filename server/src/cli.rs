//! # CLI Interface
//!
//! Defines the command-line argument structure for `chain-explorer` using
//! `clap` derive. Four subcommands: `serve`, `show`, `watch` and `version`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chain_explorer::config::{
    DEFAULT_HTTP_PORT, DEFAULT_METRICS_PORT, DEFAULT_REFRESH_INTERVAL, DEFAULT_STATIC_DIR,
};
use chain_explorer::StaticProvider;

use crate::logging::LogFormat;

/// Chain explorer.
///
/// Serves a chain snapshot as JSON, the static explorer page, and a
/// server-rendered view of the chain. Can also fetch a snapshot from a
/// running explorer and print it.
#[derive(Parser, Debug)]
#[command(
    name = "chain-explorer",
    about = "Minimal blockchain explorer",
    version,
    propagate_version = true
)]
pub struct ExplorerCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the explorer HTTP server.
    Serve(ServeArgs),
    /// Fetch one snapshot and print it as text.
    Show(ShowArgs),
    /// Periodically fetch and print a remote explorer's chain.
    Watch(WatchArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port for the HTTP API and static assets.
    #[arg(long, short = 'p', env = "EXPLORER_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "EXPLORER_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Directory served at the root path.
    #[arg(long, env = "EXPLORER_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Base URL of another explorer to proxy snapshots from.
    ///
    /// When omitted, the server answers with its built-in sample chain.
    #[arg(long, env = "EXPLORER_UPSTREAM")]
    pub upstream: Option<String>,

    /// Log output format.
    #[arg(
        long,
        env = "EXPLORER_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,
}

/// Built-in chains available to `show`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The two-block chain served at /api/blockchain.
    Server,
    /// The four-block chain shown by the page.
    Page,
}

impl Sample {
    pub fn provider(self) -> StaticProvider {
        match self {
            Sample::Server => StaticProvider::server_sample(),
            Sample::Page => StaticProvider::page_sample(),
        }
    }
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Base URL of a running explorer. Takes precedence over `--sample`.
    #[arg(long)]
    pub url: Option<String>,

    /// Built-in chain to print when no URL is given.
    #[arg(long, value_enum, default_value_t = Sample::Server)]
    pub sample: Sample,
}

/// Arguments for the `watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Base URL of a running explorer.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// Seconds between refreshes. A refresh that overruns skips the ticks
    /// it missed.
    #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL.as_secs())]
    pub interval_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        ExplorerCli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = ExplorerCli::try_parse_from(["chain-explorer", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, DEFAULT_HTTP_PORT);
                assert_eq!(args.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
                assert_eq!(args.log_format, LogFormat::Pretty);
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn show_accepts_page_sample() {
        let cli =
            ExplorerCli::try_parse_from(["chain-explorer", "show", "--sample", "page"]).unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.sample, Sample::Page);
                assert_eq!(args.sample.provider().current().blocks.len(), 4);
            }
            other => panic!("expected show, got {:?}", other),
        }
    }

    #[test]
    fn watch_interval_defaults_to_refresh_interval() {
        let cli = ExplorerCli::try_parse_from(["chain-explorer", "watch"]).unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.interval_secs, DEFAULT_REFRESH_INTERVAL.as_secs());
                assert_eq!(args.url, "http://127.0.0.1:3000");
            }
            other => panic!("expected watch, got {:?}", other),
        }
    }

    #[test]
    fn serve_accepts_json_logs() {
        let cli =
            ExplorerCli::try_parse_from(["chain-explorer", "serve", "--log-format", "json"])
                .unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.log_format, LogFormat::Json),
            other => panic!("expected serve, got {:?}", other),
        }
        assert!(
            ExplorerCli::try_parse_from(["chain-explorer", "serve", "--log-format", "yaml"])
                .is_err()
        );
    }
}

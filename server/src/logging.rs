//! Log setup for the `chain-explorer` binary.
//!
//! Every log line goes to stderr. `show` and `watch` print the chain on
//! stdout, and that stream must stay free of log noise when piped.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `serve`: explorer events plus per-request traces from tower-http.
pub const SERVE_FILTER: &str = "chain_explorer=info,tower_http=debug";

/// `show` and `watch`: warnings and errors only.
pub const CLIENT_FILTER: &str = "chain_explorer=warn";

/// Shape of each log line, selected with `--log-format`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-oriented lines with target, file and line.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// `RUST_LOG` when it is set and parses, `fallback` otherwise.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the process-wide subscriber. A second call panics.
pub fn init_logging(fallback_filter: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter(fallback_filter));

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
            .init(),
    }

    tracing::debug!(?format, "logging ready");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!(LogFormat::from_str("JSON", true), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("pretty", true), Ok(LogFormat::Pretty));
        assert!(LogFormat::from_str("yaml", true).is_err());
    }

    #[test]
    fn fallback_filters_parse() {
        for filter in [SERVE_FILTER, CLIENT_FILTER] {
            assert!(EnvFilter::try_new(filter).is_ok(), "bad filter {}", filter);
        }
    }
}

//! # Explorer Configuration & Defaults
//!
//! Every default the explorer relies on lives here, so the server, the CLI
//! and the tests agree on ports, paths and fetch behaviour.

use std::time::Duration;

// ---------------------------------------------------------------------------
// HTTP Surface
// ---------------------------------------------------------------------------

/// Default port for the explorer HTTP server.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default port for the Prometheus metrics listener.
pub const DEFAULT_METRICS_PORT: u16 = 3001;

/// Directory static assets are served from, relative to the working directory.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Route that serves the chain snapshot as JSON.
pub const SNAPSHOT_PATH: &str = "/api/blockchain";

// ---------------------------------------------------------------------------
// Networked Provider
// ---------------------------------------------------------------------------

/// Per-attempt timeout for fetching a snapshot from a remote explorer.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Total number of attempts (first try included) before giving up.
pub const DEFAULT_FETCH_RETRIES: u32 = 3;

/// Fixed pause between attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Default refresh period for the `watch` command.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Mount Points
// ---------------------------------------------------------------------------

/// Element id of the chain height display field.
pub const HEIGHT_FIELD_ID: &str = "blockHeight";

/// Element id of the node count display field.
pub const NODES_FIELD_ID: &str = "networkNodes";

/// Element id of the container that holds the block cards.
pub const CHAIN_CONTAINER_ID: &str = "blockchain";

/// CSS classes applied to every block card.
pub const CARD_CLASS: &str = "min-w-[250px] bg-white border rounded-lg shadow p-4";

/// Placeholder `prev` value carried by the first block.
pub const GENESIS_PREV_SENTINEL: &str = "---";

/// Joins a base URL and a route path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://127.0.0.1:3000/", SNAPSHOT_PATH),
            "http://127.0.0.1:3000/api/blockchain"
        );
        assert_eq!(
            join_url("http://127.0.0.1:3000", "api/blockchain"),
            "http://127.0.0.1:3000/api/blockchain"
        );
    }

    #[test]
    fn test_ports_are_distinct() {
        assert_ne!(DEFAULT_HTTP_PORT, DEFAULT_METRICS_PORT);
    }

    #[test]
    fn test_fetch_policy_sanity() {
        // At least one attempt, and the back-off must not dwarf the timeout.
        assert!(DEFAULT_FETCH_RETRIES >= 1);
        assert!(DEFAULT_RETRY_BACKOFF < DEFAULT_FETCH_TIMEOUT);
    }

    #[test]
    fn test_mount_ids_are_distinct() {
        assert_ne!(HEIGHT_FIELD_ID, NODES_FIELD_ID);
        assert_ne!(HEIGHT_FIELD_ID, CHAIN_CONTAINER_ID);
        assert_ne!(NODES_FIELD_ID, CHAIN_CONTAINER_ID);
    }
}

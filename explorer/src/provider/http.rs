//! # Networked Snapshot Provider
//!
//! Fetches `GET /api/blockchain` from a remote explorer with a bounded
//! retry loop.
//!
//! ## Policy
//!
//! | Outcome                          | Retried | Error                  |
//! |----------------------------------|---------|------------------------|
//! | transport error (refused, reset) | yes     | `Fetch`                |
//! | per-attempt timeout              | yes     | `Timeout` if all timed out |
//! | 5xx status                       | yes     | `Fetch`                |
//! | other non-2xx status             | no      | `Fetch`                |
//! | body does not decode             | no      | `MalformedSnapshot`    |
//!
//! Attempts are spaced by a fixed back-off.

use std::time::Duration;

use async_trait::async_trait;

use super::SnapshotProvider;
use crate::config::{
    join_url, DEFAULT_FETCH_RETRIES, DEFAULT_FETCH_TIMEOUT, DEFAULT_RETRY_BACKOFF, SNAPSHOT_PATH,
};
use crate::error::{ExplorerError, ExplorerResult};
use crate::snapshot::ChainSnapshot;

/// Snapshot provider that reads from a remote explorer over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
    attempts: u32,
    backoff: Duration,
}

/// Outcome of a single attempt that did not produce a snapshot.
enum AttemptFailure {
    Retryable(ExplorerError),
    Fatal(ExplorerError),
}

impl HttpProvider {
    /// Creates a provider for the explorer at `base_url` with the default
    /// timeout and retry policy.
    pub fn new(base_url: &str) -> ExplorerResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ExplorerError::Fetch(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            url: join_url(base_url, SNAPSHOT_PATH),
            timeout: DEFAULT_FETCH_TIMEOUT,
            attempts: DEFAULT_FETCH_RETRIES,
            backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Overrides the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the total number of attempts. Zero is treated as one.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Overrides the pause between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// The full snapshot URL this provider fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_once(&self) -> Result<ChainSnapshot, AttemptFailure> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AttemptFailure::Retryable(classify(e)))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(AttemptFailure::Retryable(ExplorerError::Fetch(format!(
                "upstream returned {}",
                status
            ))));
        }
        if !status.is_success() {
            return Err(AttemptFailure::Fatal(ExplorerError::Fetch(format!(
                "upstream returned {}",
                status
            ))));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptFailure::Retryable(classify(e)))?;

        ChainSnapshot::from_json(&body).map_err(AttemptFailure::Fatal)
    }
}

/// Maps a transport error onto the explorer taxonomy.
fn classify(e: reqwest::Error) -> ExplorerError {
    if e.is_timeout() {
        ExplorerError::Timeout { attempts: 1 }
    } else {
        ExplorerError::Fetch(e.to_string())
    }
}

#[async_trait]
impl SnapshotProvider for HttpProvider {
    async fn get_snapshot(&self) -> ExplorerResult<ChainSnapshot> {
        let mut timeouts = 0;
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match self.fetch_once().await {
                Ok(snapshot) => {
                    tracing::debug!(
                        url = %self.url,
                        attempt,
                        blocks = snapshot.blocks.len(),
                        "snapshot fetched"
                    );
                    return Ok(snapshot);
                }
                Err(AttemptFailure::Fatal(e)) => {
                    tracing::warn!(url = %self.url, attempt, "snapshot fetch failed: {}", e);
                    return Err(e);
                }
                Err(AttemptFailure::Retryable(e)) => {
                    if matches!(e, ExplorerError::Timeout { .. }) {
                        timeouts += 1;
                    }
                    tracing::warn!(
                        url = %self.url,
                        attempt,
                        max_attempts = self.attempts,
                        "snapshot fetch attempt failed: {}",
                        e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < self.attempts {
                tokio::time::sleep(self.backoff).await;
            }
        }

        if timeouts == self.attempts {
            return Err(ExplorerError::Timeout {
                attempts: self.attempts,
            });
        }
        Err(last_error.unwrap_or_else(|| ExplorerError::Fetch("no attempt was made".into())))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

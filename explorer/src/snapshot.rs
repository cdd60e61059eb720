//! # Chain Snapshot
//!
//! The data contract shared by every provider and the renderer. A snapshot
//! is built fresh for each request or render cycle, never mutated, and
//! dropped once rendered.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "height": 45,
//!   "nodes": 2,
//!   "blocks": [
//!     { "index": 0, "hash": "abc123", "prev": "---", "time": "12:00", "nonce": 0, "txs": 0 }
//!   ]
//! }
//! ```
//!
//! ## What Is Not Checked
//!
//! `prev` chaining, `index == position` and `height == blocks.len()` are what
//! a real chain would guarantee. Nothing here enforces them. [`link_report`]
//! lists where a snapshot departs from them so callers can log it.
//!
//! [`link_report`]: ChainSnapshot::link_report

use serde::{Deserialize, Serialize};

use crate::config::GENESIS_PREV_SENTINEL;
use crate::error::ExplorerResult;

// ---------------------------------------------------------------------------
// BlockRecord
// ---------------------------------------------------------------------------

/// Point-in-time description of one block. Every field is for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Position label, expected to equal the record's slot in `blocks`.
    pub index: u64,
    /// Identifying label. Not a digest of anything.
    pub hash: String,
    /// Label of the preceding block, or `"---"` for the first one.
    #[serde(rename = "prev")]
    pub prev_hash: String,
    /// Display-formatted time. No format or timezone contract.
    #[serde(rename = "time")]
    pub timestamp: String,
    /// Always zero in practice; no proof-of-work happens.
    pub nonce: u64,
    /// Number of transactions in the block.
    #[serde(rename = "txs")]
    pub transaction_count: u64,
}

impl BlockRecord {
    /// Shorthand constructor used by the canned samples and tests.
    pub fn new(
        index: u64,
        hash: impl Into<String>,
        prev_hash: impl Into<String>,
        timestamp: impl Into<String>,
        nonce: u64,
        transaction_count: u64,
    ) -> Self {
        Self {
            index,
            hash: hash.into(),
            prev_hash: prev_hash.into(),
            timestamp: timestamp.into(),
            nonce,
            transaction_count,
        }
    }

    /// Whether this record carries the first-block `prev` placeholder.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash == GENESIS_PREV_SENTINEL
    }
}

// ---------------------------------------------------------------------------
// ChainSnapshot
// ---------------------------------------------------------------------------

/// One complete, immutable description of chain state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Number of blocks the chain claims to have.
    pub height: u64,
    /// Number of participating endpoints. Informational only.
    #[serde(rename = "nodes")]
    pub node_count: u64,
    /// Blocks in chain order, index 0 first.
    pub blocks: Vec<BlockRecord>,
}

impl ChainSnapshot {
    pub fn new(height: u64, node_count: u64, blocks: Vec<BlockRecord>) -> Self {
        Self {
            height,
            node_count,
            blocks,
        }
    }

    /// Decodes a snapshot from its JSON wire form.
    ///
    /// Missing or mistyped fields surface as
    /// [`ExplorerError::MalformedSnapshot`](crate::ExplorerError::MalformedSnapshot).
    pub fn from_json(bytes: &[u8]) -> ExplorerResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Total transactions across all blocks.
    pub fn total_transactions(&self) -> u64 {
        self.blocks.iter().map(|b| b.transaction_count).sum()
    }

    /// Lists every place the snapshot departs from a well-linked chain.
    ///
    /// Purely diagnostic. An empty report does not make a snapshot valid and
    /// a non-empty one does not make it unusable.
    pub fn link_report(&self) -> Vec<LinkAnomaly> {
        let mut anomalies = Vec::new();

        if self.height != self.blocks.len() as u64 {
            anomalies.push(LinkAnomaly::HeightMismatch {
                declared: self.height,
                actual: self.blocks.len() as u64,
            });
        }

        for (position, block) in self.blocks.iter().enumerate() {
            if block.index != position as u64 {
                anomalies.push(LinkAnomaly::IndexOutOfPlace {
                    position,
                    index: block.index,
                });
            }

            let (linked, expected_prev) = match position {
                0 => (block.is_genesis(), GENESIS_PREV_SENTINEL),
                _ => {
                    let prev = self.blocks[position - 1].hash.as_str();
                    (block.prev_hash == prev, prev)
                }
            };
            if !linked {
                anomalies.push(LinkAnomaly::BrokenLink {
                    position,
                    expected: expected_prev.to_string(),
                    found: block.prev_hash.clone(),
                });
            }
        }

        anomalies
    }
}

/// One departure from a well-linked chain, as found by
/// [`ChainSnapshot::link_report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAnomaly {
    /// `height` disagrees with the number of blocks present.
    HeightMismatch { declared: u64, actual: u64 },
    /// A block's `index` is not its position.
    IndexOutOfPlace { position: usize, index: u64 },
    /// A block's `prev` is not the previous block's `hash`.
    BrokenLink {
        position: usize,
        expected: String,
        found: String,
    },
}

impl std::fmt::Display for LinkAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkAnomaly::HeightMismatch { declared, actual } => {
                write!(f, "height {} but {} block(s) present", declared, actual)
            }
            LinkAnomaly::IndexOutOfPlace { position, index } => {
                write!(f, "block at position {} has index {}", position, index)
            }
            LinkAnomaly::BrokenLink {
                position,
                expected,
                found,
            } => write!(
                f,
                "block at position {} has prev {:?}, expected {:?}",
                position, found, expected
            ),
        }
    }
}

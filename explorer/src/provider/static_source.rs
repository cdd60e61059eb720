//! In-memory snapshot source.
//!
//! Holds one snapshot and hands out clones of it. Comes with the two canned
//! chains the explorer has always shipped with: the two-block sample served
//! by the HTTP route and the four-block sample shown by the page.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::SnapshotProvider;
use crate::error::ExplorerResult;
use crate::snapshot::{BlockRecord, ChainSnapshot};

/// Snapshot provider backed by a value held in memory.
#[derive(Debug, Default)]
pub struct StaticProvider {
    snapshot: RwLock<ChainSnapshot>,
}

impl StaticProvider {
    pub fn new(snapshot: ChainSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// The two-block chain served by `GET /api/blockchain`.
    pub fn server_sample() -> Self {
        Self::new(ChainSnapshot::new(
            45,
            2,
            vec![
                BlockRecord::new(0, "abc123", "---", "12:00", 0, 0),
                BlockRecord::new(1, "def456", "abc123", "12:01", 0, 1),
            ],
        ))
    }

    /// The four-block chain the explorer page renders when offline.
    pub fn page_sample() -> Self {
        Self::new(ChainSnapshot::new(
            45,
            2,
            vec![
                BlockRecord::new(0, "291c485...", "---", "3:32:32 PM", 0, 0),
                BlockRecord::new(1, "f32cc8d2...", "291c485...", "3:34:18 PM", 0, 1),
                BlockRecord::new(2, "6d88ea3f...", "f32cc8d2...", "3:36:34 PM", 0, 1),
                BlockRecord::new(3, "17ec86cf...", "6d88ea3f...", "3:40:57 PM", 0, 4),
            ],
        ))
    }

    /// Swaps in a new snapshot and returns the one it replaced.
    pub fn replace(&self, snapshot: ChainSnapshot) -> ChainSnapshot {
        std::mem::replace(&mut *self.snapshot.write(), snapshot)
    }

    /// Returns a copy of the held snapshot without going through the trait.
    pub fn current(&self) -> ChainSnapshot {
        self.snapshot.read().clone()
    }
}

#[async_trait]
impl SnapshotProvider for StaticProvider {
    async fn get_snapshot(&self) -> ExplorerResult<ChainSnapshot> {
        Ok(self.current())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_sample_has_two_blocks() {
        let snapshot = StaticProvider::server_sample().get_snapshot().await.unwrap();
        assert_eq!(snapshot.height, 45);
        assert_eq!(snapshot.node_count, 2);
        assert_eq!(snapshot.blocks.len(), 2);
        assert_eq!(snapshot.blocks[0].hash, "abc123");
        assert_eq!(snapshot.blocks[1].prev_hash, "abc123");
    }

    #[tokio::test]
    async fn test_page_sample_has_four_linked_blocks() {
        let snapshot = StaticProvider::page_sample().get_snapshot().await.unwrap();
        let indices: Vec<u64> = snapshot.blocks.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(snapshot.total_transactions(), 6);

        // Labels chain, only the declared height is off.
        assert_eq!(snapshot.link_report().len(), 1);
    }

    #[tokio::test]
    async fn test_each_call_returns_a_fresh_copy() {
        let provider = StaticProvider::server_sample();
        let mut first = provider.get_snapshot().await.unwrap();
        first.blocks.clear();

        let second = provider.get_snapshot().await.unwrap();
        assert_eq!(second.blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_swaps_the_source() {
        let provider = StaticProvider::server_sample();
        let previous = provider.replace(ChainSnapshot::default());

        assert_eq!(previous.blocks.len(), 2);
        assert!(provider.get_snapshot().await.unwrap().blocks.is_empty());
        assert_eq!(provider.describe(), "static");
    }
}

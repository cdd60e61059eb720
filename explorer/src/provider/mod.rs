//! # Snapshot Providers
//!
//! A provider answers one question: what does the chain look like right
//! now? The renderer and the HTTP route only ever see the
//! [`SnapshotProvider`] trait, so the data source is swappable.
//!
//! ```text
//! static_source.rs — canned in-memory snapshots (tests, default server)
//! http.rs          — fetches /api/blockchain from a remote explorer
//! ```

pub mod http;
pub mod static_source;

pub use http::HttpProvider;
pub use static_source::StaticProvider;

use async_trait::async_trait;

use crate::error::ExplorerResult;
use crate::snapshot::ChainSnapshot;

/// Source of chain snapshots.
///
/// Each call returns a freshly built snapshot owned by the caller. Nothing
/// is shared between calls.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Produces the current snapshot.
    async fn get_snapshot(&self) -> ExplorerResult<ChainSnapshot>;

    /// Short description for logs, e.g. `static` or the upstream URL.
    fn describe(&self) -> String;
}


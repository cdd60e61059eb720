// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Chain Explorer — Core Library
//!
//! The explorer has two halves that only agree on a data shape:
//!
//! - **snapshot** — [`ChainSnapshot`] and [`BlockRecord`], the JSON contract
//!   served at `/api/blockchain`.
//! - **provider** — where snapshots come from. A static in-memory source for
//!   tests and the default server, and an HTTP source for talking to a
//!   remote explorer.
//! - **render** — turns a snapshot into one card per block inside a
//!   [`Surface`], and from there into HTML or plain text.
//! - **error** — the [`ExplorerError`] taxonomy shared by all of the above.
//! - **config** — defaults: ports, paths, fetch timeout and retry policy.
//!
//! Nothing here is a real blockchain. Hashes are labels, nonces are zero,
//! and nobody checks that `prev` points anywhere.

pub mod config;
pub mod error;
pub mod provider;
pub mod render;
pub mod snapshot;

pub use error::{ExplorerError, ExplorerResult};
pub use provider::{HttpProvider, SnapshotProvider, StaticProvider};
pub use render::{render, render_text, BlockCard, MountIds, Surface};
pub use snapshot::{BlockRecord, ChainSnapshot, LinkAnomaly};

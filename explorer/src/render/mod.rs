//! # Chain Renderer
//!
//! Maps a [`ChainSnapshot`] onto a [`Surface`]: two summary fields and one
//! [`BlockCard`] per block inside a container.
//!
//! ```text
//! surface.rs — the in-memory document (elements keyed by id)
//! card.rs    — one block card and its labelled fields
//! html.rs    — escaping and the page shell
//! ```
//!
//! Every call is a full re-render. The container's previous cards are
//! dropped before the new ones are appended, so nothing from an earlier
//! snapshot survives. All mount points are resolved before anything is
//! written; a missing one leaves the surface exactly as it was.

pub mod card;
pub mod html;
pub mod surface;

pub use card::BlockCard;
pub use surface::{Element, Surface};

use crate::config::{CHAIN_CONTAINER_ID, HEIGHT_FIELD_ID, NODES_FIELD_ID};
use crate::error::{ExplorerError, ExplorerResult};
use crate::snapshot::ChainSnapshot;

/// Element ids the renderer writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountIds {
    /// Text field that receives the chain height.
    pub height: String,
    /// Text field that receives the node count.
    pub nodes: String,
    /// Container that receives the block cards.
    pub container: String,
}

impl Default for MountIds {
    fn default() -> Self {
        Self {
            height: HEIGHT_FIELD_ID.to_string(),
            nodes: NODES_FIELD_ID.to_string(),
            container: CHAIN_CONTAINER_ID.to_string(),
        }
    }
}

/// Renders `snapshot` into the default mount points of `surface`.
pub fn render(surface: &mut Surface, snapshot: &ChainSnapshot) -> ExplorerResult<()> {
    render_into(surface, &MountIds::default(), snapshot)
}

/// Renders `snapshot` into the given mount points of `surface`.
///
/// Fails with [`ExplorerError::NotFound`] if any mount point is missing.
pub fn render_into(
    surface: &mut Surface,
    ids: &MountIds,
    snapshot: &ChainSnapshot,
) -> ExplorerResult<()> {
    let height = surface
        .position(&ids.height)
        .ok_or_else(|| ExplorerError::not_found(&ids.height))?;
    let nodes = surface
        .position(&ids.nodes)
        .ok_or_else(|| ExplorerError::not_found(&ids.nodes))?;
    let container = surface
        .position(&ids.container)
        .ok_or_else(|| ExplorerError::not_found(&ids.container))?;

    surface.element_at_mut(height).set_text(snapshot.height.to_string());
    surface
        .element_at_mut(nodes)
        .set_text(snapshot.node_count.to_string());

    let cards = surface.element_at_mut(container);
    cards.clear_cards();
    for block in &snapshot.blocks {
        cards.append_card(BlockCard::from_record(block));
    }

    tracing::trace!(blocks = snapshot.blocks.len(), "snapshot rendered");
    Ok(())
}

/// Renders `snapshot` onto a fresh explorer page and returns the HTML.
pub fn render_html(snapshot: &ChainSnapshot) -> ExplorerResult<String> {
    let mut surface = Surface::explorer_page();
    render(&mut surface, snapshot)?;
    Ok(surface.to_html())
}

/// Renders `snapshot` onto a fresh explorer page and returns plain text.
pub fn render_text(snapshot: &ChainSnapshot) -> ExplorerResult<String> {
    let mut surface = Surface::explorer_page();
    render(&mut surface, snapshot)?;
    Ok(surface.to_text())
}

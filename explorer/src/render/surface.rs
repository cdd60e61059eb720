//! # Surface
//!
//! A flat, in-memory document: an ordered list of elements, each addressed
//! by id. An element carries display text, an optional label written in
//! front of it, and any number of block cards. That is all the renderer
//! needs, and it serialises to HTML for the server and to plain text for
//! the CLI.

use crate::config::{CHAIN_CONTAINER_ID, HEIGHT_FIELD_ID, NODES_FIELD_ID};

use super::card::BlockCard;
use super::html::{escape_html, page_shell};

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One addressable element of a [`Surface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    id: String,
    tag: String,
    class: Option<String>,
    label: Option<String>,
    text: String,
    cards: Vec<BlockCard>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            class: None,
            label: None,
            text: String::new(),
            cards: Vec::new(),
        }
    }

    /// Sets the element's CSS classes.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets a caption shown before the element's text, e.g. `Height:`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cards(&self) -> &[BlockCard] {
        &self.cards
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Drops every card held by this element.
    pub fn clear_cards(&mut self) {
        self.cards.clear();
    }

    pub fn append_card(&mut self, card: BlockCard) {
        self.cards.push(card);
    }

    fn to_html(&self) -> String {
        let class = self
            .class
            .as_deref()
            .map(|c| format!(" class=\"{}\"", escape_html(c)))
            .unwrap_or_default();

        let mut inner = escape_html(&self.text).into_owned();
        for card in &self.cards {
            inner.push('\n');
            inner.push_str(&card.to_html());
        }

        let element = format!(
            "<{tag} id=\"{id}\"{class}>{inner}</{tag}>",
            tag = self.tag,
            id = escape_html(&self.id),
            class = class,
            inner = inner
        );

        match &self.label {
            Some(label) => format!("<p><strong>{}</strong> {}</p>", escape_html(label), element),
            None => element,
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        match &self.label {
            Some(label) => out.push_str(&format!("{} {}\n", label, self.text)),
            None if !self.text.is_empty() => out.push_str(&format!("{}\n", self.text)),
            None => {}
        }
        for card in &self.cards {
            out.push('\n');
            out.push_str(&card.to_text());
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Ordered collection of addressable elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    elements: Vec<Element>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard explorer layout: height and node fields followed by the
    /// block container.
    pub fn explorer_page() -> Self {
        let mut surface = Self::new();
        surface.add_element(Element::new(HEIGHT_FIELD_ID, "span").with_label("Height:"));
        surface.add_element(Element::new(NODES_FIELD_ID, "span").with_label("Nodes:"));
        surface.add_element(
            Element::new(CHAIN_CONTAINER_ID, "div").with_class("flex gap-4 overflow-x-auto mt-4"),
        );
        surface
    }

    /// Appends an element. An existing element with the same id is replaced
    /// in place.
    pub fn add_element(&mut self, element: Element) {
        match self.position(element.id()) {
            Some(i) => self.elements[i] = element,
            None => self.elements.push(element),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Text of the element with `id`, if present.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(Element::text)
    }

    /// Cards held by the element with `id`, if present.
    pub fn cards(&self, id: &str) -> Option<&[BlockCard]> {
        self.element(id).map(Element::cards)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub(crate) fn element_at_mut(&mut self, index: usize) -> &mut Element {
        &mut self.elements[index]
    }

    /// Serialises the surface into a complete HTML page.
    pub fn to_html(&self) -> String {
        let body = self
            .elements
            .iter()
            .map(Element::to_html)
            .collect::<Vec<_>>()
            .join("\n");
        page_shell(&body)
    }

    /// Plain-text rendering, one element after another.
    pub fn to_text(&self) -> String {
        self.elements.iter().map(Element::to_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::BlockRecord;

    #[test]
    fn test_explorer_page_has_all_mount_points() {
        let surface = Surface::explorer_page();
        assert_eq!(surface.elements.len(), 3);
        for id in [HEIGHT_FIELD_ID, NODES_FIELD_ID, CHAIN_CONTAINER_ID] {
            assert!(surface.element(id).is_some(), "missing #{}", id);
        }
    }

    #[test]
    fn test_add_element_replaces_same_id() {
        let mut surface = Surface::new();
        surface.add_element(Element::new("x", "div"));
        surface.add_element(Element::new("x", "span").with_label("X:"));

        assert_eq!(surface.elements.len(), 1);
        assert_eq!(surface.element("x").unwrap().tag, "span");
    }

    #[test]
    fn test_html_contains_ids_and_cards() {
        let mut surface = Surface::explorer_page();
        surface
            .element_mut(HEIGHT_FIELD_ID)
            .unwrap()
            .set_text("45");
        let record = BlockRecord::new(0, "abc", "---", "12:00", 0, 0);
        surface
            .element_mut(CHAIN_CONTAINER_ID)
            .unwrap()
            .append_card(BlockCard::from_record(&record));

        let html = surface.to_html();
        let height = r#"<p><strong>Height:</strong> <span id="blockHeight">45</span></p>"#;
        assert!(html.contains(height));
        assert!(html.contains("id=\"networkNodes\""));
        assert!(html.contains(r#"<div id="blockchain" class="flex gap-4 overflow-x-auto mt-4">"#));
        assert!(html.contains("<strong>Block #0</strong>"));
    }

    #[test]
    fn test_text_output_skips_empty_unlabelled_elements() {
        let mut surface = Surface::new();
        surface.add_element(Element::new("empty", "div"));
        surface.add_element(Element::new("n", "span").with_label("Nodes:"));
        surface.element_mut("n").unwrap().set_text("2");

        assert_eq!(surface.to_text(), "Nodes: 2\n");
    }

    #[test]
    fn test_empty_surface() {
        let surface = Surface::new();
        assert!(surface.elements.is_empty());
        assert!(surface.text("blockHeight").is_none());
    }
}

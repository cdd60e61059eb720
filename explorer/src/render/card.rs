//! One rendered block: a title line and five labelled fields.

use crate::config::CARD_CLASS;
use crate::snapshot::BlockRecord;

use super::html::escape_html;

/// The visual unit for one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCard {
    class: String,
    record: BlockRecord,
}

impl BlockCard {
    /// Builds the card for `record` with the standard card classes.
    pub fn from_record(record: &BlockRecord) -> Self {
        Self {
            class: CARD_CLASS.to_string(),
            record: record.clone(),
        }
    }

    /// The block this card displays.
    pub fn record(&self) -> &BlockRecord {
        &self.record
    }

    /// Title line, e.g. `Block #3`.
    pub fn title(&self) -> String {
        format!("Block #{}", self.record.index)
    }

    /// The labelled fields under the title, in display order.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Hash:", self.record.hash.clone()),
            ("Prev:", self.record.prev_hash.clone()),
            ("Time:", self.record.timestamp.clone()),
            ("Nonce:", self.record.nonce.to_string()),
            ("Txs:", self.record.transaction_count.to_string()),
        ]
    }

    pub fn to_html(&self) -> String {
        let mut out = format!(
            "<div class=\"{}\">\n  <div><strong>{}</strong></div>\n",
            escape_html(&self.class),
            escape_html(&self.title())
        );
        for (label, value) in self.fields() {
            out.push_str(&format!(
                "  <div><strong>{}</strong> {}</div>\n",
                label,
                escape_html(&value)
            ));
        }
        out.push_str("</div>");
        out
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("+ {}\n", self.title());
        for (label, value) in self.fields() {
            out.push_str(&format!("  {:<7}{}\n", label, value));
        }
        out
    }
}

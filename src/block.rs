//! Input blocks and their labeled form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Category, CuePattern};

/// Opaque per-block metadata carried from extraction to the chunk.
pub type Meta = BTreeMap<String, serde_json::Value>;

/// Layout role the extractor assigned to a block.
///
/// Only informational: classification is driven by the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// A title line.
    Heading,
    /// Body text or a list step.
    #[default]
    Paragraph,
    /// Any other value the extractor produced.
    #[serde(other)]
    Other,
}

/// One extracted block of text, in document order.
///
/// ```rust
/// use bilah::{Block, BlockType};
///
/// let heading = Block::heading("H1", "Bab 1 Cahaya");
/// assert_eq!(heading.block_type, BlockType::Heading);
///
/// let para = Block::new("P2", "Cahaya adalah gelombang.");
/// assert_eq!(para.block_type, BlockType::Paragraph);
/// assert!(para.meta.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier from extraction.
    pub id: String,
    /// Raw text.
    pub text: String,
    /// Declared layout role.
    #[serde(default)]
    pub block_type: BlockType,
    /// Extractor metadata (page number, bounding box, ...).
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Block {
    /// Create a paragraph block.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            block_type: BlockType::Paragraph,
            meta: Meta::new(),
        }
    }

    /// Create a heading block.
    #[must_use]
    pub fn heading(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Heading,
            ..Self::new(id, text)
        }
    }

    /// Attach one metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// A block after normalization and classification.
///
/// `category` always equals `Category::from(cue_pattern)`; the chunk builder
/// works out its own effective values without touching these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBlock {
    /// Identifier of the source block.
    pub id: String,
    /// Normalized text.
    pub text: String,
    /// Declared layout role of the source block.
    pub block_type: BlockType,
    /// Fine-grained cue.
    pub cue_pattern: CuePattern,
    /// Coarse category derived from the cue.
    pub category: Category,
    /// Metadata of the source block.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

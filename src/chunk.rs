//! The Chunk type: a sealed run of same-function blocks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Category, CuePattern, Meta};

/// Context attached to a chunk, not part of its content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMeta {
    /// Heading texts seen since the previous chunk was sealed, in order.
    pub headings: Vec<String>,
    /// Extractor metadata of the content blocks, keyed by block id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub blocks_meta: BTreeMap<String, Meta>,
}

/// A retrieval unit: consecutive blocks sharing one communicative function.
///
/// `texts`, `block_ids`, `cue_patterns`, and `categories` are index-aligned.
/// Headings never appear in `texts`; they travel in [`ChunkMeta::headings`]
/// of the chunk they introduce.
///
/// ```rust
/// use bilah::{Block, Chunker, Pipeline};
///
/// let blocks = vec![
///     Block::heading("H1", "Bab 1 Cahaya"),
///     Block::new("P2", "Cahaya adalah gelombang elektromagnetik."),
/// ];
/// let chunks = Pipeline::default().chunk(&blocks);
///
/// assert_eq!(chunks[0].chunk_id, "CH0001");
/// assert_eq!(chunks[0].meta.headings, vec!["Bab 1 Cahaya"]);
/// assert_eq!(chunks[0].content(), "Cahaya adalah gelombang elektromagnetik.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// `CH0001`, `CH0002`, ... in emission order.
    pub chunk_id: String,
    /// Normalized block texts.
    pub texts: Vec<String>,
    /// Source block ids.
    pub block_ids: Vec<String>,
    /// Effective cue of each block.
    pub cue_patterns: Vec<CuePattern>,
    /// Effective category of each block.
    pub categories: Vec<Category>,
    /// Headings and per-block metadata.
    pub meta: ChunkMeta,
}

impl Chunk {
    /// Format the id for the `ordinal`-th chunk (1-based).
    #[must_use]
    pub fn format_id(ordinal: usize) -> String {
        format!("CH{ordinal:04}")
    }

    /// The chunk body: block texts joined by newlines.
    #[must_use]
    pub fn content(&self) -> String {
        self.texts.join("\n")
    }

    /// Number of content blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the chunk has no content blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// The 1-based position encoded in `chunk_id`, if it is well-formed.
    #[must_use]
    pub fn ordinal(&self) -> Option<usize> {
        self.chunk_id.strip_prefix("CH")?.parse().ok()
    }

    /// Category of the chunk's first block.
    ///
    /// Boundaries are drawn on every change of effective category, so every
    /// block in the chunk shares it.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.categories.first().copied()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, blocks: {}, category: {}, headings: {} }}",
            self.chunk_id,
            self.len(),
            self.category().map_or("-", Category::as_str),
            self.meta.headings.len()
        )
    }
}

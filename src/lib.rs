//! # bilah
//!
//! Function-aware chunking of textbook pages for retrieval-augmented
//! generation (RAG) pipelines.
//!
//! ## The Problem
//!
//! A textbook page is not uniform prose. Within a few lines it explains a
//! concept, tells a story, walks the reader through an activity, and asks
//! questions about it. Size-based chunking cuts straight through those
//! functions:
//!
//! - An activity split mid-way loses its later steps
//! - A question chunked with the explanation before it leaks the answer
//! - Publisher boilerplate pollutes every neighbouring chunk
//!
//! Retrieval works better when each chunk does one job.
//!
//! ## How It Works
//!
//! Extraction (out of scope here) yields an ordered list of [`Block`]s.
//!
//! ```text
//! Block ──normalize──▶ classify ──▶ LabeledBlock ──ChunkBuilder──▶ Chunk
//!                      (cue)        (cue, category)   (lock, repair)
//! ```
//!
//! 1. **Labeling** ([`label_blocks`]): each block's text is normalized and
//!    given a [`CuePattern`] by an ordered cascade of lexical rules
//!    ([`CueClassifier`]), then mapped to a coarse [`Category`].
//! 2. **Chunking** ([`ChunkBuilder`]): a reducer walks the labeled blocks,
//!    cuts on category changes, keeps headings as chunk context, and holds an
//!    *activity lock* so instruction and evaluation runs stay whole.
//!
//! | Cue | Category |
//! |-----|----------|
//! | `IMPERATIVE_TASK` | `INSTRUKSI` |
//! | `EVALUATIVE_QUESTION` | `EVALUASI` |
//! | `NARRATIVE_SEQUENCE` | `NARASI` |
//! | `META_BOILERPLATE` | `META` |
//! | everything else | `KONSEP` |
//!
//! ## Quick Start
//!
//! ```rust
//! use bilah::{Block, Category, Chunker, Pipeline};
//!
//! let blocks = vec![
//!     Block::heading("H1", "Bab 1 Cahaya"),
//!     Block::new("P2", "Cahaya adalah gelombang elektromagnetik."),
//!     Block::new("P3", "Amati cahaya di sekitarmu."),
//!     Block::new("S4", "1. Siapkan senter"),
//! ];
//!
//! let chunks = Pipeline::default().chunk(&blocks);
//!
//! assert_eq!(chunks[0].meta.headings, vec!["Bab 1 Cahaya"]);
//! assert_eq!(chunks[0].categories, vec![Category::Konsep]);
//! assert_eq!(chunks[1].categories, vec![Category::Instruksi, Category::Instruksi]);
//! ```
//!
//! ## Other Languages
//!
//! All word lists live in a [`Lexicon`]. Load a JSON override with
//! [`PipelineConfig::from_json`] and compile it with [`Pipeline::new`].
//!
//! ## Order Matters
//!
//! The lock and the continuation check look backwards, so the same blocks in
//! a different order can chunk differently. Labeling is order-independent.

mod block;
mod builder;
mod chunk;
mod classify;
mod config;
mod cue;
mod error;
mod label;
mod lexicon;
mod normalize;
mod pipeline;

pub use block::{Block, BlockType, LabeledBlock, Meta};
pub use builder::{
    build_chunks, ChunkBuilder, ChunkConfig, ChunkState, Effective, Repair, Resolution,
};
pub use chunk::{Chunk, ChunkMeta};
pub use classify::CueClassifier;
pub use config::PipelineConfig;
pub use cue::{ActivityLock, Category, CuePattern};
pub use error::{Error, Result};
pub use label::{label_block, label_blocks};
pub use lexicon::Lexicon;
pub use normalize::normalize;
pub use pipeline::Pipeline;

/// A block-sequence chunking strategy.
///
/// ```rust
/// use bilah::{Block, Chunker, Pipeline};
///
/// fn chunk_page(chunker: &dyn Chunker, blocks: &[Block]) -> Vec<bilah::Chunk> {
///     chunker.chunk(blocks)
/// }
///
/// let blocks = vec![Block::new("P1", "Cahaya adalah gelombang.")];
/// assert_eq!(chunk_page(&Pipeline::default(), &blocks).len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Group blocks into chunks, in document order.
    fn chunk(&self, blocks: &[Block]) -> Vec<Chunk>;

    /// Estimate the number of chunks for a given number of blocks.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, n_blocks: usize) -> usize {
        // Textbook pages average a few blocks per function run.
        n_blocks.div_ceil(4)
    }
}

/// Label blocks with the built-in Indonesian lexicon.
pub fn label_blocks_default(blocks: &[Block]) -> Vec<LabeledBlock> {
    label_blocks(blocks, CueClassifier::builtin())
}

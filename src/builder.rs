//! The chunk-boundary reducer.
//!
//! ## The Problem
//!
//! Category changes are the natural place to cut, but page extraction is
//! noisy and weak text inside an activity reads like plain exposition:
//!
//! ```text
//! Amati gambar berikut.                   IMPERATIVE  INSTRUKSI
//! Setelah itu tuliskan warnanya di buku.  FACT        KONSEP     <- cut here?
//! 1. Siapkan senter                       IMPERATIVE  INSTRUKSI
//! dan catat hasilnya.                     FACT        KONSEP     <- tail of the line above
//! ```
//!
//! Cutting on the raw categories would scatter one activity over four chunks.
//!
//! ## The Reducer
//!
//! [`ChunkBuilder::step`] takes the state and one labeled block and returns
//! the next state plus at most one sealed chunk. State carries:
//!
//! - the open accumulator (content plus the headings that introduce it),
//! - the activity lock: `None`, `Instruksi`, or `Evaluasi`,
//! - the previous block's effective cue and category.
//!
//! Per block: headings seal and reset; the lock follows the block's own cue;
//! a lowercase tail of an unterminated activity line joins it (continuation
//! repair); weak text inside a locked run joins it when it carries the run's
//! marks (an imperative verb, or a question); then a change of effective
//! category seals the open chunk.
//!
//! Output depends on input order: the lock and the continuation check both
//! look backwards.

use serde::{Deserialize, Serialize};

use crate::cue::ActivityLock;
use crate::{Category, Chunk, ChunkMeta, CueClassifier, CuePattern, LabeledBlock};

/// A line ending in one of these finishes its sentence.
const STRONG_END: [char; 5] = ['.', '!', '?', '…', ':'];

/// Longest text, in words, still treated as the tail of a broken sentence.
const CONTINUATION_MAX_WORDS: usize = 25;

/// Chunk builder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Drop `META_BOILERPLATE` blocks before they reach the boundary logic.
    pub skip_meta: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { skip_meta: true }
    }
}

/// The cue and category a block counts as for boundary purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    /// Effective cue.
    pub cue: CuePattern,
    /// Effective category.
    pub category: Category,
}

/// Why a block's effective values differ from its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Tail of the previous, unterminated activity line.
    Continuation,
    /// Weak text absorbed by the active lock.
    LockCoercion,
}

/// Outcome of resolving one content block against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Effective cue and category.
    pub effective: Effective,
    /// Lock after this block.
    pub lock: ActivityLock,
    /// Which repair, if any, produced `effective`.
    pub repair: Option<Repair>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Accumulator {
    texts: Vec<String>,
    block_ids: Vec<String>,
    cue_patterns: Vec<CuePattern>,
    categories: Vec<Category>,
    meta: ChunkMeta,
}

impl Accumulator {
    fn has_content(&self) -> bool {
        !self.texts.is_empty()
    }

    fn push(&mut self, block: &LabeledBlock, effective: Effective) {
        self.texts.push(block.text.clone());
        self.block_ids.push(block.id.clone());
        self.cue_patterns.push(effective.cue);
        self.categories.push(effective.category);
        if !block.meta.is_empty() {
            self.meta
                .blocks_meta
                .insert(block.id.clone(), block.meta.clone());
        }
    }

    fn into_chunk(self, ordinal: usize) -> Chunk {
        Chunk {
            chunk_id: Chunk::format_id(ordinal),
            texts: self.texts,
            block_ids: self.block_ids,
            cue_patterns: self.cue_patterns,
            categories: self.categories,
            meta: self.meta,
        }
    }
}

/// Reducer state between two blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkState {
    open: Accumulator,
    lock: ActivityLock,
    last: Option<Effective>,
    next_ordinal: usize,
}

impl Default for ChunkState {
    fn default() -> Self {
        Self {
            open: Accumulator::default(),
            lock: ActivityLock::None,
            last: None,
            next_ordinal: 1,
        }
    }
}

impl ChunkState {
    /// The current activity lock.
    pub fn lock(&self) -> ActivityLock {
        self.lock
    }

    /// Effective values of the last content block, if the open chunk has one.
    pub fn last_effective(&self) -> Option<Effective> {
        self.last
    }

    /// Number of content blocks in the open chunk.
    pub fn open_len(&self) -> usize {
        self.open.texts.len()
    }

    /// Headings collected for the open chunk.
    pub fn pending_headings(&self) -> &[String] {
        &self.open.meta.headings
    }

    /// Number of chunks sealed so far.
    pub fn sealed(&self) -> usize {
        self.next_ordinal - 1
    }

    fn last_text(&self) -> Option<&str> {
        self.open.texts.last().map(String::as_str)
    }

    fn seal(&mut self, reason: &'static str) -> Option<Chunk> {
        if !self.open.has_content() {
            return None;
        }
        let open = std::mem::take(&mut self.open);
        let chunk = open.into_chunk(self.next_ordinal);
        self.next_ordinal += 1;
        tracing::debug!(
            chunk_id = %chunk.chunk_id,
            blocks = chunk.len(),
            category = chunk.category().map_or("-", Category::as_str),
            reason,
            "sealed chunk"
        );
        Some(chunk)
    }
}

/// Groups labeled blocks into chunks.
///
/// ## Example
///
/// ```rust
/// use bilah::{label_blocks, Block, Category, ChunkBuilder, ChunkConfig, CueClassifier};
///
/// let classifier = CueClassifier::builtin();
/// let blocks = vec![
///     Block::new("P1", "Amati gambar berikut."),
///     Block::new("P2", "Setelah itu tuliskan warnanya di buku."),
///     Block::new("P3", "Daun adalah bagian tumbuhan."),
/// ];
/// let labeled = label_blocks(&blocks, classifier);
/// let chunks = ChunkBuilder::new(classifier, ChunkConfig::default()).build(&labeled);
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].categories, vec![Category::Instruksi, Category::Instruksi]);
/// assert_eq!(chunks[1].categories, vec![Category::Konsep]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChunkBuilder<'c> {
    classifier: &'c CueClassifier,
    config: ChunkConfig,
}

impl<'c> ChunkBuilder<'c> {
    /// Create a builder. The classifier supplies the lexical checks used by
    /// continuation repair and lock coercion.
    pub fn new(classifier: &'c CueClassifier, config: ChunkConfig) -> Self {
        Self { classifier, config }
    }

    /// The builder's settings.
    pub fn config(&self) -> ChunkConfig {
        self.config
    }

    /// Consume one labeled block.
    ///
    /// Returns the next state and the chunk this block sealed, if any.
    pub fn step(&self, mut state: ChunkState, block: &LabeledBlock) -> (ChunkState, Option<Chunk>) {
        if self.config.skip_meta && block.cue_pattern == CuePattern::Meta {
            tracing::trace!(block_id = %block.id, "skipped boilerplate");
            return (state, None);
        }

        if block.cue_pattern == CuePattern::Heading {
            let sealed = state.seal("heading");
            state.lock = ActivityLock::None;
            state.last = None;
            state.open.meta.headings.push(block.text.clone());
            return (state, sealed);
        }

        let Resolution {
            effective, lock, ..
        } = self.resolve(&state, block);
        state.lock = lock;

        let boundary = !matches!(state.last, Some(prev) if prev.category == effective.category);
        let sealed = if boundary {
            state.seal("category change")
        } else {
            None
        };

        state.open.push(block, effective);
        state.last = Some(effective);
        (state, sealed)
    }

    /// Seal whatever content is still open.
    ///
    /// Headings with no content after them produce no chunk.
    pub fn finish(&self, mut state: ChunkState) -> Option<Chunk> {
        state.seal("end of input")
    }

    /// Run the reducer over a whole sequence.
    pub fn build(&self, labeled: &[LabeledBlock]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let state = labeled.iter().fold(ChunkState::default(), |state, block| {
            let (state, sealed) = self.step(state, block);
            chunks.extend(sealed);
            state
        });
        chunks.extend(self.finish(state));
        chunks
    }

    /// Work out a content block's effective cue, category, and the lock after it.
    ///
    /// Does not look at or change chunk boundaries; `step` does that.
    pub fn resolve(&self, state: &ChunkState, block: &LabeledBlock) -> Resolution {
        let own = block.cue_pattern;

        // Weak cues keep the previous lock until we know whether the run absorbs them.
        let mut lock = match own {
            CuePattern::Imperative => ActivityLock::Instruksi,
            CuePattern::Evaluative => ActivityLock::Evaluasi,
            CuePattern::Glossary
            | CuePattern::Definition
            | CuePattern::CauseEffect
            | CuePattern::Example => ActivityLock::None,
            CuePattern::Narrative
            | CuePattern::Fact
            | CuePattern::Intro
            | CuePattern::Meta
            | CuePattern::Heading => state.lock,
        };

        let mut effective = Effective {
            cue: own,
            category: block.category,
        };
        let mut repair = None;

        if let Some(category) = self.continuation_of(state, block) {
            if let Some(cue) = category.activity_cue() {
                tracing::trace!(block_id = %block.id, %category, "continuation repair");
                effective = Effective { cue, category };
                repair = Some(Repair::Continuation);
            }
        }

        if let Some(cue) = self.lock_coercion(lock, effective.cue, &block.text) {
            tracing::trace!(block_id = %block.id, cue = cue.as_str(), "lock coercion");
            effective = Effective {
                cue,
                category: Category::from(cue),
            };
            repair = Some(Repair::LockCoercion);
        }

        if let Some(locked) = lock.category() {
            if locked.activity_cue() == Some(effective.cue) {
                effective.category = locked;
            }
        }

        // Strong cues already set the lock from their own label.
        if own.is_weak() {
            lock = if repair.is_some() && effective.category.is_activity() {
                ActivityLock::from_category(effective.category)
            } else {
                ActivityLock::None
            };
        }

        Resolution {
            effective,
            lock,
            repair,
        }
    }

    /// The activity category this block continues, if it is the tail of the
    /// previous line.
    fn continuation_of(&self, state: &ChunkState, block: &LabeledBlock) -> Option<Category> {
        let prev = state.last?;
        let last_text = state.last_text()?;
        if last_text.trim_end().ends_with(STRONG_END) {
            return None;
        }
        let text = block.text.as_str();
        let opens_as_tail = text.chars().next().is_some_and(char::is_lowercase)
            || self.classifier.starts_with_continuation(text);
        if !opens_as_tail || text.split_whitespace().count() > CONTINUATION_MAX_WORDS {
            return None;
        }
        prev.category.is_activity().then_some(prev.category)
    }

    fn lock_coercion(&self, lock: ActivityLock, cue: CuePattern, text: &str) -> Option<CuePattern> {
        match lock {
            ActivityLock::Instruksi
                if cue.is_weak() && self.classifier.contains_imperative_token(text) =>
            {
                Some(CuePattern::Imperative)
            }
            ActivityLock::Evaluasi
                if matches!(cue, CuePattern::Fact | CuePattern::Intro)
                    && (text.contains('?') || self.classifier.is_evaluative(text)) =>
            {
                Some(CuePattern::Evaluative)
            }
            _ => None,
        }
    }
}

/// Build chunks with the built-in classifier.
pub fn build_chunks(labeled: &[LabeledBlock], config: ChunkConfig) -> Vec<Chunk> {
    ChunkBuilder::new(CueClassifier::builtin(), config).build(labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{label_block, Block};

    fn lb(id: &str, text: &str) -> LabeledBlock {
        label_block(&Block::new(id, text), CueClassifier::builtin())
    }

    fn builder() -> ChunkBuilder<'static> {
        ChunkBuilder::new(CueClassifier::builtin(), ChunkConfig::default())
    }

    fn run(blocks: &[LabeledBlock]) -> Vec<Chunk> {
        builder().build(blocks)
    }

    #[test]
    fn test_empty_input() {
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn test_heading_seals_open_chunk() {
        let chunks = run(&[
            lb("P1", "Cahaya adalah gelombang."),
            lb("H2", "Bab 2 Bunyi"),
            lb("P3", "Bunyi adalah getaran."),
        ]);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].meta.headings.is_empty());
        assert_eq!(chunks[1].meta.headings, vec!["Bab 2 Bunyi"]);
        assert_eq!(chunks[1].block_ids, vec!["P3"]);
    }

    #[test]
    fn test_consecutive_headings_share_chunk() {
        let chunks = run(&[
            lb("H1", "Bab 1 Cahaya"),
            lb("H2", "Topik A: Sumber Cahaya"),
            lb("P3", "Matahari adalah sumber cahaya alami."),
        ]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].meta.headings,
            vec!["Bab 1 Cahaya", "Topik A: Sumber Cahaya"]
        );
    }

    #[test]
    fn test_trailing_heading_produces_no_chunk() {
        let chunks = run(&[lb("P1", "Cahaya adalah gelombang."), lb("H2", "Bab 2 Bunyi")]);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].meta.headings.is_empty());
    }

    #[test]
    fn test_heading_resets_lock() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("P1", "Amati gambar berikut."));
        assert_eq!(state.lock(), ActivityLock::Instruksi);
        let (state, sealed) = b.step(state, &lb("H2", "Bab 2 Bunyi"));
        assert_eq!(state.lock(), ActivityLock::None);
        assert_eq!(state.open_len(), 0);
        assert_eq!(state.pending_headings(), ["Bab 2 Bunyi"]);
        assert_eq!(sealed.map(|c| c.chunk_id), Some("CH0001".to_string()));
    }

    #[test]
    fn test_skipped_meta_leaves_state_untouched() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("P1", "1. Siapkan senter"));
        let before = state.clone();
        let meta = lb("M2", "ISBN 978-602-244-381-1");
        assert_eq!(meta.cue_pattern, CuePattern::Meta);
        let (after, sealed) = b.step(state, &meta);
        assert!(sealed.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn test_meta_is_content_when_not_skipped() {
        let b = ChunkBuilder::new(CueClassifier::builtin(), ChunkConfig { skip_meta: false });
        let chunks = b.build(&[
            lb("P1", "Cahaya adalah gelombang."),
            lb("M2", "Hak Cipta © 2021 pada Kementerian Pendidikan"),
            lb("P3", "Bunyi adalah getaran."),
        ]);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].categories, vec![Category::Meta]);
    }

    #[test]
    fn test_continuation_joins_unterminated_step() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("S1", "1. Siapkan senter"));
        let tail = lb("P2", "dan catat hasilnya.");
        assert_eq!(tail.category, Category::Konsep);
        let res = b.resolve(&state, &tail);
        assert_eq!(res.repair, Some(Repair::Continuation));
        assert_eq!(res.effective.category, Category::Instruksi);
        assert_eq!(res.effective.cue, CuePattern::Imperative);
        assert_eq!(res.lock, ActivityLock::Instruksi);
        // The labeled block itself is untouched.
        assert_eq!(tail.cue_pattern, CuePattern::Fact);
    }

    #[test]
    fn test_no_continuation_after_terminated_line() {
        let chunks = run(&[
            lb("S1", "1. Siapkan senter."),
            lb("P2", "dan hasilnya dicatat di buku."),
        ]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].categories, vec![Category::Konsep]);
    }

    #[test]
    fn test_continuation_does_not_force_konsep() {
        let chunks = run(&[
            lb("P1", "Cahaya adalah gelombang"),
            lb("P2", "yang merambat lurus."),
        ]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].cue_patterns, vec![CuePattern::Definition, CuePattern::Fact]);
    }

    #[test]
    fn test_long_tail_is_not_a_continuation() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("S1", "1. Siapkan senter"));
        let long = "dan ".to_string() + &"kata ".repeat(30);
        let res = b.resolve(&state, &lb("P2", &long));
        assert_ne!(res.repair, Some(Repair::Continuation));
    }

    #[test]
    fn test_instruction_lock_absorbs_text_with_verb() {
        let chunks = run(&[
            lb("P1", "Amati gambar berikut."),
            lb("P2", "Setelah itu tuliskan warnanya di buku."),
        ]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].cue_patterns, vec![CuePattern::Imperative; 2]);
    }

    #[test]
    fn test_weak_text_without_verb_releases_lock() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("P1", "Amati gambar berikut."));
        let (state, sealed) = b.step(state, &lb("P2", "Daun itu berwarna hijau tua."));
        assert_eq!(state.lock(), ActivityLock::None);
        assert_eq!(sealed.map(|c| c.block_ids), Some(vec!["P1".to_string()]));
    }

    #[test]
    fn test_evaluation_lock_absorbs_question() {
        let question = lb("P2", "Bagaimana bentuk bayangan benda itu?");
        assert_eq!(question.cue_pattern, CuePattern::Fact);
        let chunks = run(&[lb("P1", "Jawablah pertanyaan berikut."), question]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].categories, vec![Category::Evaluasi; 2]);
    }

    #[test]
    fn test_glossary_releases_lock_and_splits_activity() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("P1", "Amati gambar berikut."));
        let (state, sealed) = b.step(state, &lb("G2", "Kosakata Baru"));
        assert_eq!(state.lock(), ActivityLock::None);
        assert!(sealed.is_some());
    }

    #[test]
    fn test_glossary_joins_open_konsep_chunk() {
        let chunks = run(&[lb("P1", "Cahaya adalah gelombang."), lb("G2", "Kosakata Baru")]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].cue_patterns, vec![CuePattern::Definition, CuePattern::Glossary]);
    }

    #[test]
    fn test_chunk_ids_are_monotonic() {
        let chunks = run(&[
            lb("P1", "Cahaya adalah gelombang."),
            lb("P2", "Amati gambar berikut."),
            lb("P3", "Jawablah pertanyaan berikut."),
            lb("P4", "Dahulu kala hiduplah seekor kancil."),
        ]);
        let ids: Vec<_> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(ids, ["CH0001", "CH0002", "CH0003", "CH0004"]);
    }

    #[test]
    fn test_blocks_meta_recorded() {
        let block = label_block(
            &Block::new("P1", "Cahaya adalah gelombang.").with_meta("page", 7),
            CueClassifier::builtin(),
        );
        let chunks = run(&[block, lb("P2", "Bunyi adalah getaran.")]);
        assert_eq!(chunks[0].meta.blocks_meta.len(), 1);
        assert_eq!(chunks[0].meta.blocks_meta["P1"]["page"], serde_json::json!(7));
    }

    #[test]
    fn test_repaired_strong_cue_keeps_its_own_lock() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("S1", "1. Siapkan senter"));
        let tail = lb("P2", "dan jawablah pertanyaan berikut ini dengan teliti.");
        assert_eq!(tail.cue_pattern, CuePattern::Evaluative);

        let res = b.resolve(&state, &tail);
        assert_eq!(res.repair, Some(Repair::Continuation));
        assert_eq!(res.effective.category, Category::Instruksi);
        assert_eq!(res.lock, ActivityLock::Evaluasi);

        let question = lb("P3", "Bagaimana hasilnya pada senter itu?");
        assert_eq!(question.cue_pattern, CuePattern::Fact);
        let chunks = run(&[lb("S1", "1. Siapkan senter"), tail, question]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].block_ids, vec!["S1", "P2"]);
        assert_eq!(chunks[1].categories, vec![Category::Evaluasi]);
    }

    #[test]
    fn test_repaired_definition_releases_lock() {
        let b = builder();
        let (state, _) = b.step(ChunkState::default(), &lb("S1", "1. Siapkan senter"));
        let tail = lb("P2", "yaitu lampu kecil yang dapat memancarkan cahaya terang.");
        assert_eq!(tail.cue_pattern, CuePattern::Definition);

        let (state, sealed) = b.step(state, &tail);
        assert!(sealed.is_none());
        assert_eq!(state.lock(), ActivityLock::None);
        assert_eq!(
            state.last_effective().map(|e| e.category),
            Some(Category::Instruksi)
        );

        // Without a lock, later text with a verb is not pulled into the run.
        let (state, sealed) = b.step(state, &lb("P3", "Setelah itu tuliskan warnanya di buku."));
        assert_eq!(sealed.map(|c| c.block_ids), Some(vec!["S1".to_string(), "P2".to_string()]));
        assert_eq!(state.sealed(), 1);
        assert_eq!(
            state.last_effective(),
            Some(Effective {
                cue: CuePattern::Fact,
                category: Category::Konsep,
            })
        );
    }

    #[test]
    fn test_build_chunks_uses_builtin_classifier() {
        let labeled = [
            lb("M1", "ISBN 978-602-244-381-1"),
            lb("P2", "Amati gambar berikut."),
            lb("P3", "Cahaya adalah gelombang."),
        ];
        let config = ChunkConfig { skip_meta: false };
        assert!(!ChunkBuilder::new(CueClassifier::builtin(), config).config().skip_meta);

        let chunks = build_chunks(&labeled, config);
        assert_eq!(chunks, ChunkBuilder::new(CueClassifier::builtin(), config).build(&labeled));
        assert_eq!(chunks.len(), 3);
        assert_eq!(build_chunks(&labeled, ChunkConfig::default()).len(), 2);
    }
}

//! Label-then-chunk in one value.

use crate::{
    label_blocks, Block, Chunk, ChunkBuilder, ChunkConfig, Chunker, CueClassifier, LabeledBlock,
    PipelineConfig, Result,
};

/// A compiled classifier plus chunking settings.
///
/// ## Example
///
/// ```rust
/// use bilah::{Block, Category, Chunker, Pipeline};
///
/// let blocks = vec![
///     Block::heading("H1", "Bab 1 Cahaya"),
///     Block::new("P2", "Cahaya adalah gelombang elektromagnetik."),
///     Block::new("P3", "Amati cahaya di sekitarmu."),
///     Block::new("S4", "1. Siapkan senter"),
///     Block::new("P5", "dan catat hasilnya."),
/// ];
///
/// let chunks = Pipeline::default().chunk(&blocks);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1].block_ids, vec!["P3", "S4", "P5"]);
/// assert!(chunks[1].categories.iter().all(|c| *c == Category::Instruksi));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    classifier: CueClassifier,
    chunking: ChunkConfig,
}

impl Pipeline {
    /// Compile a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the lexicon is unusable or a pattern does not compile.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            classifier: CueClassifier::new(&config.lexicon)?,
            chunking: config.chunking,
        })
    }

    /// Replace the chunk builder settings.
    #[must_use]
    pub fn with_chunking(mut self, chunking: ChunkConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// The compiled classifier.
    pub fn classifier(&self) -> &CueClassifier {
        &self.classifier
    }

    /// The chunk builder settings.
    pub fn chunking(&self) -> ChunkConfig {
        self.chunking
    }

    /// Normalize and classify every block.
    pub fn label(&self, blocks: &[Block]) -> Vec<LabeledBlock> {
        label_blocks(blocks, &self.classifier)
    }

    /// Group already-labeled blocks.
    pub fn build(&self, labeled: &[LabeledBlock]) -> Vec<Chunk> {
        ChunkBuilder::new(&self.classifier, self.chunking).build(labeled)
    }
}

impl Chunker for Pipeline {
    fn chunk(&self, blocks: &[Block]) -> Vec<Chunk> {
        let labeled = self.label(blocks);
        let chunks = self.build(&labeled);
        tracing::debug!(blocks = blocks.len(), chunks = chunks.len(), "chunked document");
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CuePattern, Error};

    #[test]
    fn test_new_from_config() {
        let config = PipelineConfig::from_json(r#"{"skip_meta": false}"#).unwrap();
        let pipeline = Pipeline::new(&config).unwrap();
        assert!(!pipeline.chunking().skip_meta);
    }

    #[test]
    fn test_new_rejects_bad_pattern() {
        let mut config = PipelineConfig::default();
        config.lexicon.meta_patterns = vec!["[".into()];
        assert!(matches!(
            Pipeline::new(&config),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_skip_meta_toggle() {
        let blocks = vec![
            Block::new("M1", "ISBN 978-602-244-381-1"),
            Block::new("P2", "Cahaya adalah gelombang."),
        ];
        let skipping = Pipeline::default();
        assert_eq!(skipping.chunk(&blocks).len(), 1);

        let keeping = Pipeline::default().with_chunking(ChunkConfig { skip_meta: false });
        assert_eq!(keeping.chunk(&blocks).len(), 2);
    }

    #[test]
    fn test_estimate_chunks() {
        let pipeline = Pipeline::default();
        assert_eq!(pipeline.estimate_chunks(0), 0);
        assert_eq!(pipeline.estimate_chunks(1), 1);
        assert!(pipeline.estimate_chunks(40) >= 1);
    }

    #[test]
    fn test_classifier_follows_lexicon_override() {
        let config =
            PipelineConfig::from_json(r#"{"lexicon": {"prompt_words": ["ingatkah"]}}"#).unwrap();
        let pipeline = Pipeline::new(&config).unwrap();
        let text = "Ingatkah kamu pelajaran minggu lalu tentang bunyi di sekitar kita?";
        assert_eq!(pipeline.classifier().classify(text), CuePattern::Intro);
        assert_ne!(Pipeline::default().classifier().classify(text), CuePattern::Intro);
    }
}

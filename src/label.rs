//! Labeling: normalize, classify, and categorize every block.

use crate::{normalize, Block, Category, CueClassifier, LabeledBlock};

/// Label one block.
pub fn label_block(block: &Block, classifier: &CueClassifier) -> LabeledBlock {
    let text = normalize(&block.text);
    let cue_pattern = classifier.classify(&text);
    LabeledBlock {
        id: block.id.clone(),
        text,
        block_type: block.block_type,
        cue_pattern,
        category: Category::from(cue_pattern),
        meta: block.meta.clone(),
    }
}

/// Label a block sequence, one output per input, in order.
///
/// ```rust
/// use bilah::{label_blocks, Block, Category, CueClassifier, CuePattern};
///
/// let blocks = vec![
///     Block::new("P1", "  Amati   cahaya di sekitarmu. "),
///     Block::new("P2", "Cahaya adalah gelombang."),
/// ];
/// let labeled = label_blocks(&blocks, CueClassifier::builtin());
///
/// assert_eq!(labeled[0].text, "Amati cahaya di sekitarmu.");
/// assert_eq!(labeled[0].cue_pattern, CuePattern::Imperative);
/// assert_eq!(labeled[1].category, Category::Konsep);
/// ```
pub fn label_blocks(blocks: &[Block], classifier: &CueClassifier) -> Vec<LabeledBlock> {
    blocks
        .iter()
        .map(|block| label_block(block, classifier))
        .collect()
}

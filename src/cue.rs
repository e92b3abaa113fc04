//! Cue patterns, coarse categories, and the mapping between them.
//!
//! A cue pattern is the fine-grained reading of what one block is doing on
//! the page. Categories are the coarse groups chunk boundaries are drawn on:
//!
//! ```text
//! IMPERATIVE_TASK                      -> INSTRUKSI
//! EVALUATIVE_QUESTION                  -> EVALUASI
//! NARRATIVE_SEQUENCE                   -> NARASI
//! META_BOILERPLATE                     -> META
//! everything else (incl. GLOSSARY_TERM) -> KONSEP
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heuristic classification of a block's communicative function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CuePattern {
    /// Chapter, topic, or short title line. Never chunk content.
    #[serde(rename = "NEW_SUBTOPIC_HEADING")]
    Heading,
    /// Instruction to the reader, including numbered activity steps.
    #[serde(rename = "IMPERATIVE_TASK")]
    Imperative,
    /// Exercise, question, or reflection prompt.
    #[serde(rename = "EVALUATIVE_QUESTION")]
    Evaluative,
    /// Sentence that defines or names a concept.
    #[serde(rename = "DEFINITION")]
    Definition,
    /// Sentence built around a cause/effect connective.
    #[serde(rename = "CAUSE_EFFECT")]
    CauseEffect,
    /// Sentence introducing an example.
    #[serde(rename = "EXAMPLE_ILLUSTRATION")]
    Example,
    /// Story-like sequence.
    #[serde(rename = "NARRATIVE_SEQUENCE")]
    Narrative,
    /// Plain expository text; the fallback.
    #[serde(rename = "FACT_EXPLANATION")]
    Fact,
    /// Discourse opener addressed to the reader ("Tahukah kamu ...").
    #[serde(rename = "PROMPT_INTRO")]
    Intro,
    /// Glossary section heading or entry.
    #[serde(rename = "GLOSSARY_TERM")]
    Glossary,
    /// Publisher, ministry, identifier, or copyright boilerplate.
    #[serde(rename = "META_BOILERPLATE")]
    Meta,
}

impl CuePattern {
    /// Every cue pattern, in cascade order.
    pub const ALL: [Self; 11] = [
        Self::Meta,
        Self::Heading,
        Self::Glossary,
        Self::Imperative,
        Self::Evaluative,
        Self::Intro,
        Self::Definition,
        Self::CauseEffect,
        Self::Example,
        Self::Narrative,
        Self::Fact,
    ];

    /// Stable name used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "NEW_SUBTOPIC_HEADING",
            Self::Imperative => "IMPERATIVE_TASK",
            Self::Evaluative => "EVALUATIVE_QUESTION",
            Self::Definition => "DEFINITION",
            Self::CauseEffect => "CAUSE_EFFECT",
            Self::Example => "EXAMPLE_ILLUSTRATION",
            Self::Narrative => "NARRATIVE_SEQUENCE",
            Self::Fact => "FACT_EXPLANATION",
            Self::Intro => "PROMPT_INTRO",
            Self::Glossary => "GLOSSARY_TERM",
            Self::Meta => "META_BOILERPLATE",
        }
    }

    /// Cues weak enough that an active lock may absorb them.
    pub(crate) const fn is_weak(self) -> bool {
        matches!(self, Self::Narrative | Self::Fact | Self::Intro)
    }
}

impl fmt::Display for CuePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Coarse grouping used for chunk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Instructions and activity steps.
    Instruksi,
    /// Exercises, questions, and reflection.
    Evaluasi,
    /// Narrative text.
    Narasi,
    /// Conceptual and expository text.
    Konsep,
    /// Boilerplate.
    Meta,
}

impl Category {
    /// Stable name used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instruksi => "INSTRUKSI",
            Self::Evaluasi => "EVALUASI",
            Self::Narasi => "NARASI",
            Self::Konsep => "KONSEP",
            Self::Meta => "META",
        }
    }

    /// Whether this category belongs to an activity run (instruction or evaluation).
    #[must_use]
    pub const fn is_activity(self) -> bool {
        matches!(self, Self::Instruksi | Self::Evaluasi)
    }

    /// The cue an activity category implies when a block is pulled into its run.
    pub(crate) const fn activity_cue(self) -> Option<CuePattern> {
        match self {
            Self::Instruksi => Some(CuePattern::Imperative),
            Self::Evaluasi => Some(CuePattern::Evaluative),
            _ => None,
        }
    }
}

impl From<CuePattern> for Category {
    fn from(cue: CuePattern) -> Self {
        match cue {
            CuePattern::Imperative => Self::Instruksi,
            CuePattern::Evaluative => Self::Evaluasi,
            CuePattern::Narrative => Self::Narasi,
            CuePattern::Meta => Self::Meta,
            CuePattern::Heading
            | CuePattern::Definition
            | CuePattern::CauseEffect
            | CuePattern::Example
            | CuePattern::Fact
            | CuePattern::Intro
            | CuePattern::Glossary => Self::Konsep,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The chunk builder's memory of an in-progress activity run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityLock {
    /// No run in progress.
    #[default]
    None,
    /// Inside an instruction run.
    Instruksi,
    /// Inside an evaluation run.
    Evaluasi,
}

impl ActivityLock {
    /// The category this lock holds, if any.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::None => None,
            Self::Instruksi => Some(Category::Instruksi),
            Self::Evaluasi => Some(Category::Evaluasi),
        }
    }

    /// Lock corresponding to a category: activity categories lock, others release.
    #[must_use]
    pub const fn from_category(category: Category) -> Self {
        match category {
            Category::Instruksi => Self::Instruksi,
            Category::Evaluasi => Self::Evaluasi,
            _ => Self::None,
        }
    }
}

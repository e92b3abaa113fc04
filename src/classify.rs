//! Cue-pattern classification of single blocks.
//!
//! ## The Cascade
//!
//! Rules are tried in order and the first one that fires decides:
//!
//! ```text
//!  1. boilerplate pattern / shouting caps     -> META_BOILERPLATE
//!  2. heading-shaped line                     -> GLOSSARY_TERM | EVALUATIVE_QUESTION
//!                                                | IMPERATIVE_TASK | NEW_SUBTOPIC_HEADING
//!  3. numbered line that is not a heading     -> EVALUATIVE_QUESTION | IMPERATIVE_TASK
//!  4. opens with an imperative                -> EVALUATIVE_QUESTION | IMPERATIVE_TASK
//!  5. evaluative trigger                      -> EVALUATIVE_QUESTION
//!  6. prompt word                             -> PROMPT_INTRO
//!  7. definition keyword                      -> DEFINITION
//!  8. cause/effect connective                 -> CAUSE_EFFECT
//!  9. example connective                      -> EXAMPLE_ILLUSTRATION
//! 10. narrative connective                    -> NARRATIVE_SEQUENCE
//! 11. otherwise                               -> FACT_EXPLANATION
//! ```
//!
//! ## Numbered Lines
//!
//! Textbooks number both sub-topic titles and activity steps, and the
//! extractor cannot tell them apart:
//!
//! ```text
//! "2. Sifat-Sifat Cahaya"          heading
//! "2. Siapkan senter dan cermin."  step (imperative in the first three words)
//! "2. Lalu arahkan ke dinding."    step (opens with a continuation)
//! "2. Apa warna bayanganmu?"       numbered question
//! ```
//!
//! A numbered line is a heading only if it is not question-shaped, has no
//! imperative verb among its first three words, does not open with a
//! continuation connector, and has at most six words after the number.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

use crate::{CuePattern, Error, Lexicon, Result};

/// Short titles have at most this many words.
const HEADING_MAX_WORDS: usize = 6;

/// Boilerplate needs at least this many letters before the caps ratio counts.
const SHOUTING_MIN_ALPHA: usize = 30;

/// Percentage of uppercase letters above which a line is treated as boilerplate.
const SHOUTING_UPPER_PERCENT: usize = 85;

const SENTENCE_END: [char; 4] = ['.', '!', '?', '…'];

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*\d+\.\s+(.+)$").expect("valid numbered line regex"));

static BUILTIN: LazyLock<CueClassifier> = LazyLock::new(|| {
    CueClassifier::new(&Lexicon::default()).expect("built-in lexicon compiles")
});

/// Rule-based classifier compiled from a [`Lexicon`].
///
/// ## Example
///
/// ```rust
/// use bilah::{CueClassifier, CuePattern};
///
/// let classifier = CueClassifier::builtin();
/// assert_eq!(classifier.classify("Bab 1 Cahaya"), CuePattern::Heading);
/// assert_eq!(classifier.classify("Amati cahaya di sekitarmu."), CuePattern::Imperative);
/// assert_eq!(classifier.classify("1. Siapkan senter"), CuePattern::Imperative);
/// assert_eq!(
///     classifier.classify("Cahaya adalah gelombang elektromagnetik."),
///     CuePattern::Definition
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CueClassifier {
    imperative_verbs: HashSet<String>,
    imperative_prefixes: Vec<String>,
    imperative_markers: HashSet<String>,
    imperative_suffix: String,
    evaluative_triggers: Vec<String>,
    reflection_triggers: Vec<String>,
    prompt_words: Vec<String>,
    activity_prefixes: Vec<String>,
    glossary_prefixes: Vec<String>,
    question_words: Vec<String>,
    continuation_prefixes: Vec<String>,
    chapter: Option<Regex>,
    definition: Option<Regex>,
    cause_effect: Option<Regex>,
    example: Option<Regex>,
    narrative: Option<Regex>,
    meta: Vec<Regex>,
}

impl CueClassifier {
    /// Compile a lexicon.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLexiconField`] if a required list is empty and
    /// [`Error::InvalidPattern`] if a boilerplate pattern does not compile.
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        lexicon.validate()?;

        let meta = lexicon
            .meta_patterns
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| Error::InvalidPattern {
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            imperative_verbs: lowered(&lexicon.imperative_verbs).into_iter().collect(),
            imperative_prefixes: lowered(&lexicon.imperative_prefixes),
            imperative_markers: lowered(&lexicon.imperative_markers).into_iter().collect(),
            imperative_suffix: lexicon.imperative_suffix.trim().to_lowercase(),
            evaluative_triggers: lowered(&lexicon.evaluative_triggers),
            reflection_triggers: lowered(&lexicon.reflection_triggers),
            prompt_words: lowered(&lexicon.prompt_words),
            activity_prefixes: lowered(&lexicon.activity_prefixes),
            glossary_prefixes: lowered(&lexicon.glossary_prefixes),
            question_words: lowered(&lexicon.question_words),
            continuation_prefixes: lowered(&lexicon.continuation_prefixes),
            chapter: alternation(&lexicon.chapter_prefixes, r"^(?:", r")\s+\w+")?,
            definition: whole_words(&lexicon.definition_keywords)?,
            cause_effect: whole_words(&lexicon.cause_effect_connectives)?,
            example: whole_words(&lexicon.example_connectives)?,
            narrative: whole_words(&lexicon.narrative_connectives)?,
            meta,
        })
    }

    /// The classifier compiled from [`Lexicon::default`], shared process-wide.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Classify one normalized block of text.
    ///
    /// Total: every input, including the empty string, gets a cue.
    pub fn classify(&self, text: &str) -> CuePattern {
        let lower = text.to_lowercase();
        let cue = self.cascade(text, &lower);
        tracing::trace!(cue = cue.as_str(), text = %preview(text), "classified block");
        cue
    }

    fn cascade(&self, text: &str, lower: &str) -> CuePattern {
        if self.is_boilerplate(text) {
            return CuePattern::Meta;
        }

        let numbered = numbered_rest(lower);
        let numbered_question = numbered.is_some_and(|rest| self.is_question_shaped(rest));
        let glossary = starts_with_any(lower, &self.glossary_prefixes);
        let activity = starts_with_any(lower, &self.activity_prefixes);

        let heading = self.chapter.as_ref().is_some_and(|re| re.is_match(lower))
            || glossary
            || activity
            || match numbered {
                Some(rest) => self.numbered_rest_is_heading(rest),
                None => self.is_short_title(lower),
            };

        if heading {
            return if glossary {
                CuePattern::Glossary
            } else if contains_any(lower, &self.reflection_triggers) {
                CuePattern::Evaluative
            } else if activity {
                CuePattern::Imperative
            } else if numbered_question {
                CuePattern::Evaluative
            } else {
                CuePattern::Heading
            };
        }

        if numbered.is_some() {
            return if numbered_question {
                CuePattern::Evaluative
            } else {
                CuePattern::Imperative
            };
        }

        if self.opens_with_imperative(lower) {
            return if contains_any(lower, &self.evaluative_triggers) {
                CuePattern::Evaluative
            } else {
                CuePattern::Imperative
            };
        }

        if self.is_evaluative_lower(lower) {
            return CuePattern::Evaluative;
        }
        if contains_any(lower, &self.prompt_words) {
            return CuePattern::Intro;
        }
        if matches_opt(self.definition.as_ref(), lower) {
            return CuePattern::Definition;
        }
        if matches_opt(self.cause_effect.as_ref(), lower) {
            return CuePattern::CauseEffect;
        }
        if matches_opt(self.example.as_ref(), lower) {
            return CuePattern::Example;
        }
        if matches_opt(self.narrative.as_ref(), lower) {
            return CuePattern::Narrative;
        }
        CuePattern::Fact
    }

    /// Whether any word in the text is an imperative verb (with or without `-lah`).
    pub fn contains_imperative_token(&self, text: &str) -> bool {
        text.to_lowercase()
            .unicode_words()
            .any(|word| self.is_imperative_word(word))
    }

    /// Whether the text reads as an exercise or question on its own:
    /// it carries an evaluative trigger or is a numbered question.
    pub fn is_evaluative(&self, text: &str) -> bool {
        self.is_evaluative_lower(&text.to_lowercase())
    }

    /// Whether the text opens with a continuation connector ("dan", "lalu", ...).
    pub fn starts_with_continuation(&self, text: &str) -> bool {
        starts_with_any(&text.to_lowercase(), &self.continuation_prefixes)
    }

    fn is_evaluative_lower(&self, lower: &str) -> bool {
        contains_any(lower, &self.evaluative_triggers)
            || numbered_rest(lower).is_some_and(|rest| self.is_question_shaped(rest))
    }

    fn is_boilerplate(&self, text: &str) -> bool {
        self.meta.iter().any(|re| re.is_match(text)) || is_shouting(text)
    }

    fn is_question_shaped(&self, rest: &str) -> bool {
        rest.contains('?') || starts_with_any(rest, &self.question_words)
    }

    fn numbered_rest_is_heading(&self, rest: &str) -> bool {
        !self.is_question_shaped(rest)
            && !rest
                .split_whitespace()
                .take(3)
                .any(|word| self.is_imperative_word(strip_punctuation(word)))
            && !starts_with_any(rest, &self.continuation_prefixes)
            && rest.split_whitespace().count() <= HEADING_MAX_WORDS
    }

    fn is_short_title(&self, lower: &str) -> bool {
        let words = lower.split_whitespace().count();
        (1..=HEADING_MAX_WORDS).contains(&words)
            && !lower.ends_with(SENTENCE_END)
            && !lower.contains('?')
            && !matches_opt(self.definition.as_ref(), lower)
    }

    fn opens_with_imperative(&self, lower: &str) -> bool {
        let Some(first) = lower.split_whitespace().next().map(strip_punctuation) else {
            return false;
        };
        if first.is_empty() {
            return false;
        }
        self.is_imperative_word(first)
            || self
                .imperative_prefixes
                .iter()
                .any(|stem| first.starts_with(stem.as_str()))
            || self.imperative_markers.contains(first)
    }

    fn is_imperative_word(&self, word: &str) -> bool {
        if self.imperative_verbs.contains(word) {
            return true;
        }
        if self.imperative_suffix.is_empty() {
            return false;
        }
        word.strip_suffix(self.imperative_suffix.as_str())
            .map(|stem| stem.trim_end_matches('-'))
            .is_some_and(|stem| !stem.is_empty() && self.imperative_verbs.contains(stem))
    }
}

impl Default for CueClassifier {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

fn lowered(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Build `<open>a|b|c<close>` from escaped entries, or `None` for an empty list.
fn alternation(list: &[String], open: &str, close: &str) -> Result<Option<Regex>> {
    let entries = lowered(list);
    if entries.is_empty() {
        return Ok(None);
    }
    let body = entries
        .iter()
        .map(|e| regex::escape(e))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("{open}{body}{close}");
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| Error::InvalidPattern { pattern, source })
}

fn whole_words(list: &[String]) -> Result<Option<Regex>> {
    alternation(list, r"\b(?:", r")\b")
}

fn matches_opt(re: Option<&Regex>, text: &str) -> bool {
    re.is_some_and(|re| re.is_match(text))
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// Prefix match that ends on a word boundary: "dan" matches "dan catat" but not "danau".
fn starts_with_any(haystack: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        haystack.strip_prefix(prefix.as_str()).is_some_and(|tail| {
            !tail.chars().next().is_some_and(char::is_alphanumeric)
        })
    })
}

fn numbered_rest(lower: &str) -> Option<&str> {
    NUMBERED_LINE
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
}

fn is_shouting(text: &str) -> bool {
    let (alpha, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(alpha, upper), c| {
            (alpha + 1, upper + usize::from(c.is_uppercase()))
        });
    alpha >= SHOUTING_MIN_ALPHA && upper * 100 > alpha * SHOUTING_UPPER_PERCENT
}

pub(crate) fn preview(text: &str) -> String {
    text.chars().take(48).collect()
}

//! Pipeline configuration.
//!
//! ```json
//! {
//!   "skip_meta": true,
//!   "lexicon": { "glossary_prefixes": ["kosakata baru", "daftar istilah"] }
//! }
//! ```
//!
//! Both keys are optional; a lexicon given here is merged field-by-field over
//! the built-in one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ChunkConfig, Error, Lexicon, Result};

/// Everything needed to build a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Chunk builder settings.
    #[serde(flatten)]
    pub chunking: ChunkConfig,
    /// Word lists and patterns for the classifier.
    #[serde(default)]
    pub lexicon: Lexicon,
}

impl PipelineConfig {
    /// Parse and validate configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON and
    /// [`Error::EmptyLexiconField`] if the lexicon is unusable.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.lexicon.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`PipelineConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded pipeline config");
        Self::from_json(&json)
    }
}

//! Error types for bilah.
//!
//! Labeling and chunking are total; only building a classifier from a
//! lexicon and loading configuration can fail.

use std::path::PathBuf;

/// Errors that can occur while configuring a pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A boilerplate pattern in the lexicon is not a valid regular expression.
    #[error("invalid lexicon pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        #[source]
        source: regex::Error,
    },

    /// A lexicon list that the classifier cannot work without is empty.
    #[error("lexicon field `{0}` must not be empty")]
    EmptyLexiconField(&'static str),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for bilah operations.
pub type Result<T> = std::result::Result<T, Error>;

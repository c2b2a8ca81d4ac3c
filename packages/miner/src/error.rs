//! Error types for the obligation miner.
//!
//! Extraction itself is total: missing matches produce empty results. The
//! variants below cover the collaborators around it (files, parse readers,
//! patterns, serialization and chart rendering).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the miner library.
#[derive(Debug, Error)]
pub enum MinerError {
    /// Heading class is not a usable CSS class name.
    #[error("Invalid heading class: '{0}'. Expected a CSS identifier (e.g., headnote-e)")]
    InvalidClassName(String),

    /// A CSS selector could not be built.
    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// A regular expression from the lexicon failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A CoNLL-U file has a malformed line.
    #[error("CoNLL-U parse error at line {line}: {message}")]
    Conllu { line: usize, message: String },

    /// The dependency structure of a sentence is not a tree.
    #[error("Malformed dependency parse in sentence {sentence}: {reason}")]
    MalformedParse { sentence: String, reason: String },

    /// Failed to read an input file.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Chart rendering failed.
    #[error("Chart rendering failed: {0}")]
    Plot(String),

    /// Nothing to plot for the requested label.
    #[error("No frequency rows for label '{0}'")]
    EmptyLabel(String),
}

/// Result type alias for miner operations.
pub type Result<T> = std::result::Result<T, MinerError>;

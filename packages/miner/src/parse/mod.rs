//! Readers for dependency parses produced by an external parser.
//!
//! The miner does not parse text itself. It reads CoNLL-U files or spaCy
//! `Doc.to_json()` output into [`ParsedSentence`] arenas.

mod conllu;
mod spacy;
mod types;

use std::path::Path;

use clap::ValueEnum;

use crate::error::{MinerError, Result};

pub use conllu::parse_conllu;
pub use spacy::parse_spacy_json;
pub use types::{DependencyToken, ParsedSentence};

#[cfg(test)]
pub(crate) use types::test_support;

/// Input format of a parse file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ParseFormat {
    /// Pick by extension: `.json` is spaCy JSON, anything else CoNLL-U.
    #[default]
    Auto,
    /// CoNLL-U.
    Conllu,
    /// spaCy `Doc.to_json()`.
    SpacyJson,
}

impl ParseFormat {
    /// Resolve `Auto` against a file path.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use obligation_miner::parse::ParseFormat;
    ///
    /// assert_eq!(ParseFormat::Auto.resolve(Path::new("a.json")), ParseFormat::SpacyJson);
    /// assert_eq!(ParseFormat::Auto.resolve(Path::new("a.conllu")), ParseFormat::Conllu);
    /// assert_eq!(ParseFormat::Conllu.resolve(Path::new("a.json")), ParseFormat::Conllu);
    /// ```
    #[must_use]
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    Self::SpacyJson
                } else {
                    Self::Conllu
                }
            }
            other => other,
        }
    }
}

/// Parse sentences from a string in a known format.
pub fn parse_sentences(source: &str, format: ParseFormat) -> Result<Vec<ParsedSentence>> {
    match format {
        ParseFormat::SpacyJson => parse_spacy_json(source),
        ParseFormat::Conllu | ParseFormat::Auto => parse_conllu(source),
    }
}

/// Read sentences from a parse file.
pub fn read_sentences(path: &Path, format: ParseFormat) -> Result<Vec<ParsedSentence>> {
    let source = std::fs::read_to_string(path).map_err(|source| MinerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let format = format.resolve(path);
    tracing::debug!(path = %path.display(), ?format, "Reading parse file");
    parse_sentences(&source, format)
}

//! Stripping of statutory cross-references and enumeration artifacts.
//!
//! Ontario statutes cite other instruments inline ("O. Reg. 191/11, s. 4.",
//! "2006, c. 17, s. 2."). Those citations and the list numbering that
//! survives HTML flattening are noise for linguistic analysis.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::Lexicon;
use crate::error::Result;

/// Citation of a regulation section/schedule or of a statute chapter.
pub const LAW_REFERENCE_PATTERN: &str = concat!(
    r"(O. ?Reg. ?[0-9]+/[0-9]+)(,?\.? ?[sS](chedule)?\.? [0-9]+)+( \([0-9]+\))?\.",
    r"|([0-9]{4},) (c. [0-9]+)(, Sched. [A-Z]+)?(, s. [0-9]+)?( \([0-9]+\))?\."
);

/// Leading enumeration: "1. ", "(2)", "(2.1)", "iv.", "(a) ".
pub const NUMBERING_PATTERN: &str =
    r"\b[0-9]{1,2}\. |\([0-9]{1,2}(\.[0-9]{1,2})?\)|\b[ivx]+\.|\([a-z]\) ";

/// Trim and replace every run of Unicode whitespace with one space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Precompiled reference and numbering stripper.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    references: Regex,
    numbering: Regex,
}

impl TextCleaner {
    /// Build a cleaner with the built-in patterns.
    pub fn new() -> Result<Self> {
        Self::with_patterns(LAW_REFERENCE_PATTERN, NUMBERING_PATTERN)
    }

    /// Build a cleaner from custom patterns.
    pub fn with_patterns(references: &str, numbering: &str) -> Result<Self> {
        Ok(Self {
            references: Regex::new(references)?,
            numbering: Regex::new(numbering)?,
        })
    }

    /// Build a cleaner honoring the pattern overrides of a lexicon.
    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self> {
        Self::with_patterns(
            lexicon
                .reference_pattern
                .as_deref()
                .unwrap_or(LAW_REFERENCE_PATTERN),
            lexicon
                .numbering_pattern
                .as_deref()
                .unwrap_or(NUMBERING_PATTERN),
        )
    }

    /// Remove every statutory citation.
    pub fn strip_references(&self, text: &str) -> String {
        self.references.replace_all(text, "").into_owned()
    }

    /// Remove every enumeration marker.
    pub fn strip_numbering(&self, text: &str) -> String {
        self.numbering.replace_all(text, "").into_owned()
    }

    /// Strip citations and numbering, collapsing whitespace on every pass.
    ///
    /// Stripping repeats until nothing matches, so removing "(2)" from
    /// "(1(2))" does not leave a fresh "(1)" behind. Markers followed by a
    /// newline, tab or non-breaking space match once collapsed to "(a) ".
    ///
    /// # Examples
    /// ```
    /// use obligation_miner::clean::TextCleaner;
    ///
    /// let cleaner = TextCleaner::new().unwrap();
    /// assert_eq!(cleaner.clean("1. (a) The tenant shall pay."), "The tenant shall pay.");
    /// ```
    pub fn clean(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();
        let mut result = collapse_whitespace(&normalized);
        loop {
            let stripped =
                collapse_whitespace(&self.strip_numbering(&self.strip_references(&result)));
            if stripped == result {
                break;
            }
            result = stripped;
        }
        result
    }
}

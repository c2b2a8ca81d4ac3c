//! Configuration constants, validation and the runtime lexicon.
//!
//! The constants are the built-in vocabulary of the miner. [`Lexicon`] bundles
//! them into one immutable value that is built once (optionally from a YAML
//! file) and passed to every function that needs it.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{MinerError, Result};

/// CSS class marking headnotes in e-Laws HTML.
pub const DEFAULT_HEADNOTE_CLASS: &str = "headnote-e";

/// Class prefixes that end the body of a headnote.
pub const SECTION_BOUNDARY_PREFIXES: [&str; 2] = ["headnote", "schedule"];

/// Lemmas that mark a sentence as carrying an obligation.
pub const OBLIGATION_LEMMAS: [&str; 5] = ["shall", "must", "ought", "oblige", "require"];

/// Dependency labels of subject-like tokens.
pub const SUBJECT_DEPS: [&str; 6] = ["nsubj", "nsubjpass", "csubj", "csubjpass", "agent", "expl"];

/// Dependency labels of object-like tokens.
pub const OBJECT_DEPS: [&str; 4] = ["dobj", "dative", "attr", "oprd"];

/// Penn Treebank tag for modal verbs.
pub const MODAL_TAG: &str = "MD";

/// Words that are frequent in statutes but carry no meaning for vocabulary counts.
pub const DOMAIN_STOPWORDS: [&str; 5] = ["mm", "section", "subsection", "schedule", "-PRON-"];

/// English stopwords (union of the scikit-learn and NLTK lists), one per line.
const ENGLISH_STOPWORDS: &str = include_str!("data/stopwords_en.txt");

/// Default number of ranks shown in a bar chart.
pub const DEFAULT_MAX_RANK: usize = 10;

/// Default number of words placed in a word cloud.
pub const DEFAULT_CLOUD_WORDS: usize = 100;

/// Chart size in pixels (width, height).
pub const CHART_SIZE: (u32, u32) = (1500, 500);

/// Text wrap width for console output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// CSS class name pattern.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CLASS_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").expect("valid regex"));

/// Validate a heading class name.
///
/// # Examples
/// ```
/// use obligation_miner::config::validate_class_name;
///
/// assert!(validate_class_name("headnote-e").is_ok());
/// assert!(validate_class_name("1heading").is_err());
/// assert!(validate_class_name("head note").is_err());
/// ```
pub fn validate_class_name(class: &str) -> Result<()> {
    if CLASS_NAME_PATTERN.is_match(class) {
        Ok(())
    } else {
        Err(MinerError::InvalidClassName(class.to_string()))
    }
}

/// Built-in English stopwords plus the domain extras.
pub fn default_stopwords() -> BTreeSet<String> {
    ENGLISH_STOPWORDS
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty() && !w.starts_with('#'))
        .chain(DOMAIN_STOPWORDS)
        .map(str::to_lowercase)
        .collect()
}

fn to_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Vocabulary driving extraction and counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Lemmas that mark an obligation.
    pub obligation_lemmas: BTreeSet<String>,

    /// Dependency labels of subject-like tokens.
    pub subject_deps: BTreeSet<String>,

    /// Dependency labels of object-like tokens.
    pub object_deps: BTreeSet<String>,

    /// Fine-grained tag of modal verbs.
    pub modal_tag: String,

    /// Lowercase stopwords ignored by vocabulary counts.
    pub stopwords: BTreeSet<String>,

    /// Citation pattern override for the text cleaner.
    pub reference_pattern: Option<String>,

    /// Numbering pattern override for the text cleaner.
    pub numbering_pattern: Option<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            obligation_lemmas: to_set(&OBLIGATION_LEMMAS),
            subject_deps: to_set(&SUBJECT_DEPS),
            object_deps: to_set(&OBJECT_DEPS),
            modal_tag: MODAL_TAG.to_string(),
            stopwords: default_stopwords(),
            reference_pattern: None,
            numbering_pattern: None,
        }
    }
}

/// On-disk shape of a lexicon file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LexiconFile {
    obligation_lemmas: Option<Vec<String>>,
    subject_deps: Option<Vec<String>>,
    object_deps: Option<Vec<String>>,
    modal_tag: Option<String>,
    default_stopwords: Option<bool>,
    extra_stopwords: Vec<String>,
    reference_pattern: Option<String>,
    numbering_pattern: Option<String>,
}

impl Lexicon {
    /// Parse a lexicon from YAML, filling omitted fields with defaults.
    ///
    /// # Examples
    /// ```
    /// use obligation_miner::config::Lexicon;
    ///
    /// let lexicon = Lexicon::from_yaml("extra_stopwords: [tenant]\nmodal_tag: VM\n").unwrap();
    /// assert!(lexicon.stopwords.contains("tenant"));
    /// assert_eq!(lexicon.modal_tag, "VM");
    /// assert!(lexicon.obligation_lemmas.contains("shall"));
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: LexiconFile = if yaml.trim().is_empty() {
            LexiconFile::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        let defaults = Self::default();

        let mut stopwords = if file.default_stopwords.unwrap_or(true) {
            defaults.stopwords
        } else {
            BTreeSet::new()
        };
        stopwords.extend(file.extra_stopwords.iter().map(|w| w.to_lowercase()));

        Ok(Self {
            obligation_lemmas: file
                .obligation_lemmas
                .map(BTreeSet::from_iter)
                .unwrap_or(defaults.obligation_lemmas),
            subject_deps: file
                .subject_deps
                .map(BTreeSet::from_iter)
                .unwrap_or(defaults.subject_deps),
            object_deps: file
                .object_deps
                .map(BTreeSet::from_iter)
                .unwrap_or(defaults.object_deps),
            modal_tag: file.modal_tag.unwrap_or(defaults.modal_tag),
            stopwords,
            reference_pattern: file.reference_pattern,
            numbering_pattern: file.numbering_pattern,
        })
    }

    /// Load a lexicon from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| MinerError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_yaml(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            stopwords = lexicon.stopwords.len(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Whether a word (any case) is a stopword.
    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }
}

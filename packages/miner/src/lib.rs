//! Obligation Miner - Find normative statements in statutory text.
//!
//! This crate extracts headnoted sections from statute HTML, finds the
//! subject, obligation verbs and object of dependency-parsed sentences, and
//! counts and charts the vocabulary of groups of documents.
//!
//! # Example
//!
//! ```
//! use obligation_miner::TextCleaner;
//!
//! let cleaner = TextCleaner::new().unwrap();
//! assert_eq!(
//!     cleaner.clean("1. (a) The tenant shall pay."),
//!     "The tenant shall pay."
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Built-in lexicon, defaults and lexicon files
//! - [`error`]: Error types and Result alias
//! - [`clean`]: Citation and numbering removal
//! - [`html`]: Headnote extraction from statute HTML
//! - [`parse`]: Dependency parse readers (CoNLL-U, spaCy JSON)
//! - [`extract`]: Subtree traversal and obligation extraction
//! - [`vocab`]: Lemma frequency tables
//! - [`plot`]: Bar charts and word clouds
//! - [`report`]: YAML / JSON report files
//! - [`cli`]: Command-line interface

pub mod clean;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod html;
pub mod parse;
pub mod plot;
pub mod report;
pub mod vocab;

pub use clean::TextCleaner;
pub use config::Lexicon;
pub use error::{MinerError, Result};
pub use extract::{ObligationExtractor, Sentence, VerbMention};
pub use html::{extract_headnotes, Headnotes};
pub use parse::{read_sentences, DependencyToken, ParseFormat, ParsedSentence};
pub use vocab::{FrequencyRow, FrequencyTable};

//! Obligation extraction from dependency-parsed sentences.

mod sentence;
mod traversal;

pub use sentence::{ObligationExtractor, Sentence, VerbMention};
pub use traversal::{breadth_first, subtree_positions};

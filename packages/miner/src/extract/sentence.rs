//! Subject / verb / object extraction for obligation sentences.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::traversal::subtree_positions;
use crate::config::Lexicon;
use crate::parse::{DependencyToken, ParsedSentence};

/// A verb carrying an obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbMention {
    /// Position in the sentence.
    pub position: usize,

    /// Surface text.
    pub text: String,

    /// Lemma.
    pub lemma: String,
}

impl From<&DependencyToken> for VerbMention {
    fn from(token: &DependencyToken) -> Self {
        Self {
            position: token.index,
            text: token.text.clone(),
            lemma: token.lemma.clone(),
        }
    }
}

/// One analyzed sentence.
///
/// `verbs` may be empty while `subj`/`obj` are not: extraction is not gated
/// on finding an obligation. Use [`Sentence::has_obligation`] to filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub sid: String,
    pub section: String,
    pub title: String,
    pub text: String,
    pub subj: String,
    pub verbs: Vec<VerbMention>,
    pub obj: String,
}

impl Sentence {
    /// Whether an obligation verb was found.
    #[must_use]
    pub fn has_obligation(&self) -> bool {
        !self.verbs.is_empty()
    }

    /// Surface text of each verb.
    pub fn verb_texts(&self) -> Vec<&str> {
        self.verbs.iter().map(|v| v.text.as_str()).collect()
    }
}

/// Builds [`Sentence`] records using a lexicon.
#[derive(Debug, Clone, Copy)]
pub struct ObligationExtractor<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ObligationExtractor<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tokens whose lemma is an obligation lemma, modals replaced by their head.
    ///
    /// "shall provide" yields "provide". Several modals sharing a head yield
    /// that head several times.
    pub fn locate_verbs<'s>(&self, sentence: &'s ParsedSentence) -> Vec<&'s DependencyToken> {
        sentence
            .tokens()
            .iter()
            .filter(|token| self.lexicon.obligation_lemmas.contains(&token.lemma))
            .map(|token| {
                if token.tag == self.lexicon.modal_tag {
                    sentence.token(token.head).unwrap_or(token)
                } else {
                    token
                }
            })
            .collect()
    }

    /// Text of the subtrees under every token whose label is in `deps`.
    ///
    /// Tokens are emitted in sentence order, joined by single spaces.
    pub fn phrase(&self, sentence: &ParsedSentence, deps: &BTreeSet<String>) -> String {
        let roots = sentence
            .tokens()
            .iter()
            .filter(|token| deps.contains(&token.dep))
            .map(|token| token.index);

        subtree_positions(sentence, roots)
            .into_iter()
            .filter_map(|position| sentence.token(position))
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Subject phrase of a sentence.
    pub fn subject(&self, sentence: &ParsedSentence) -> String {
        self.phrase(sentence, &self.lexicon.subject_deps)
    }

    /// Object phrase of a sentence.
    pub fn object(&self, sentence: &ParsedSentence) -> String {
        self.phrase(sentence, &self.lexicon.object_deps)
    }

    /// Build the record for one sentence.
    pub fn make_sentence(
        &self,
        sid: impl Into<String>,
        sentence: &ParsedSentence,
        section: impl Into<String>,
        title: impl Into<String>,
    ) -> Sentence {
        Sentence {
            sid: sid.into(),
            section: section.into(),
            title: title.into(),
            text: sentence.text().to_string(),
            subj: self.subject(sentence),
            verbs: self
                .locate_verbs(sentence)
                .into_iter()
                .map(VerbMention::from)
                .collect(),
            obj: self.object(sentence),
        }
    }
}

//! Reader for spaCy `Doc.to_json()` output.
//!
//! Offsets in that format count characters, not bytes, and heads are
//! document-wide token indices. Tokens are split per sentence and re-indexed.

use serde::Deserialize;

use super::types::{DependencyToken, ParsedSentence};
use crate::error::{MinerError, Result};

#[derive(Debug, Deserialize)]
struct SpacyDoc {
    text: String,
    #[serde(default)]
    sents: Vec<SpacySpan>,
    tokens: Vec<SpacyToken>,
}

#[derive(Debug, Deserialize)]
struct SpacySpan {
    start: usize,
    end: usize,
}

#[derive(Debug, Deserialize)]
struct SpacyToken {
    id: usize,
    start: usize,
    end: usize,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    dep: String,
    head: usize,
}

/// Slices a string by character offsets.
struct CharIndex<'a> {
    text: &'a str,
    bytes: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        bytes.push(text.len());
        Self { text, bytes }
    }

    fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        let from = *self.bytes.get(start)?;
        let to = *self.bytes.get(end)?;
        self.text.get(from..to)
    }
}

/// Parse one spaCy JSON document into sentences.
///
/// A document without `sents` is treated as a single sentence.
pub fn parse_spacy_json(source: &str) -> Result<Vec<ParsedSentence>> {
    let doc: SpacyDoc = serde_json::from_str(source)?;
    let chars = CharIndex::new(&doc.text);

    let spans = if doc.sents.is_empty() {
        vec![SpacySpan {
            start: 0,
            end: doc.text.chars().count(),
        }]
    } else {
        doc.sents
    };

    let mut sentences = Vec::with_capacity(spans.len());
    for (number, span) in spans.iter().enumerate() {
        let label = format!("sentence {}", number + 1);
        let malformed = |reason: String| MinerError::MalformedParse {
            sentence: label.clone(),
            reason,
        };

        let members: Vec<&SpacyToken> = doc
            .tokens
            .iter()
            .filter(|t| t.start >= span.start && t.start < span.end)
            .collect();
        let first = members.first().map(|t| t.id).unwrap_or_default();

        let mut tokens = Vec::with_capacity(members.len());
        for (index, token) in members.iter().enumerate() {
            let text = chars
                .slice(token.start, token.end)
                .ok_or_else(|| malformed(format!("token {} has invalid offsets", token.id)))?;
            let head = token
                .head
                .checked_sub(first)
                .filter(|h| *h < members.len())
                .ok_or_else(|| {
                    malformed(format!(
                        "token {} has head {} outside its sentence",
                        token.id, token.head
                    ))
                })?;
            tokens.push(DependencyToken {
                index,
                text: text.to_string(),
                lemma: token.lemma.clone(),
                pos: token.pos.clone(),
                tag: token.tag.clone(),
                dep: token.dep.clone(),
                head,
            });
        }

        let text = chars
            .slice(span.start, span.end)
            .ok_or_else(|| malformed("sentence has invalid offsets".to_string()))?
            .trim();
        sentences.push(ParsedSentence::new(None, text, tokens)?);
    }

    tracing::debug!(count = sentences.len(), "Parsed spaCy sentences");
    Ok(sentences)
}

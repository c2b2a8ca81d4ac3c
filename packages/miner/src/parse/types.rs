//! Dependency-parse data types.
//!
//! A sentence is an arena of tokens linked by integer head indices. Children
//! lists are derived once at construction, so traversal never needs to
//! search the arena.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MinerError, Result};

/// One token of a dependency parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyToken {
    /// Zero-based position in the sentence.
    pub index: usize,

    /// Surface text.
    pub text: String,

    /// Dictionary base form.
    pub lemma: String,

    /// Coarse part-of-speech tag (e.g., "VERB").
    pub pos: String,

    /// Fine-grained tag (e.g., "MD").
    pub tag: String,

    /// Dependency relation to the head (e.g., "nsubj").
    pub dep: String,

    /// Position of the head token; a root points to itself.
    pub head: usize,
}

impl DependencyToken {
    /// Whether the surface text consists of letters only.
    #[must_use]
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// Whether this token heads its own tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.head == self.index
    }
}

/// A dependency-parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    id: Option<String>,
    text: String,
    metadata: BTreeMap<String, String>,
    tokens: Vec<DependencyToken>,
    children: Vec<Vec<usize>>,
}

impl ParsedSentence {
    /// Build a sentence, validating the head links.
    ///
    /// Token positions must equal their index in `tokens`, every head must be
    /// in range, and following heads from any token must reach a root.
    pub fn new(
        id: Option<String>,
        text: impl Into<String>,
        tokens: Vec<DependencyToken>,
    ) -> Result<Self> {
        let text = text.into();
        let label = id.clone().unwrap_or_else(|| text.clone());
        let malformed = |reason: String| MinerError::MalformedParse {
            sentence: label.clone(),
            reason,
        };

        for (position, token) in tokens.iter().enumerate() {
            if token.index != position {
                return Err(malformed(format!(
                    "token '{}' has index {} at position {position}",
                    token.text, token.index
                )));
            }
            if token.head >= tokens.len() {
                return Err(malformed(format!(
                    "token '{}' has head {} outside the sentence",
                    token.text, token.head
                )));
            }
        }

        for token in &tokens {
            let mut current = token.index;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > tokens.len() {
                    return Err(malformed(format!(
                        "token '{}' is part of a head cycle",
                        token.text
                    )));
                }
            }
        }

        let mut children = vec![Vec::new(); tokens.len()];
        for token in &tokens {
            if !token.is_root() {
                children[token.head].push(token.index);
            }
        }

        Ok(Self {
            id,
            text,
            metadata: BTreeMap::new(),
            tokens,
            children,
        })
    }

    /// Attach free-form metadata (e.g., `section`, `title`).
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sentence identifier from the source, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sentence text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Metadata value for `key`.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// All tokens in sentence order.
    pub fn tokens(&self) -> &[DependencyToken] {
        &self.tokens
    }

    /// Token at `index`.
    pub fn token(&self, index: usize) -> Option<&DependencyToken> {
        self.tokens.get(index)
    }

    /// Positions of the direct children of `index`, in sentence order.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a sentence from `(text, lemma, tag, dep, head)` rows.
    pub(crate) fn sentence(rows: &[(&str, &str, &str, &str, usize)]) -> ParsedSentence {
        let tokens = rows
            .iter()
            .enumerate()
            .map(|(index, (text, lemma, tag, dep, head))| DependencyToken {
                index,
                text: (*text).to_string(),
                lemma: (*lemma).to_string(),
                pos: String::new(),
                tag: (*tag).to_string(),
                dep: (*dep).to_string(),
                head: *head,
            })
            .collect();
        let text = rows.iter().map(|r| r.0).collect::<Vec<_>>().join(" ");
        ParsedSentence::new(None, text, tokens).unwrap()
    }

    /// "The licensee shall provide records ."
    pub(crate) fn licensee_sentence() -> ParsedSentence {
        sentence(&[
            ("The", "the", "DT", "det", 1),
            ("licensee", "licensee", "NN", "nsubj", 3),
            ("shall", "shall", "MD", "aux", 3),
            ("provide", "provide", "VB", "ROOT", 3),
            ("records", "record", "NNS", "dobj", 3),
            (".", ".", ".", "punct", 3),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_children_follow_heads() {
        let s = licensee_sentence();
        assert_eq!(s.children(3), &[1, 2, 4, 5]);
        assert_eq!(s.children(1), &[0]);
        assert!(s.children(0).is_empty());
        assert!(s.children(99).is_empty());
    }

    #[test]
    fn test_root_is_self_headed() {
        let s = licensee_sentence();
        assert!(s.token(3).unwrap().is_root());
        assert!(!s.token(2).unwrap().is_root());
    }

    #[test]
    fn test_is_alpha() {
        let s = licensee_sentence();
        assert!(s.token(1).unwrap().is_alpha());
        assert!(!s.token(5).unwrap().is_alpha());
    }

    fn token(index: usize, head: usize) -> DependencyToken {
        DependencyToken {
            index,
            text: format!("t{index}"),
            lemma: String::new(),
            pos: String::new(),
            tag: String::new(),
            dep: String::new(),
            head,
        }
    }

    #[test]
    fn test_rejects_head_out_of_range() {
        let err = ParsedSentence::new(Some("s1".into()), "t0", vec![token(0, 4)]).unwrap_err();
        assert!(err.to_string().contains("outside the sentence"));
    }

    #[test]
    fn test_rejects_cycle() {
        let err = ParsedSentence::new(None, "t0 t1 t2", vec![token(0, 1), token(1, 0), token(2, 2)])
            .unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_rejects_misnumbered_tokens() {
        assert!(ParsedSentence::new(None, "t1", vec![token(1, 1)]).is_err());
    }

    #[test]
    fn test_empty_sentence_is_valid() {
        let s = ParsedSentence::new(None, "", Vec::new()).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_metadata() {
        let mut meta = BTreeMap::new();
        meta.insert("section".to_string(), "12".to_string());
        let s = licensee_sentence().with_metadata(meta);
        assert_eq!(s.metadata("section"), Some("12"));
        assert_eq!(s.metadata("title"), None);
    }
}

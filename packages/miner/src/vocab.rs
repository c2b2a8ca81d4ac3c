//! Vocabulary counting over parsed sentences.
//!
//! Produces `{word, count, rank, label}` rows, one label per document group,
//! which feed the charts in [`crate::plot`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::Lexicon;
use crate::parse::ParsedSentence;

/// Lowercase lemmas of the alphabetic, non-stopword tokens of a sentence.
pub fn lemma_tokens(sentence: &ParsedSentence, lexicon: &Lexicon) -> Vec<String> {
    sentence
        .tokens()
        .iter()
        .filter(|token| token.is_alpha())
        .map(|token| token.lemma.to_lowercase())
        .filter(|lemma| !lemma.is_empty() && !lexicon.stopwords.contains(lemma))
        .collect()
}

/// One word of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub word: String,
    pub count: usize,
    /// 1-based rank within the label; ties ordered alphabetically.
    pub rank: usize,
    pub label: String,
}

/// Word counts for one or more labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Rank counted words for one label.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use obligation_miner::vocab::FrequencyTable;
    ///
    /// let counts = BTreeMap::from([("rent".to_string(), 3), ("notice".to_string(), 5)]);
    /// let table = FrequencyTable::from_counts("RTA", counts);
    /// let top = table.top_ranked("RTA", 1);
    /// assert_eq!(top[0].word, "notice");
    /// ```
    pub fn from_counts(label: &str, counts: BTreeMap<String, usize>) -> Self {
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // BTreeMap order is alphabetical; a stable sort keeps it for ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let rows = ranked
            .into_iter()
            .enumerate()
            .map(|(i, (word, count))| FrequencyRow {
                word,
                count,
                rank: i + 1,
                label: label.to_string(),
            })
            .collect();
        Self { rows }
    }

    /// Count the lemma tokens of a group of sentences.
    pub fn from_sentences<'a>(
        label: &str,
        sentences: impl IntoIterator<Item = &'a ParsedSentence>,
        lexicon: &Lexicon,
    ) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for sentence in sentences {
            for lemma in lemma_tokens(sentence, lexicon) {
                *counts.entry(lemma).or_default() += 1;
            }
        }
        let table = Self::from_counts(label, counts);
        tracing::debug!(label, words = table.rows.len(), "Counted vocabulary");
        table
    }

    /// Append the rows of another table, replacing any label it shares.
    pub fn extend(&mut self, other: FrequencyTable) {
        let incoming: BTreeSet<&str> = other.rows.iter().map(|r| r.label.as_str()).collect();
        self.rows.retain(|r| !incoming.contains(r.label.as_str()));
        self.rows.extend(other.rows);
    }

    /// All rows.
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Distinct labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.label.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows of `label` with rank at most `max_rank`, in rank order.
    pub fn top_ranked(&self, label: &str, max_rank: usize) -> Vec<&FrequencyRow> {
        let mut rows: Vec<&FrequencyRow> = self
            .rows
            .iter()
            .filter(|r| r.label == label && r.rank <= max_rank)
            .collect();
        rows.sort_by_key(|r| r.rank);
        rows
    }

    /// The `limit` most frequent words of `label`.
    pub fn top_by_count(&self, label: &str, limit: usize) -> Vec<&FrequencyRow> {
        let mut rows: Vec<&FrequencyRow> = self.rows.iter().filter(|r| r.label == label).collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        rows.truncate(limit);
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::test_support::{licensee_sentence, sentence};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lemma_tokens_filters_stopwords_and_punctuation() {
        let lexicon = Lexicon::default();
        assert_eq!(
            lemma_tokens(&licensee_sentence(), &lexicon),
            vec!["licensee", "shall", "provide", "record"]
        );
    }

    #[test]
    fn test_lemma_tokens_drops_domain_stopwords() {
        let lexicon = Lexicon::default();
        let s = sentence(&[
            ("Section", "Section", "NN", "nsubj", 1),
            ("applies", "apply", "VBZ", "ROOT", 1),
            ("2", "2", "CD", "dobj", 1),
        ]);
        assert_eq!(lemma_tokens(&s, &lexicon), vec!["apply"]);
    }

    fn table() -> FrequencyTable {
        let counts = BTreeMap::from([
            ("rent".to_string(), 4),
            ("notice".to_string(), 4),
            ("landlord".to_string(), 7),
            ("tenant".to_string(), 1),
        ]);
        FrequencyTable::from_counts("RTA", counts)
    }

    #[test]
    fn test_ranks_are_dense_and_tie_broken_alphabetically() {
        let t = table();
        let ranked: Vec<(&str, usize)> = t
            .top_ranked("RTA", 10)
            .into_iter()
            .map(|r| (r.word.as_str(), r.rank))
            .collect();
        assert_eq!(
            ranked,
            vec![("landlord", 1), ("notice", 2), ("rent", 3), ("tenant", 4)]
        );
    }

    #[test]
    fn test_top_ranked_limits_rank() {
        assert_eq!(table().top_ranked("RTA", 2).len(), 2);
        assert!(table().top_ranked("other", 2).is_empty());
    }

    #[test]
    fn test_top_by_count() {
        let t = table();
        let words: Vec<&str> = t.top_by_count("RTA", 3).iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["landlord", "notice", "rent"]);
    }

    #[test]
    fn test_from_sentences_counts_across_sentences() {
        let lexicon = Lexicon::default();
        let sentences = [licensee_sentence(), licensee_sentence()];
        let t = FrequencyTable::from_sentences("Licences", &sentences, &lexicon);
        assert_eq!(t.rows().len(), 4);
        assert!(t.rows().iter().all(|r| r.count == 2));
        assert_eq!(t.labels(), vec!["Licences"]);
    }

    #[test]
    fn test_extend_replaces_same_label() {
        let mut t = table();
        t.extend(FrequencyTable::from_counts(
            "Other",
            BTreeMap::from([("fee".to_string(), 2)]),
        ));
        t.extend(FrequencyTable::from_counts(
            "RTA",
            BTreeMap::from([("rent".to_string(), 1)]),
        ));
        assert_eq!(t.labels(), vec!["Other", "RTA"]);
        assert_eq!(t.rows().len(), 2);
    }
}

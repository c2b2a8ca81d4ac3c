//! Subtree collection over a sentence arena.

use std::collections::{BTreeSet, VecDeque};

use crate::parse::ParsedSentence;

/// Positions of the subtree rooted at `root`, in breadth-first order.
///
/// Children are enqueued in sentence order. An out-of-range root yields an
/// empty result.
pub fn breadth_first(sentence: &ParsedSentence, root: usize) -> Vec<usize> {
    if root >= sentence.len() {
        return Vec::new();
    }

    let mut visited = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        visited.push(current);
        queue.extend(sentence.children(current).iter().copied());
    }
    visited
}

/// Union of the subtrees rooted at `roots`, ordered by sentence position.
///
/// A token reachable from several roots appears once.
pub fn subtree_positions(
    sentence: &ParsedSentence,
    roots: impl IntoIterator<Item = usize>,
) -> BTreeSet<usize> {
    roots
        .into_iter()
        .flat_map(|root| breadth_first(sentence, root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::test_support::{licensee_sentence, sentence};

    #[test]
    fn test_breadth_first_order() {
        // provide -> [licensee, shall, records, .], licensee -> [The]
        let s = licensee_sentence();
        assert_eq!(breadth_first(&s, 3), vec![3, 1, 2, 4, 5, 0]);
    }

    #[test]
    fn test_leaf_subtree() {
        let s = licensee_sentence();
        assert_eq!(breadth_first(&s, 0), vec![0]);
    }

    #[test]
    fn test_out_of_range_root() {
        let s = licensee_sentence();
        assert!(breadth_first(&s, 42).is_empty());
    }

    #[test]
    fn test_visits_every_token_once() {
        // Chain, fan-out and mixed shapes
        let shapes: Vec<Vec<usize>> = vec![
            vec![0, 0, 1, 2, 3, 4],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![2, 2, 2, 2, 3, 3, 5, 5],
            vec![3, 0, 1, 3],
        ];
        for heads in shapes {
            let rows: Vec<(&str, &str, &str, &str, usize)> =
                heads.iter().map(|h| ("w", "w", "NN", "dep", *h)).collect();
            let s = sentence(&rows);
            let root = heads
                .iter()
                .enumerate()
                .find(|(i, h)| *i == **h)
                .map(|(i, _)| i)
                .unwrap();

            let mut visited = breadth_first(&s, root);
            assert_eq!(visited.len(), s.len(), "heads: {heads:?}");
            visited.sort_unstable();
            visited.dedup();
            assert_eq!(visited.len(), s.len(), "heads: {heads:?}");
        }
    }

    #[test]
    fn test_subtree_positions_deduplicates_overlap() {
        let s = licensee_sentence();
        let positions: Vec<usize> = subtree_positions(&s, [1, 3]).into_iter().collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4, 5]);
    }
}

// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Greedy injective matching of scored candidate pairs.
//!
//! This is a deliberate approximation of optimal bipartite matching: at the
//! scale of a few thousand candidate files per run, a sort plus a single
//! greedy walk is fast, simple, and good enough. An exact maximum-weight
//! matcher could replace [`match_pairs`] behind the same contract without
//! touching the scorer or the generator.

use crate::candidates::CandidatePair;
use crate::score::MIN_SCORE;
use crate::snapshot::FileKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The engine's output: an injective mapping from removed-file keys to
/// added-file keys.
///
/// Files with no accepted match are simply absent; the caller treats them as
/// genuine deletions and additions. Iteration order is removed-key order, so
/// serialized output is byte-identical across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveMap(BTreeMap<FileKey, FileKey>);

impl MoveMap {
    /// Creates an empty move map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the added-file key a removed file was matched to, if any.
    #[must_use]
    pub fn get(&self, removed_key: &str) -> Option<&FileKey> {
        self.0.get(removed_key)
    }

    /// Returns true if the removed-file key has an accepted match.
    #[must_use]
    pub fn contains_removed(&self, removed_key: &str) -> bool {
        self.0.contains_key(removed_key)
    }

    /// Returns true if the added-file key was consumed by an accepted match.
    #[must_use]
    pub fn contains_added(&self, added_key: &str) -> bool {
        self.0.values().any(|v| v == added_key)
    }

    /// Number of accepted moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no move was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over (removed-key, added-key) entries in removed-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileKey, &FileKey)> {
        self.0.iter()
    }
}

impl From<MoveMap> for BTreeMap<FileKey, FileKey> {
    fn from(map: MoveMap) -> Self {
        map.0
    }
}

impl<'a> IntoIterator for &'a MoveMap {
    type Item = (&'a FileKey, &'a FileKey);
    type IntoIter = std::collections::btree_map::Iter<'a, FileKey, FileKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolves scored candidate pairs into an injective move map.
///
/// Pairs scoring below `min_score` are discarded outright, as are pairs at
/// the score floor: a floor score means "not a plausible move", so files
/// with no shared content never match even at a threshold of zero. The rest
/// are sorted by score descending, ties broken by removed key then added key
/// ascending, and walked once: a pair is accepted only if neither side was
/// consumed by an earlier pair. The result is injective by construction and
/// reproducible regardless of the input pair order.
///
/// Duplicate keys within one snapshot side violate the caller contract and
/// void the injectivity guarantee; the matcher does not check for them.
#[must_use]
pub fn match_pairs(pairs: &[CandidatePair<'_>], min_score: u32) -> MoveMap {
    let mut eligible: Vec<&CandidatePair<'_>> = pairs
        .iter()
        .filter(|p| p.score > MIN_SCORE && p.score >= min_score)
        .collect();

    eligible.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.removed.key.cmp(&b.removed.key))
            .then_with(|| a.added.key.cmp(&b.added.key))
    });

    let mut moves = BTreeMap::new();
    let mut consumed_removed: HashSet<&str> = HashSet::new();
    let mut consumed_added: HashSet<&str> = HashSet::new();

    for pair in eligible {
        if consumed_removed.contains(pair.removed.key.as_str())
            || consumed_added.contains(pair.added.key.as_str())
        {
            continue;
        }
        consumed_removed.insert(&pair.removed.key);
        consumed_added.insert(&pair.added.key);
        moves.insert(pair.removed.key.clone(), pair.added.key.clone());
    }

    MoveMap(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_lines;
    use crate::snapshot::LineHashSequence;

    fn seq(key: &str) -> LineHashSequence {
        LineHashSequence::hashed(key, hash_lines("one\ntwo\nthree"))
    }

    fn pair<'a>(
        removed: &'a LineHashSequence,
        added: &'a LineHashSequence,
        score: u32,
    ) -> CandidatePair<'a> {
        CandidatePair {
            removed,
            added,
            score,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let map = match_pairs(&[], 75);
        assert!(map.is_empty());
    }

    #[test]
    fn test_below_threshold_discarded() {
        let r = seq("r");
        let a = seq("a");
        let map = match_pairs(&[pair(&r, &a, 74)], 75);
        assert!(map.is_empty());

        let map = match_pairs(&[pair(&r, &a, 75)], 75);
        assert_eq!(map.get("r"), Some(&"a".to_string()));
    }

    #[test]
    fn test_floor_score_rejected_even_at_zero_threshold() {
        let r = seq("r");
        let a = seq("a");
        let map = match_pairs(&[pair(&r, &a, crate::score::MIN_SCORE)], 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_higher_score_wins_contention() {
        let r1 = seq("r1");
        let r2 = seq("r2");
        let a = seq("a");
        let pairs = [pair(&r1, &a, 80), pair(&r2, &a, 95)];
        let map = match_pairs(&pairs, 75);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("r2"), Some(&"a".to_string()));
        assert!(!map.contains_removed("r1"));
    }

    #[test]
    fn test_tie_broken_by_removed_key() {
        let rx = seq("x");
        let rz = seq("z");
        let a = seq("y");
        // Equal scores: "x" sorts before "z" and takes the match.
        let pairs = [pair(&rz, &a, 100), pair(&rx, &a, 100)];
        let map = match_pairs(&pairs, 75);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x"), Some(&"y".to_string()));
    }

    #[test]
    fn test_tie_broken_by_added_key() {
        let r = seq("r");
        let a1 = seq("a1");
        let a2 = seq("a2");
        let pairs = [pair(&r, &a2, 100), pair(&r, &a1, 100)];
        let map = match_pairs(&pairs, 75);
        assert_eq!(map.get("r"), Some(&"a1".to_string()));
    }

    #[test]
    fn test_injective_on_both_sides() {
        let r1 = seq("r1");
        let r2 = seq("r2");
        let a1 = seq("a1");
        let a2 = seq("a2");
        let pairs = [
            pair(&r1, &a1, 90),
            pair(&r1, &a2, 85),
            pair(&r2, &a1, 85),
            pair(&r2, &a2, 80),
        ];
        let map = match_pairs(&pairs, 75);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("r1"), Some(&"a1".to_string()));
        assert_eq!(map.get("r2"), Some(&"a2".to_string()));
    }

    #[test]
    fn test_result_independent_of_pair_order() {
        let r1 = seq("r1");
        let r2 = seq("r2");
        let a1 = seq("a1");
        let a2 = seq("a2");
        let forward = [pair(&r1, &a1, 90), pair(&r2, &a2, 90)];
        let backward = [pair(&r2, &a2, 90), pair(&r1, &a1, 90)];
        assert_eq!(match_pairs(&forward, 75), match_pairs(&backward, 75));
    }

    #[test]
    fn test_move_map_accessors() {
        let r = seq("old/a.rs");
        let a = seq("new/a.rs");
        let map = match_pairs(&[pair(&r, &a, 100)], 75);
        assert!(map.contains_removed("old/a.rs"));
        assert!(map.contains_added("new/a.rs"));
        assert!(!map.contains_added("new/b.rs"));
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_serialized_output_deterministic() {
        let r1 = seq("b/old");
        let r2 = seq("a/old");
        let a1 = seq("b/new");
        let a2 = seq("a/new");
        let map = match_pairs(&[pair(&r1, &a1, 90), pair(&r2, &a2, 90)], 75);
        let json = serde_json::to_string(&map).unwrap();
        // BTreeMap ordering puts "a/old" first regardless of insertion order.
        assert!(json.find("a/old").unwrap() < json.find("b/old").unwrap());
    }
}

// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Pairwise content similarity scoring.
//!
//! The scorer is a pure function over two immutable [`LineHashSequence`]
//! values and carries no policy: acceptance thresholds and tie-breaking live
//! in the matcher so the score itself stays reusable and independently
//! testable.

use crate::hash::LineHash;
use crate::snapshot::LineHashSequence;
use std::collections::HashMap;

/// Maximum similarity score; identical files score exactly this.
pub const MAX_SCORE: u32 = 100;

/// Minimum similarity score, meaning "not a plausible move".
pub const MIN_SCORE: u32 = 0;

/// Computes the similarity score between two files, in `0..=MAX_SCORE`.
///
/// Symmetric and deterministic. Unhashable content on either side scores
/// [`MIN_SCORE`], as does an empty file paired with anything, including
/// another empty file: with no lines to compare, similarity is undefined and
/// treated as "no move" rather than guessed.
///
/// The score is the Sørensen-Dice coefficient over the two line-hash
/// multisets, as a percentage: a hash occurring `m` times in one file and
/// `n` times in the other contributes `min(m, n)` shared lines, and the
/// shared count is normalized against the combined length. Reordered lines
/// still count as shared, while a large length disparity caps the achievable
/// score even at full overlap of the shorter file, so a tiny file contained
/// in a huge one does not register as a move.
#[must_use]
pub fn similarity(a: &LineHashSequence, b: &LineHashSequence) -> u32 {
    let (Some(hashes_a), Some(hashes_b)) = (a.hashes(), b.hashes()) else {
        return MIN_SCORE;
    };
    if hashes_a.is_empty() || hashes_b.is_empty() {
        return MIN_SCORE;
    }

    let shared = multiset_intersection(hashes_a, hashes_b);
    let combined = (hashes_a.len() + hashes_b.len()) as u64;

    // 2 * shared <= combined, so the result never exceeds MAX_SCORE.
    (2 * shared as u64 * u64::from(MAX_SCORE) / combined) as u32
}

/// Counts line hashes shared between the two sequences, with multiplicity.
fn multiset_intersection(a: &[LineHash], b: &[LineHash]) -> usize {
    // Count the shorter side, then drain it while walking the longer one.
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut counts: HashMap<LineHash, usize> = HashMap::with_capacity(shorter.len());
    for hash in shorter {
        *counts.entry(*hash).or_insert(0) += 1;
    }

    let mut shared = 0;
    for hash in longer {
        if let Some(remaining) = counts.get_mut(hash) {
            if *remaining > 0 {
                *remaining -= 1;
                shared += 1;
            }
        }
    }
    shared
}

// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Candidate pair generation with cheap pruning.
//!
//! Scoring every removed/added combination is quadratic, and most pairs are
//! obviously unrelated. The generator applies an O(1) length-ratio filter to
//! the full cross product first, then scores only the survivors. Scoring is
//! a pure per-pair computation, so it fans out across the rayon thread pool.

use crate::score::similarity;
use crate::snapshot::LineHashSequence;
use rayon::prelude::*;
use tracing::debug;

/// A removed/added file combination that survived pruning, with its score.
///
/// Holds non-owning references into the caller's snapshots; created by
/// [`candidate_pairs`] and consumed by the matcher within a single detection
/// run.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    /// The file present only in the previous snapshot.
    pub removed: &'a LineHashSequence,

    /// The file present only in the current snapshot.
    pub added: &'a LineHashSequence,

    /// Cached similarity score for the pair.
    pub score: u32,
}

/// Produces the scored candidate pairs worth considering for move matching.
///
/// A pair survives pruning only if both sides have hashed, non-empty content
/// and their line counts are within `min_length_ratio` of each other
/// (`shorter / longer >= min_length_ratio`). Pruned pairs could never carry
/// a plausible move; unhashable and empty files never match anything.
///
/// The output order is the deterministic generation order (removed iteration
/// order, then added). Downstream code relies on it only for reproducible
/// tie-breaking, never for correctness.
pub fn candidate_pairs<'a>(
    removed: &'a [LineHashSequence],
    added: &'a [LineHashSequence],
    min_length_ratio: f64,
) -> Vec<CandidatePair<'a>> {
    let mut unscored = Vec::new();
    for r in removed {
        let Some(r_len) = r.line_count() else { continue };
        if r_len == 0 {
            continue;
        }
        for a in added {
            let Some(a_len) = a.line_count() else { continue };
            if a_len == 0 {
                continue;
            }
            if length_ratio(r_len, a_len) >= min_length_ratio {
                unscored.push((r, a));
            }
        }
    }

    debug!(
        "Pruned {}x{} cross product to {} candidate pairs",
        removed.len(),
        added.len(),
        unscored.len()
    );

    // Pure per-pair work over immutable inputs; collect preserves order.
    unscored
        .into_par_iter()
        .map(|(r, a)| CandidatePair {
            removed: r,
            added: a,
            score: similarity(r, a),
        })
        .collect()
}

/// Ratio of the shorter to the longer line count, in `0.0..=1.0`.
fn length_ratio(len_a: usize, len_b: usize) -> f64 {
    let shorter = len_a.min(len_b) as f64;
    let longer = len_a.max(len_b) as f64;
    shorter / longer
}

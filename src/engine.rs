// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! The move detection engine façade.
//!
//! Wires candidate generation, scoring, and matching into a single call:
//! two snapshots in, a [`MoveMap`] out. The engine holds no state between
//! calls beyond its validated policy configuration and performs no I/O; the
//! caller owns persistence, file-count ceilings, and everything else around
//! the computation.

use crate::candidates::candidate_pairs;
use crate::error::{Result, RetraceError};
use crate::matcher::{match_pairs, MoveMap};
use crate::score::MAX_SCORE;
use crate::snapshot::LineHashSequence;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tunable policy values for one detection run.
///
/// Both thresholds are policy, not algorithm: they can be adjusted without
/// touching the scorer or the matcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    /// Minimum similarity score a pair must reach to be accepted as a move.
    pub min_score: u32,

    /// Minimum shorter/longer line-count ratio for a pair to be scored at
    /// all. Pairs below it are pruned before scoring.
    pub min_length_ratio: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_score: 75,
            min_length_ratio: 0.5,
        }
    }
}

impl DetectionConfig {
    /// Validates the policy values.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_score` exceeds the scorer's maximum or
    /// `min_length_ratio` is outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        if self.min_score > MAX_SCORE {
            return Err(RetraceError::invalid_config(format!(
                "min_score must be within 0..={MAX_SCORE}, got {}",
                self.min_score
            )));
        }
        if !(0.0..=1.0).contains(&self.min_length_ratio) || self.min_length_ratio.is_nan() {
            return Err(RetraceError::invalid_config(format!(
                "min_length_ratio must be within 0.0..=1.0, got {}",
                self.min_length_ratio
            )));
        }
        Ok(())
    }
}

/// Detects file moves between two analysis snapshots.
pub struct MoveDetector {
    config: DetectionConfig,
}

impl MoveDetector {
    /// Creates a detector with the given policy configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the detector's configuration.
    #[must_use]
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Matches removed files against added files and returns the move map.
    ///
    /// `removed` holds the files present only in the previous snapshot and
    /// `added` the files present only in the current one. Keys must be
    /// unique within each side; duplicates void the injectivity guarantee
    /// and are not checked here.
    ///
    /// Deterministic for fixed inputs: repeated calls produce identical
    /// maps regardless of the order the slices were assembled in.
    #[must_use]
    pub fn detect(&self, removed: &[LineHashSequence], added: &[LineHashSequence]) -> MoveMap {
        if removed.is_empty() || added.is_empty() {
            debug!("One snapshot side is empty, skipping move detection");
            return MoveMap::new();
        }

        let pairs = candidate_pairs(removed, added, self.config.min_length_ratio);
        let moves = match_pairs(&pairs, self.config.min_score);

        info!(
            "Move detection: {} removed, {} added, {} candidates, {} moves accepted",
            removed.len(),
            added.len(),
            pairs.len(),
            moves.len()
        );
        moves
    }
}

/// One-shot convenience wrapper around [`MoveDetector`].
///
/// # Errors
///
/// Returns an error if the configuration fails validation.
pub fn detect_moves(
    removed: &[LineHashSequence],
    added: &[LineHashSequence],
    config: &DetectionConfig,
) -> Result<MoveMap> {
    Ok(MoveDetector::new(*config)?.detect(removed, added))
}

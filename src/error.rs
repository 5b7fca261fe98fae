// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Error handling for retrace.
//!
//! The move detection engine itself is total: every well-formed input,
//! including empty snapshots and all-unhashable files, produces a valid
//! (possibly empty) move map. Errors exist only at the crate's edges, for
//! configuration validation and hash string parsing.

use thiserror::Error;

/// Result type alias for retrace operations.
pub type Result<T> = std::result::Result<T, RetraceError>;

/// Error type for retrace operations.
#[derive(Error, Debug)]
pub enum RetraceError {
    /// A detection policy value was outside its legal range.
    #[error("Invalid detection config: {reason}")]
    InvalidConfig {
        /// The reason the configuration was rejected.
        reason: String,
    },

    /// A line hash could not be parsed from its textual form.
    #[error("Hash parse error: {reason}")]
    HashParse {
        /// The reason the hash string was rejected.
        reason: String,
    },
}

impl RetraceError {
    /// Creates a new invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a new hash parse error.
    pub fn hash_parse(reason: impl Into<String>) -> Self {
        Self::HashParse {
            reason: reason.into(),
        }
    }
}

// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Line hashing utilities built on Blake3.
//!
//! The engine compares files by their per-line content digests rather than
//! raw text. This module provides the `LineHash` digest type and helpers to
//! derive per-line hashes from source text, for callers that do not already
//! have a hashing step in their scanning pipeline.

use crate::error::{Result, RetraceError};
use blake3::Hash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Blake3 digest of one source line's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineHash([u8; 32]);

impl LineHash {
    /// Creates a new `LineHash` from a 32-byte array.
    #[must_use]
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the hash as a byte array.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the hash as a hexadecimal string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hexadecimal string into a `LineHash`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hexadecimal or not 64 characters long.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != 64 {
            return Err(RetraceError::hash_parse(
                "hash hex string must be exactly 64 characters",
            ));
        }

        let bytes = hex::decode(hex_str)
            .map_err(|e| RetraceError::hash_parse(format!("invalid hex string: {e}")))?;

        let mut hash_bytes = [0u8; 32];
        hash_bytes.copy_from_slice(&bytes);
        Ok(Self::new(hash_bytes))
    }
}

impl fmt::Display for LineHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Hash> for LineHash {
    fn from(hash: Hash) -> Self {
        Self(*hash.as_bytes())
    }
}

/// Computes the line hash of a single source line.
///
/// Trailing line terminators are the caller's responsibility; pass the line
/// content without them so the digest is independent of EOL convention.
#[must_use]
pub fn hash_line(line: &str) -> LineHash {
    blake3::hash(line.as_bytes()).into()
}

/// Computes per-line hashes for a whole source text, in file order.
///
/// Splits on line terminators the way [`str::lines`] does, so CRLF and LF
/// sources with identical content produce identical hash sequences. An empty
/// text yields an empty sequence.
#[must_use]
pub fn hash_lines(source: &str) -> Vec<LineHash> {
    source.lines().map(hash_line).collect()
}

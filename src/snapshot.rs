// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Snapshot data entities consumed by the move detection engine.
//!
//! The scanning pipeline hands the engine one [`LineHashSequence`] per file
//! and per snapshot side. Files whose content could not be hashed (binary,
//! unreadable) carry an explicit [`LineHashes::Unhashable`] marker instead of
//! a missing value, so the "not comparable" state is visible in the type.

use crate::hash::LineHash;
use serde::{Deserialize, Serialize};

/// Unique identifier of a file within one snapshot, typically its path.
pub type FileKey = String;

/// Per-line content hashes for one file, or the marker that none exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "hashes")]
pub enum LineHashes {
    /// Ordered per-line hashes, one per source line, in file order.
    #[serde(rename = "hashed")]
    Hashed(Vec<LineHash>),

    /// The file's content could not be hashed. Such a file never matches
    /// anything and is always treated as a pure add or delete.
    #[serde(rename = "unhashable")]
    Unhashable,
}

/// One file's identity and line-hash content within a snapshot.
///
/// Immutable once constructed; the engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineHashSequence {
    /// Unique key of the file within its snapshot.
    pub key: FileKey,

    /// The file's per-line hashes, or the unhashable marker.
    pub line_hashes: LineHashes,
}

impl LineHashSequence {
    /// Creates a sequence for a file with hashed content.
    #[must_use]
    pub fn hashed(key: impl Into<FileKey>, hashes: Vec<LineHash>) -> Self {
        Self {
            key: key.into(),
            line_hashes: LineHashes::Hashed(hashes),
        }
    }

    /// Creates a sequence for a file whose content could not be hashed.
    #[must_use]
    pub fn unhashable(key: impl Into<FileKey>) -> Self {
        Self {
            key: key.into(),
            line_hashes: LineHashes::Unhashable,
        }
    }

    /// Returns the per-line hashes, or `None` for an unhashable file.
    #[must_use]
    pub fn hashes(&self) -> Option<&[LineHash]> {
        match &self.line_hashes {
            LineHashes::Hashed(hashes) => Some(hashes.as_slice()),
            LineHashes::Unhashable => None,
        }
    }

    /// Returns the file's line count, or `None` for an unhashable file.
    #[must_use]
    pub fn line_count(&self) -> Option<usize> {
        self.hashes().map(<[LineHash]>::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_lines;

    #[test]
    fn test_hashed_sequence_accessors() {
        let seq = LineHashSequence::hashed("src/lib.rs", hash_lines("a\nb\nc"));
        assert_eq!(seq.key, "src/lib.rs");
        assert_eq!(seq.line_count(), Some(3));
        assert_eq!(seq.hashes().unwrap().len(), 3);
    }

    #[test]
    fn test_unhashable_sequence() {
        let seq = LineHashSequence::unhashable("assets/logo.png");
        assert_eq!(seq.hashes(), None);
        assert_eq!(seq.line_count(), None);
    }

    #[test]
    fn test_empty_file_is_hashed_with_zero_lines() {
        let seq = LineHashSequence::hashed("empty.txt", Vec::new());
        assert_eq!(seq.line_count(), Some(0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let seq = LineHashSequence::hashed("a.rs", hash_lines("x"));
        let json = serde_json::to_string(&seq).unwrap();
        let back: LineHashSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(seq, back);

        let unhashable = LineHashSequence::unhashable("b.bin");
        let json = serde_json::to_string(&unhashable).unwrap();
        assert!(json.contains("unhashable"));
        let back: LineHashSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(unhashable, back);
    }
}

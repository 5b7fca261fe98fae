// Copyright (c) 2025 The retrace authors
// Licensed under the MIT License

//! Retrace - file move detection for incremental code analysis.
//!
//! When a codebase is re-analyzed, renamed or moved files would naively show
//! up as a delete plus an add, losing the history attached to the old path.
//! This crate matches removed files against added files across two analysis
//! snapshots by line-hash content similarity, producing an injective,
//! deterministic move map the surrounding pipeline can use to migrate
//! accumulated per-file state.
//!
//! The engine consumes only ordered per-line content hashes; it does not
//! read files, touch a database, or know what history the caller keeps.
//!
//! ```
//! use retrace::{detect_moves, hash_lines, DetectionConfig, LineHashSequence};
//!
//! let removed = vec![LineHashSequence::hashed("old/a.rs", hash_lines("fn a() {}\nfn b() {}"))];
//! let added = vec![LineHashSequence::hashed("new/a.rs", hash_lines("fn a() {}\nfn b() {}"))];
//!
//! let moves = detect_moves(&removed, &added, &DetectionConfig::default()).unwrap();
//! assert_eq!(moves.get("old/a.rs"), Some(&"new/a.rs".to_string()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod candidates;
pub mod engine;
pub mod error;
pub mod hash;
pub mod matcher;
pub mod score;
pub mod snapshot;

// Re-export commonly used types
pub use candidates::{candidate_pairs, CandidatePair};
pub use engine::{detect_moves, DetectionConfig, MoveDetector};
pub use error::{Result, RetraceError};
pub use hash::{hash_line, hash_lines, LineHash};
pub use matcher::{match_pairs, MoveMap};
pub use score::{similarity, MAX_SCORE, MIN_SCORE};
pub use snapshot::{FileKey, LineHashSequence, LineHashes};

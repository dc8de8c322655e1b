//! Errors surfaced by the core.
//!
//! Collision-rejected commands and spawn collisions are not errors: the first
//! leaves state unchanged, the second ends the session normally.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A single commit cleared more rows than the score table covers.
    ///
    /// One piece spans at most four rows, so this means the board held full
    /// rows before the commit.
    #[error("no score defined for clearing {lines} rows in one commit")]
    UnscoredLineClear { lines: usize },
}

//! Scoring module - fixed line-clear table
//!
//! | Rows cleared | Points |
//! |--------------|--------|
//! | 0 | 0 |
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |

use crate::error::CoreError;
use crate::types::LINE_SCORES;

/// Points awarded for clearing `lines` rows in one commit.
///
/// More than four rows has no entry and is reported as an error.
pub fn line_clear_points(lines: usize) -> Result<u32, CoreError> {
    LINE_SCORES
        .get(lines)
        .copied()
        .ok_or(CoreError::UnscoredLineClear { lines })
}

//! Read-only render view of a session.
//!
//! The board here is a copy with the falling piece merged in for display. It is
//! never written back; the authoritative board excludes the falling piece until
//! commit.

use crate::board_state::Tetromino;
use crate::types::{Cadence, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, UPCOMING_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<Tetromino>,
    pub upcoming: [PieceKind; UPCOMING_LEN],
    pub score: u32,
    pub lines: u32,
    pub playing: bool,
    /// Set when the last session ended by spawn collision, cleared on start
    pub game_over: bool,
    pub paused: bool,
    pub locking: bool,
    pub cadence: Option<Cadence>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Waiting for a start command
    pub fn idle(&self) -> bool {
        !self.playing
    }

    /// Cell as displayed (falling piece included)
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.board
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            upcoming: [PieceKind::I; UPCOMING_LEN],
            score: 0,
            lines: 0,
            playing: false,
            game_over: false,
            paused: false,
            locking: false,
            cadence: None,
        }
    }
}

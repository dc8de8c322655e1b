//! Board state machine - the committed grid plus the falling piece
//!
//! `BoardState::reduce` is a pure function of `(state, action)`. It owns no
//! timers and draws no random numbers: the piece for `Start` and `Commit` is
//! chosen by the caller. Every action is a variant of the closed
//! [`BoardAction`] enum, so the match below is checked for exhaustiveness at
//! compile time.

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, SPAWN_COLUMN, SPAWN_ROW};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current orientation
    pub shape: Shape,
    /// Board row of the shape's top-left corner
    pub row: i8,
    /// Board column of the shape's top-left corner
    pub column: i8,
}

impl Tetromino {
    /// Create a piece in spawn orientation at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            row: SPAWN_ROW,
            column: SPAWN_COLUMN,
        }
    }

    /// Whether the piece may descend one row on `board`
    pub fn can_fall(&self, board: &Board) -> bool {
        !board.collides(&self.shape, self.row + 1, self.column)
    }

    /// Whether the piece currently overlaps the board or walls
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.row, self.column)
    }
}

/// Transitions of the board state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// Empty board, `first` at the spawn position
    Start { first: PieceKind },
    /// Descend one row. Legality is checked by the caller beforehand.
    Drop,
    /// Install a merged-and-cleared board and spawn `next`
    Commit { board: Board, next: PieceKind },
    /// Shift and/or rotate as one atomic candidate; rejected whole on collision.
    /// Right wins when both directions are set.
    Move { left: bool, right: bool, rotate: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub(crate) board: Board,
    pub(crate) active: Tetromino,
}

impl BoardState {
    /// Empty board with a placeholder piece; `Start` replaces both
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: Tetromino::spawn(PieceKind::I),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    /// Apply one transition and return the resulting state
    pub fn reduce(mut self, action: BoardAction) -> Self {
        match action {
            BoardAction::Start { first } => Self {
                board: Board::new(),
                active: Tetromino::spawn(first),
            },
            BoardAction::Drop => {
                self.active.row += 1;
                self
            }
            BoardAction::Commit { board, next } => Self {
                board,
                active: Tetromino::spawn(next),
            },
            BoardAction::Move {
                left,
                right,
                rotate,
            } => {
                let shape = if rotate {
                    self.active.shape.rotate_cw()
                } else {
                    self.active.shape
                };
                let offset = if right {
                    1
                } else if left {
                    -1
                } else {
                    0
                };
                let column = self.active.column + offset;

                if !self.board.collides(&shape, self.active.row, column) {
                    self.active.shape = shape;
                    self.active.column = column;
                }
                self
            }
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

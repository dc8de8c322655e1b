//! Upcoming-piece queue: FIFO of constant depth.

use crate::rng::PieceSource;
use crate::types::{PieceKind, UPCOMING_LEN};

/// Next pieces to spawn, head first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Upcoming {
    pieces: [PieceKind; UPCOMING_LEN],
}

impl Upcoming {
    /// Fill a fresh queue from the source, head drawn first
    pub fn fill(source: &mut impl PieceSource) -> Self {
        let mut pieces = [PieceKind::I; UPCOMING_LEN];
        for slot in &mut pieces {
            *slot = source.next_piece();
        }
        Self { pieces }
    }

    /// Consume the head and append `incoming` at the tail
    pub fn advance(&mut self, incoming: PieceKind) -> PieceKind {
        let head = self.pieces[0];
        self.pieces.rotate_left(1);
        self.pieces[UPCOMING_LEN - 1] = incoming;
        head
    }

    pub fn head(&self) -> PieceKind {
        self.pieces[0]
    }

    pub fn pieces(&self) -> &[PieceKind; UPCOMING_LEN] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        UPCOMING_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

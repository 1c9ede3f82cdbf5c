use bitvec::{bitbox, boxed::BitBox, prelude::Lsb0};

use crate::Board;

/// Membership set over [`Board::key`] values, one bit per possible
/// occupancy of the playable holes.
pub struct VisitMap {
    bits: BitBox<u32>,
    nr_visited: u64,
}

impl VisitMap {
    /// A map large enough for every occupancy of a board with `nr_holes`
    /// playable holes.
    pub fn new(nr_holes: usize) -> Self {
        assert!(nr_holes <= 32, "visit map too large for {nr_holes} holes");
        Self {
            bits: bitbox![u32, Lsb0; 0; 1usize << nr_holes],
            nr_visited: 0,
        }
    }

    pub fn is_visited(&self, board: &Board) -> bool {
        self.bits[board.key() as usize]
    }

    /// Mark the board as visited. Returns false if it was already present.
    pub fn visit(&mut self, board: &Board) -> bool {
        if self.is_visited(board) {
            return false;
        }
        self.bits.set(board.key() as usize, true);
        self.nr_visited += 1;
        true
    }

    /// Number of distinct boards visited
    pub fn nr_visited(&self) -> u64 {
        self.nr_visited
    }
}

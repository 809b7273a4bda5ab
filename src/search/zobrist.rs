use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Player, COLUMNS, ROWS};

const CELLS: usize = COLUMNS * ROWS;

/// Random keys for Zobrist hashing, one per (cell, occupant) pair, generated
/// once per engine instance. A board's fingerprint is the XOR of the keys of
/// its occupied cells, so the hash can be maintained incrementally by
/// toggling the same key in and out around apply/undo.
///
/// There is no collision detection: two distinct boards folding to the same
/// fingerprint are indistinguishable to the transposition table.
pub struct ZobristTable {
    keys: [[u64; 2]; CELLS],
}

impl ZobristTable {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Deterministic table for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: SmallRng) -> Self {
        let mut keys = [[0u64; 2]; CELLS];
        for cell in keys.iter_mut() {
            for slot in cell.iter_mut() {
                *slot = rng.gen();
            }
        }
        Self { keys }
    }

    fn slot(player: Player) -> usize {
        if player == 1 {
            0
        } else {
            1
        }
    }

    /// Key for `player` occupying `(col, row)`; XOR it into a fingerprint to
    /// add the piece and again to remove it.
    pub fn key(&self, col: usize, row: usize, player: Player) -> u64 {
        self.keys[col * ROWS + row][Self::slot(player)]
    }

    /// Full fingerprint of a board, folding every occupied cell.
    pub fn hash(&self, board: &Board) -> u64 {
        let mut fingerprint = 0u64;
        for col in 0..COLUMNS {
            for row in 0..ROWS {
                let cell = board.get(col, row);
                if cell != 0 {
                    fingerprint ^= self.key(col, row, cell);
                }
            }
        }
        fingerprint
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

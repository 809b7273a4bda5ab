use std::fmt;

use thiserror::Error;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

/// Side to move: +1 or -1. The engine never assumes which sign "the AI" is;
/// scores are always from the perspective of the player passed in.
pub type Player = i8;

/// Column preference for move generation: centre first, then outwards.
/// Alpha-beta and NegaScout prune far more aggressively when strong moves
/// come first, and centre columns are strong in Connect Four.
pub const MOVE_ORDER: [usize; COLUMNS] = [3, 2, 4, 1, 5, 0, 6];

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cell ({col},{row}) holds invalid value {value}, expected -1, 0 or 1")]
    BadCell { col: usize, row: usize, value: i8 },
    #[error("cell ({col},{row}) is occupied above an empty cell")]
    FloatingPiece { col: usize, row: usize },
    #[error("column {column} is out of bounds (0-6)")]
    ColumnOutOfBounds { column: usize },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("invalid move character {ch:?} at position {position}, expected 0-6")]
    BadMoveChar { position: usize, ch: char },
}

/// A 7x6 Connect Four grid. Columns are indexed 0-6 left to right, rows 0-5
/// bottom to top; cells hold 0 (empty), +1 or -1.
///
/// Search strategies mutate a board in place with paired [`Board::apply`] /
/// [`Board::undo`] calls (or, preferably, [`Board::with_move`], which cannot
/// leave the pair unbalanced). After any search the caller's board is
/// bit-for-bit what it was before.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[i8; ROWS]; COLUMNS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw cells, validating cell values and that every
    /// column is filled bottom-up with no gaps.
    pub fn from_cells(cells: [[i8; ROWS]; COLUMNS]) -> Result<Self, BoardError> {
        for (col, column) in cells.iter().enumerate() {
            let mut seen_empty = false;
            for (row, &value) in column.iter().enumerate() {
                if !matches!(value, -1 | 0 | 1) {
                    return Err(BoardError::BadCell { col, row, value });
                }
                if value == 0 {
                    seen_empty = true;
                } else if seen_empty {
                    return Err(BoardError::FloatingPiece { col, row });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Replays a move-history string of column digits (e.g. `"3342"`) from an
    /// empty board, `first` moving first and sides alternating.
    pub fn from_move_string(moves: &str, first: Player) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut player = first;
        for (position, ch) in moves.chars().enumerate() {
            let column = ch
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|&c| c < COLUMNS)
                .ok_or(BoardError::BadMoveChar { position, ch })?;
            board
                .apply(column, player)
                .ok_or(BoardError::ColumnFull { column })?;
            player = -player;
        }
        Ok(board)
    }

    pub fn get(&self, col: usize, row: usize) -> i8 {
        self.cells[col][row]
    }

    /// A column is playable iff its topmost cell is empty.
    pub fn is_playable(&self, col: usize) -> bool {
        self.cells[col][ROWS - 1] == 0
    }

    /// Drops a piece into `col`, returning the landing row, or `None` when
    /// the column is already full. Callers are expected to pre-check with
    /// [`Board::is_playable`].
    pub fn apply(&mut self, col: usize, player: Player) -> Option<usize> {
        for row in 0..ROWS {
            if self.cells[col][row] == 0 {
                self.cells[col][row] = player;
                return Some(row);
            }
        }
        None
    }

    /// Removes the topmost piece in `col`. Only valid paired with an earlier
    /// [`Board::apply`] on the same column; there is no runtime detection of
    /// a mismatched undo.
    pub fn undo(&mut self, col: usize) {
        for row in (0..ROWS).rev() {
            if self.cells[col][row] != 0 {
                self.cells[col][row] = 0;
                return;
            }
        }
    }

    /// Scoped make/undo: applies the move, runs `f`, and undoes on the way
    /// out, so no exit path (including pruning returns inside search loops)
    /// can leave the board corrupted. Returns `None` when the column is full.
    pub fn with_move<T>(
        &mut self,
        col: usize,
        player: Player,
        f: impl FnOnce(&mut Self, usize) -> T,
    ) -> Option<T> {
        let row = self.apply(col, player)?;
        let out = f(self, row);
        self.undo(col);
        Some(out)
    }

    /// Legal columns in centre-out preference order.
    pub fn ordered_moves(&self) -> Vec<usize> {
        MOVE_ORDER
            .iter()
            .copied()
            .filter(|&col| self.is_playable(col))
            .collect()
    }

    /// True when `player` has four in a row horizontally, vertically or on
    /// either diagonal.
    pub fn check_win(&self, player: Player) -> bool {
        let b = &self.cells;

        // Horizontal
        for c in 0..COLUMNS - 3 {
            for r in 0..ROWS {
                if b[c][r] == player
                    && b[c + 1][r] == player
                    && b[c + 2][r] == player
                    && b[c + 3][r] == player
                {
                    return true;
                }
            }
        }

        // Vertical
        for c in 0..COLUMNS {
            for r in 0..ROWS - 3 {
                if b[c][r] == player
                    && b[c][r + 1] == player
                    && b[c][r + 2] == player
                    && b[c][r + 3] == player
                {
                    return true;
                }
            }
        }

        // Diagonal /
        for c in 0..COLUMNS - 3 {
            for r in 0..ROWS - 3 {
                if b[c][r] == player
                    && b[c + 1][r + 1] == player
                    && b[c + 2][r + 2] == player
                    && b[c + 3][r + 3] == player
                {
                    return true;
                }
            }
        }

        // Diagonal \
        for c in 0..COLUMNS - 3 {
            for r in 3..ROWS {
                if b[c][r] == player
                    && b[c + 1][r - 1] == player
                    && b[c + 2][r - 2] == player
                    && b[c + 3][r - 3] == player
                {
                    return true;
                }
            }
        }

        false
    }

    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|col| !self.is_playable(col))
    }

    pub fn is_terminal(&self) -> bool {
        self.check_win(1) || self.check_win(-1) || self.is_full()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != 0)
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLUMNS {
                let glyph = match self.cells[col][row] {
                    1 => 'X',
                    -1 => 'O',
                    _ => '.',
                };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "0 1 2 3 4 5 6")
    }
}

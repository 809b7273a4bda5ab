use crate::board::{Board, Player, COLUMNS, ROWS};

pub const WIN_SCORE: i32 = 1000;
pub const THREE_OPEN: i32 = 100;
pub const TWO_OPEN: i32 = 10;
pub const CENTER_WEIGHT: i32 = 6;

/// Score of a position already decided by a connected four. Ten times
/// `WIN_SCORE` so it dominates any sum of window scores.
pub const MATE_SCORE: i32 = WIN_SCORE * 10;
pub const DRAW_SCORE: i32 = 0;

/// Mate score with `depth_remaining` plies of budget left: wins found
/// shallower in the tree score strictly higher, so the engine prefers the
/// faster forced win.
pub fn mate_in(depth_remaining: u32) -> i32 {
    MATE_SCORE + depth_remaining as i32
}

/// Value of a leaf (terminal position or exhausted depth) from the mover's
/// perspective, with mate scores scaled by remaining depth.
pub fn leaf_score(board: &Board, player: Player, depth_remaining: u32) -> i32 {
    if board.check_win(player) {
        return mate_in(depth_remaining);
    }
    if board.check_win(-player) {
        return -mate_in(depth_remaining);
    }
    evaluate(board, player)
}

fn window(board: &Board, col: usize, row: usize, dc: isize, dr: isize) -> [i8; 4] {
    let mut cells = [0i8; 4];
    for (i, cell) in cells.iter_mut().enumerate() {
        let c = (col as isize + i as isize * dc) as usize;
        let r = (row as isize + i as isize * dr) as usize;
        *cell = board.get(c, r);
    }
    cells
}

fn score_window(cells: [i8; 4], player: Player) -> i32 {
    let mut mine = 0;
    let mut theirs = 0;
    let mut empty = 0;
    for cell in cells {
        if cell == player {
            mine += 1;
        } else if cell == -player {
            theirs += 1;
        } else {
            empty += 1;
        }
    }

    // A mixed window can never become four in a row for either side.
    if mine > 0 && theirs > 0 {
        return 0;
    }

    match (mine, theirs, empty) {
        (4, _, _) => WIN_SCORE,
        (_, 4, _) => -WIN_SCORE,
        (3, _, 1) => THREE_OPEN,
        (_, 3, 1) => -THREE_OPEN,
        (2, _, 2) => TWO_OPEN,
        (_, 2, 2) => -TWO_OPEN,
        _ => 0,
    }
}

/// Static heuristic score of a position from `player`'s perspective:
/// centre-column control plus every 4-cell line on the board, with exact
/// negative mirrors for the opponent's patterns so that
/// `evaluate(b, p) == -evaluate(b, -p)` always holds.
///
/// Positions already containing a connected four short-circuit to
/// `±MATE_SCORE` before the window scan.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    if board.check_win(player) {
        return MATE_SCORE;
    }
    if board.check_win(-player) {
        return -MATE_SCORE;
    }

    let mut score = 0;

    // Centre control
    let center = COLUMNS / 2;
    for row in 0..ROWS {
        let cell = board.get(center, row);
        if cell == player {
            score += CENTER_WEIGHT;
        } else if cell == -player {
            score -= CENTER_WEIGHT;
        }
    }

    // Horizontal
    for r in 0..ROWS {
        for c in 0..COLUMNS - 3 {
            score += score_window(window(board, c, r, 1, 0), player);
        }
    }

    // Vertical
    for c in 0..COLUMNS {
        for r in 0..ROWS - 3 {
            score += score_window(window(board, c, r, 0, 1), player);
        }
    }

    // Diagonal /
    for c in 0..COLUMNS - 3 {
        for r in 0..ROWS - 3 {
            score += score_window(window(board, c, r, 1, 1), player);
        }
    }

    // Diagonal \
    for c in 0..COLUMNS - 3 {
        for r in 3..ROWS {
            score += score_window(window(board, c, r, 1, -1), player);
        }
    }

    score
}

use crate::board::{Board, Player};
use crate::search::tt::{Record, TranspositionTable};
use crate::search::zobrist::ZobristTable;
use crate::search::{eval, root_preflight, SearchConfig, SearchResult, Strategy, INF};

/// Cap on zero-width passes per depth. Convergence normally takes a handful;
/// the cap only guards against a cycling guess, in which case the last guess
/// is returned as-is.
const MAX_PASSES: u32 = 64;

/// MTD(f): finds a position's exact score through a sequence of zero-width
/// negamax searches, each testing whether the score lies above or below the
/// current guess and narrowing a `[lower, upper]` pair until the bounds meet.
/// The transposition table is what makes this cheaper than one wide search:
/// successive passes revisit mostly the same nodes and cut on stored bounds.
///
/// Holds its Zobrist keys and transposition table for the lifetime of the
/// value, so keeping one `Mtdf` across a whole game reuses earlier analysis.
pub struct Mtdf {
    nodes: u64,
    node_limit: u64,
    use_iterative_deepening: bool,
    zobrist: ZobristTable,
    tt: TranspositionTable,
    /// Fingerprint of the search board, maintained incrementally around every
    /// apply/undo instead of re-folding 42 cells per node.
    hash: u64,
}

impl Mtdf {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            nodes: 0,
            node_limit: config.node_visit_limit,
            use_iterative_deepening: config.use_iterative_deepening,
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(),
            hash: 0,
        }
    }

    pub fn table_len(&self) -> usize {
        self.tt.len()
    }

    fn out_of_budget(&self) -> bool {
        self.nodes >= self.node_limit
    }

    fn mtd(&mut self, board: &mut Board, depth: u32, player: Player, first_guess: i32) -> SearchResult {
        let mut lower = -INF;
        let mut upper = INF;
        let mut guess = first_guess;
        let mut best = None;

        for pass in 0..MAX_PASSES {
            let beta = if guess == lower { guess + 1 } else { guess };
            let result = self.root_null_window(board, depth, player, beta);
            guess = result.score;
            if result.best.is_some() {
                best = result.best;
            }
            if guess < beta {
                upper = guess;
            } else {
                lower = guess;
            }
            if lower >= upper {
                log::trace!("mtd(f) depth {depth} converged on {guess} after {} passes", pass + 1);
                break;
            }
            if self.out_of_budget() {
                break;
            }
        }

        SearchResult {
            best,
            score: guess,
            nodes: self.nodes,
        }
    }

    /// One zero-width root pass: `[beta - 1, beta]`. Its score is not exact,
    /// but tells the driver on which side of `beta` the true score lies.
    fn root_null_window(
        &mut self,
        board: &mut Board,
        depth: u32,
        player: Player,
        beta: i32,
    ) -> SearchResult {
        let mut a = beta - 1;
        let mut best_score = -INF;
        let mut best_move = None;
        let win_now = eval::mate_in(depth - 1);

        for col in self.order_with_tt(board) {
            let Some(score) = board.with_move(col, player, |b, row| {
                if b.check_win(player) {
                    win_now
                } else {
                    let key = self.zobrist.key(col, row, player);
                    self.hash ^= key;
                    let score = -self.negamax_mem(b, depth - 1, -beta, -a, -player);
                    self.hash ^= key;
                    score
                }
            }) else {
                continue;
            };

            if score > best_score {
                best_score = score;
                best_move = Some(col);
            }
            if best_score > a {
                a = best_score;
            }
            if a >= beta || best_score >= win_now || self.out_of_budget() {
                break;
            }
        }

        SearchResult {
            best: best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Legal moves in centre-out order, with the table's remembered best move
    /// for this position fronted.
    fn order_with_tt(&self, board: &Board) -> Vec<usize> {
        let mut moves = board.ordered_moves();
        if let Some(tt_move) = self.tt.probe(self.hash).and_then(|rec| rec.best) {
            if let Some(pos) = moves.iter().position(|&col| col == tt_move) {
                moves.remove(pos);
                moves.insert(0, tt_move);
            }
        }
        moves
    }

    /// Negamax with memory: probe the table before expanding, store bounds
    /// after. A stored record only counts when it was computed with at least
    /// the depth still required here.
    fn negamax_mem(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        player: Player,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes > self.node_limit {
            return eval::evaluate(board, player);
        }

        let fingerprint = self.hash;
        if let Some(rec) = self.tt.probe(fingerprint) {
            if rec.depth >= depth {
                if rec.lower >= beta {
                    return rec.lower;
                }
                if rec.upper <= alpha {
                    return rec.upper;
                }
                alpha = alpha.max(rec.lower);
                beta = beta.min(rec.upper);
            }
        }

        if depth == 0 || board.is_terminal() {
            let score = eval::leaf_score(board, player, depth);
            self.tt.store(
                fingerprint,
                Record {
                    depth,
                    lower: score,
                    upper: score,
                    best: None,
                },
            );
            return score;
        }

        let orig_alpha = alpha;
        let mut a = alpha;
        let mut best = -INF;
        let mut best_move = None;

        for col in self.order_with_tt(board) {
            let Some(score) = board.with_move(col, player, |b, row| {
                let key = self.zobrist.key(col, row, player);
                self.hash ^= key;
                let score = -self.negamax_mem(b, depth - 1, -beta, -a, -player);
                self.hash ^= key;
                score
            }) else {
                continue;
            };

            if score > best {
                best = score;
                best_move = Some(col);
            }
            if best > a {
                a = best;
            }
            if a >= beta {
                break;
            }
            if self.out_of_budget() {
                break;
            }
        }

        let record = if best <= orig_alpha {
            // Fail low: `best` only bounds the score from above.
            Record { depth, lower: -INF, upper: best, best: best_move }
        } else if best >= beta {
            // Fail high: `best` only bounds the score from below.
            Record { depth, lower: best, upper: INF, best: best_move }
        } else {
            Record { depth, lower: best, upper: best, best: best_move }
        };
        self.tt.store(fingerprint, record);

        best
    }
}

impl Strategy for Mtdf {
    fn name(&self) -> &'static str {
        "mtdf"
    }

    fn compute_best_move(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        player: Player,
    ) -> SearchResult {
        self.nodes = 0;
        if let Some(done) = root_preflight(board, max_depth, player) {
            return done;
        }
        self.hash = self.zobrist.hash(board);

        let first_depth = if self.use_iterative_deepening {
            1
        } else {
            max_depth
        };

        let mut guess = 0;
        let mut completed: Option<SearchResult> = None;
        for depth in first_depth..=max_depth {
            let result = self.mtd(board, depth, player, guess);
            if self.out_of_budget() {
                if completed.is_none() {
                    completed = Some(result);
                }
                break;
            }
            guess = result.score;
            completed = Some(result);
        }

        let mut result = completed.unwrap_or_default();
        result.nodes = self.nodes;
        result
    }
}

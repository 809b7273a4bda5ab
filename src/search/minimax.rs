use crate::board::{Board, Player};
use crate::search::{eval, root_preflight, SearchConfig, SearchResult, Strategy, INF};

/// Minimax with alpha-beta pruning, keeping the two plies explicit: the
/// engine's own nodes maximise, the opponent's minimise, and every leaf is
/// evaluated from the fixed root player's perspective. Functionally the same
/// search as [`crate::search::negamax::NegamaxAb`], kept in the
/// two-code-path form.
pub struct MinimaxAb {
    nodes: u64,
    node_limit: u64,
}

impl MinimaxAb {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            nodes: 0,
            node_limit: config.node_visit_limit,
        }
    }

    fn out_of_budget(&self) -> bool {
        self.nodes >= self.node_limit
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        current: Player,
        ai: Player,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes > self.node_limit {
            return eval::evaluate(board, ai);
        }
        if depth == 0 || board.is_terminal() {
            return eval::leaf_score(board, ai, depth);
        }

        let maximizing = current == ai;
        let mut best = if maximizing { -INF } else { INF };

        for col in board.ordered_moves() {
            let Some(score) = board.with_move(col, current, |b, _| {
                self.minimax(b, depth - 1, alpha, beta, -current, ai)
            }) else {
                continue;
            };

            if maximizing {
                if score > best {
                    best = score;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                }
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
            if self.out_of_budget() {
                break;
            }
        }
        best
    }
}

impl Strategy for MinimaxAb {
    fn name(&self) -> &'static str {
        "minimax-ab"
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

        let mut alpha = -INF;
        let mut best_score = -INF;
        let mut best_move = None;
        let win_now = eval::mate_in(max_depth - 1);

        for col in board.ordered_moves() {
            let Some(score) = board.with_move(col, player, |b, _| {
                if b.check_win(player) {
                    win_now
                } else {
                    self.minimax(b, max_depth - 1, alpha, INF, -player, player)
                }
            }) else {
                continue;
            };

            if score > best_score {
                best_score = score;
                best_move = Some(col);
            }
            alpha = alpha.max(best_score);
            if best_score >= win_now || self.out_of_budget() {
                break;
            }
        }

        SearchResult {
            best: best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }
}

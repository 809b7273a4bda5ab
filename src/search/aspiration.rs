use crate::board::{Board, Player};
use crate::search::negamax::NegamaxAb;
use crate::search::{root_preflight, SearchConfig, SearchResult, Strategy, INF};

/// Negamax bounded to a narrow window around a guessed score, driven by
/// iterative deepening: each depth's guess is the previous depth's score
/// (0 at depth 1). A result at or outside the window doubles the half-width
/// and re-searches, eventually falling back to the full `[-INF, INF]` window;
/// widening saturates instead of overflowing.
pub struct AspirationNegamax {
    inner: NegamaxAb,
    initial_window: i32,
    use_iterative_deepening: bool,
}

impl AspirationNegamax {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            inner: NegamaxAb::new(config),
            initial_window: config.initial_aspiration_window.max(1),
            use_iterative_deepening: config.use_iterative_deepening,
        }
    }

    fn aspiration_root(
        &mut self,
        board: &mut Board,
        depth: u32,
        player: Player,
        guess: i32,
    ) -> SearchResult {
        let mut window = self.initial_window;
        loop {
            let alpha = guess.saturating_sub(window).max(-INF);
            let beta = guess.saturating_add(window).min(INF);
            let result = self.inner.root_window(board, depth, player, alpha, beta);

            let full_width = alpha == -INF && beta == INF;
            let inside = result.score > alpha && result.score < beta;
            if inside || full_width || self.inner.out_of_budget() {
                return result;
            }

            log::trace!(
                "aspiration window ±{window} around {guess} failed at depth {depth} \
                 (score {}), widening",
                result.score
            );
            window = window.saturating_mul(2).min(INF);
        }
    }
}

impl Strategy for AspirationNegamax {
    fn name(&self) -> &'static str {
        "aspiration-negamax"
    }

    fn compute_best_move(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        player: Player,
    ) -> SearchResult {
        self.inner.reset();
        if let Some(done) = root_preflight(board, max_depth, player) {
            return done;
        }

        let first_depth = if self.use_iterative_deepening {
            1
        } else {
            max_depth
        };

        let mut guess = 0;
        let mut completed: Option<SearchResult> = None;
        for depth in first_depth..=max_depth {
            let result = self.aspiration_root(board, depth, player, guess);
            if self.inner.out_of_budget() {
                // Budget ran out inside this depth; keep the previous fully
                // searched depth's move unless there is none yet.
                if completed.is_none() {
                    completed = Some(result);
                }
                break;
            }
            guess = result.score;
            completed = Some(result);
        }

        let mut result = completed.unwrap_or_default();
        result.nodes = self.inner.nodes();
        result
    }
}

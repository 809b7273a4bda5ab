pub mod aspiration;
pub mod eval;
pub mod minimax;
pub mod mtdf;
pub mod negamax;
pub mod negascout;
pub mod tt;
pub mod zobrist;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};

/// Search-window infinity. Large enough to bound every reachable score,
/// small enough that negation and aspiration widening cannot overflow `i32`.
pub const INF: i32 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    MinimaxAb,
    NegamaxAb,
    #[serde(rename = "negascout")]
    NegaScout,
    Mtdf,
    AspirationNegamax,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minimax-ab" => Ok(Self::MinimaxAb),
            "negamax" | "negamax-ab" => Ok(Self::NegamaxAb),
            "negascout" | "nega-scout" | "pvs" => Ok(Self::NegaScout),
            "mtdf" | "mtd" => Ok(Self::Mtdf),
            "aspiration" | "aspiration-negamax" => Ok(Self::AspirationNegamax),
            _ => Err(format!(
                "unknown strategy {s:?}, expected minimax, negamax, negascout, mtdf or aspiration"
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MinimaxAb => "minimax-ab",
            Self::NegamaxAb => "negamax-ab",
            Self::NegaScout => "negascout",
            Self::Mtdf => "mtdf",
            Self::AspirationNegamax => "aspiration-negamax",
        };
        f.write_str(name)
    }
}

/// Per-search configuration, passed by value into the engine. There is no
/// process-wide settings state; callers own the choice of strategy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: StrategyKind,
    /// Soft ceiling on visited nodes. The search returns approximate values
    /// and unwinds once the counter passes it; overshoot is at most one node.
    pub node_visit_limit: u64,
    /// Half-width of the first aspiration window around the previous
    /// iteration's score.
    pub initial_aspiration_window: i32,
    /// Deepen from 1 to the requested depth, seeding each iteration from the
    /// previous score. Consumed by the aspiration and MTD(f) strategies.
    pub use_iterative_deepening: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::NegaScout,
            node_visit_limit: u64::MAX,
            initial_aspiration_window: 25,
            use_iterative_deepening: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best column, or `None` when the position offers no move (full board,
    /// decided game, or a depth-0 evaluation request).
    pub best: Option<usize>,
    /// Score from the perspective of the player the search ran for.
    pub score: i32,
    pub nodes: u64,
}

/// Common contract of the five search strategies: given a board, a depth
/// budget and the player to move, produce the best column, its score from
/// that player's perspective, and the number of nodes visited. The board is
/// restored bit-for-bit before returning.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn compute_best_move(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        player: Player,
    ) -> SearchResult;
}

/// Builds the strategy selected by `config`. The enum is matched once here;
/// everything downstream goes through the [`Strategy`] trait.
pub fn build_strategy(config: &SearchConfig) -> Box<dyn Strategy> {
    match config.strategy {
        StrategyKind::MinimaxAb => Box::new(minimax::MinimaxAb::new(config)),
        StrategyKind::NegamaxAb => Box::new(negamax::NegamaxAb::new(config)),
        StrategyKind::NegaScout => Box::new(negascout::NegaScout::new(config)),
        StrategyKind::Mtdf => Box::new(mtdf::Mtdf::new(config)),
        StrategyKind::AspirationNegamax => Box::new(aspiration::AspirationNegamax::new(config)),
    }
}

/// One-shot entry point: build the configured strategy, run it once, report.
/// Callers that want a persistent transposition table across moves should
/// instead hold a strategy value (e.g. [`mtdf::Mtdf`]) and call it directly.
pub fn compute_best_move(
    board: &mut Board,
    max_depth: u32,
    player: Player,
    config: &SearchConfig,
) -> SearchResult {
    let mut strategy = build_strategy(config);
    let result = strategy.compute_best_move(board, max_depth, player);
    log::debug!(
        "{} visited {} nodes, best {:?} score {}",
        strategy.name(),
        result.nodes,
        result.best,
        result.score
    );
    result
}

/// Root edge cases shared by every strategy: decided or drawn positions and
/// depth-0 requests resolve without expanding the tree.
pub(crate) fn root_preflight(
    board: &Board,
    max_depth: u32,
    player: Player,
) -> Option<SearchResult> {
    if board.check_win(player) || board.check_win(-player) {
        return Some(SearchResult {
            best: None,
            score: eval::evaluate(board, player),
            nodes: 1,
        });
    }
    if board.is_full() {
        return Some(SearchResult {
            best: None,
            score: eval::DRAW_SCORE,
            nodes: 0,
        });
    }
    if max_depth == 0 {
        return Some(SearchResult {
            best: None,
            score: eval::evaluate(board, player),
            nodes: 1,
        });
    }
    None
}

use dropbot::board::{Board, Player};
use dropbot::search::{self, eval, SearchConfig, StrategyKind, INF};

/// Full-width negamax with no pruning at all: the reference result that the
/// pruned searches must reproduce exactly.
fn brute_negamax(board: &mut Board, depth: u32, player: Player) -> i32 {
    if depth == 0 || board.is_terminal() {
        return eval::leaf_score(board, player, depth);
    }
    let mut best = -INF;
    for col in board.ordered_moves() {
        let score = board
            .with_move(col, player, |b, _| -brute_negamax(b, depth - 1, -player))
            .unwrap();
        if score > best {
            best = score;
        }
    }
    best
}

fn brute_root(board: &mut Board, depth: u32, player: Player) -> (Option<usize>, i32) {
    let mut best_move = None;
    let mut best_score = -INF;
    for col in board.ordered_moves() {
        let score = board
            .with_move(col, player, |b, _| -brute_negamax(b, depth - 1, -player))
            .unwrap();
        if score > best_score {
            best_score = score;
            best_move = Some(col);
        }
    }
    (best_move, best_score)
}

/// Root moves whose exact score ties the optimum; strategies may break such
/// ties differently.
fn optimal_columns(board: &mut Board, depth: u32, player: Player) -> Vec<usize> {
    let (_, best) = brute_root(board, depth, player);
    let mut columns = Vec::new();
    for col in board.ordered_moves() {
        let score = board
            .with_move(col, player, |b, _| -brute_negamax(b, depth - 1, -player))
            .unwrap();
        if score == best {
            columns.push(col);
        }
    }
    columns
}

fn run(strategy: StrategyKind, board: &Board, depth: u32, player: Player) -> search::SearchResult {
    let config = SearchConfig {
        strategy,
        ..SearchConfig::default()
    };
    let mut b = board.clone();
    search::compute_best_move(&mut b, depth, player, &config)
}

const POSITIONS: [(&str, u32); 4] = [
    ("", 4),
    ("334455", 5),
    ("0123345", 4),
    ("0066115", 5),
];

fn position(moves: &str) -> (Board, Player) {
    let board = Board::from_move_string(moves, 1).unwrap();
    let player = if moves.len() % 2 == 0 { 1 } else { -1 };
    (board, player)
}

#[test]
fn evaluator_is_negamax_symmetric() {
    for moves in ["", "3", "33", "334455", "0123345", "662211", "30303"] {
        let (board, _) = position(moves);
        assert_eq!(
            eval::evaluate(&board, 1),
            -eval::evaluate(&board, -1),
            "symmetry broken after moves {moves:?}"
        );
    }
}

#[test]
fn alpha_beta_matches_brute_force() {
    for (moves, depth) in POSITIONS {
        let (board, player) = position(moves);
        let (brute_move, brute_score) = brute_root(&mut board.clone(), depth, player);
        let result = run(StrategyKind::NegamaxAb, &board, depth, player);
        assert_eq!(
            result.score, brute_score,
            "pruning changed the score after moves {moves:?}"
        );
        assert_eq!(
            result.best, brute_move,
            "pruning changed the move after moves {moves:?}"
        );
    }
}

#[test]
fn minimax_matches_negamax() {
    for (moves, depth) in POSITIONS {
        let (board, player) = position(moves);
        let negamax = run(StrategyKind::NegamaxAb, &board, depth, player);
        let minimax = run(StrategyKind::MinimaxAb, &board, depth, player);
        assert_eq!(minimax.score, negamax.score, "after moves {moves:?}");
        assert_eq!(minimax.best, negamax.best, "after moves {moves:?}");
    }
}

#[test]
fn negascout_matches_negamax() {
    for (moves, depth) in POSITIONS {
        let (board, player) = position(moves);
        let negamax = run(StrategyKind::NegamaxAb, &board, depth, player);
        let negascout = run(StrategyKind::NegaScout, &board, depth, player);
        assert_eq!(negascout.score, negamax.score, "after moves {moves:?}");
        assert_eq!(negascout.best, negamax.best, "after moves {moves:?}");
    }
}

#[test]
fn aspiration_matches_negamax() {
    for (moves, depth) in POSITIONS {
        let (board, player) = position(moves);
        let negamax = run(StrategyKind::NegamaxAb, &board, depth, player);
        let aspiration = run(StrategyKind::AspirationNegamax, &board, depth, player);
        assert_eq!(aspiration.score, negamax.score, "after moves {moves:?}");
        assert_eq!(aspiration.best, negamax.best, "after moves {moves:?}");
    }
}

#[test]
fn mtdf_converges_to_the_negamax_score() {
    for (moves, depth) in POSITIONS {
        let (board, player) = position(moves);
        let negamax = run(StrategyKind::NegamaxAb, &board, depth, player);
        let mtdf = run(StrategyKind::Mtdf, &board, depth, player);
        assert_eq!(mtdf.score, negamax.score, "after moves {moves:?}");

        let optimal = optimal_columns(&mut board.clone(), depth, player);
        let chosen = mtdf.best.expect("mtdf found no move");
        assert!(
            optimal.contains(&chosen),
            "mtdf picked column {chosen} after moves {moves:?}, optimal set {optimal:?}"
        );
    }
}

#[test]
fn persistent_mtdf_reuses_its_table() {
    use dropbot::search::mtdf::Mtdf;
    use dropbot::search::Strategy;

    let (board, player) = position("334455");
    let config = SearchConfig {
        strategy: StrategyKind::Mtdf,
        ..SearchConfig::default()
    };
    let mut engine = Mtdf::new(&config);

    let mut b = board.clone();
    let cold = engine.compute_best_move(&mut b, 5, player);
    assert!(engine.table_len() > 0, "search stored nothing");

    let mut b = board.clone();
    let warm = engine.compute_best_move(&mut b, 5, player);
    assert_eq!(warm.score, cold.score);
    assert!(
        warm.nodes <= cold.nodes,
        "warm table searched more nodes ({} > {})",
        warm.nodes,
        cold.nodes
    );
}

use dropbot::board::Board;
use dropbot::search::{self, eval, SearchConfig, StrategyKind};

const ALL_STRATEGIES: [StrategyKind; 5] = [
    StrategyKind::MinimaxAb,
    StrategyKind::NegamaxAb,
    StrategyKind::NegaScout,
    StrategyKind::Mtdf,
    StrategyKind::AspirationNegamax,
];

fn best_move(strategy: StrategyKind, board: &Board, depth: u32, player: i8) -> search::SearchResult {
    let config = SearchConfig {
        strategy,
        ..SearchConfig::default()
    };
    let mut b = board.clone();
    search::compute_best_move(&mut b, depth, player, &config)
}

#[test]
fn winning_move_is_taken_immediately() {
    // +1 owns 1,2,3 on the bottom row; dropping in 0 or 4 connects four.
    // Column 4 comes before 0 in the centre-out order.
    let board = Board::from_move_string("112233", 1).unwrap();
    for strategy in ALL_STRATEGIES {
        let result = best_move(strategy, &board, 6, 1);
        assert_eq!(
            result.best,
            Some(4),
            "{strategy:?} missed the winning drop"
        );
        assert!(
            result.score >= eval::MATE_SCORE,
            "{strategy:?} scored a win at {}",
            result.score
        );
    }
}

#[test]
fn single_open_three_must_be_blocked() {
    // -1 owns 0,1,2 on the bottom row; the only completion square is (3,0).
    // +1 to move has no counter-threat, so every strategy has to block.
    let board = Board::from_move_string("001122", -1).unwrap();
    for strategy in ALL_STRATEGIES {
        let result = best_move(strategy, &board, 4, 1);
        assert_eq!(
            result.best,
            Some(3),
            "{strategy:?} failed to block the open three"
        );
    }
}

#[test]
fn faster_win_is_preferred_over_slower() {
    // +1 can win at once in column 4; any slower plan scores lower because
    // mate scores decay with the depth at which the win is found.
    let board = Board::from_move_string("112233", 1).unwrap();
    let result = best_move(StrategyKind::NegamaxAb, &board, 6, 1);
    assert_eq!(result.score, eval::mate_in(5), "win in one at depth 6");
}

#[test]
fn losing_position_still_returns_a_move() {
    // -1 has an unstoppable double threat (1,2,3 on row 0 with both ends
    // open); +1 must still pick some legal column and report a losing score.
    let board = Board::from_move_string("112233", -1).unwrap();
    for strategy in ALL_STRATEGIES {
        let result = best_move(strategy, &board, 6, 1);
        assert!(result.best.is_some(), "{strategy:?} resigned instead of moving");
        assert!(
            result.score <= -eval::MATE_SCORE,
            "{strategy:?} did not see the forced loss, score {}",
            result.score
        );
    }
}

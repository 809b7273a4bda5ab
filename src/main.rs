use anyhow::Result;
use clap::Parser;

use dropbot::board::Board;
use dropbot::search::{self, SearchConfig, StrategyKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute the best Connect Four move for a position", long_about = None)]
struct Args {
    /// Search strategy: minimax, negamax, negascout, mtdf or aspiration
    #[arg(long, default_value = "negascout")]
    strategy: StrategyKind,

    /// Search depth in plies
    #[arg(long, default_value_t = 7)]
    depth: u32,

    /// Position as the columns played so far from an empty board, e.g. "3342".
    /// The first digit is a +1 move; sides alternate, so the side to move
    /// follows from the history length.
    #[arg(long, default_value = "")]
    position: String,

    /// Soft ceiling on visited nodes
    #[arg(long)]
    node_limit: Option<u64>,

    /// Initial aspiration half-window (aspiration strategy)
    #[arg(long, default_value_t = 25)]
    window: i32,

    /// Search the requested depth directly instead of deepening from 1
    #[arg(long)]
    no_deepening: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = Board::from_move_string(&args.position, 1)?;
    let player = if args.position.len() % 2 == 0 { 1 } else { -1 };

    let config = SearchConfig {
        strategy: args.strategy,
        node_visit_limit: args.node_limit.unwrap_or(u64::MAX),
        initial_aspiration_window: args.window,
        use_iterative_deepening: !args.no_deepening,
    };

    log::info!(
        "searching {} to depth {} for player {player}",
        args.strategy,
        args.depth
    );
    let result = search::compute_best_move(&mut board, args.depth, player, &config);

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    println!("{board}");
    match result.best {
        Some(column) => println!(
            "best column: {column} (score {}, {} nodes)",
            result.score, result.nodes
        ),
        None => println!(
            "no move to make (score {}, {} nodes)",
            result.score, result.nodes
        ),
    }
    Ok(())
}

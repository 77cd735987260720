extern crate gomoku_mcts;

use gomoku_mcts::board::{Board, GameOutcome};
use gomoku_mcts::boards::tic_tac_toe::TicTacToeBoard;
use gomoku_mcts::config::RolloutReward;
use gomoku_mcts::error::MctsError;
use gomoku_mcts::mcts::{MonteCarloTreeSearch, DEFAULT_ITERATIONS};
use gomoku_mcts::random::SeededRandomGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MctsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Pass a board size as the first argument, 3 by default
    let size = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);
    let mut board = TicTacToeBoard::new(size)?;

    // Both sides share one engine
    let mut mcts = MonteCarloTreeSearch::builder()
        .with_reward(RolloutReward::MoverRelative)
        .with_random_generator(SeededRandomGenerator::default())
        .build()?;

    println!("{board}\n");
    while board.outcome() == GameOutcome::InProgress {
        let chosen = mcts.choose_move(&board, DEFAULT_ITERATIONS)?;
        info!(player = ?chosen.player, b_move = ?chosen.b_move, "engine move");
        board = chosen.board;
        println!("{board}\n");
    }

    match board.outcome() {
        GameOutcome::Won(player) => println!("{} wins!", player.symbol()),
        _ => println!("Draw!"),
    }
    Ok(())
}

//! Monte Carlo tree search move selection for a three-in-a-row board game.
//!
//! The engine grows a search tree from the current position with the classic four phases:
//! UCT selection, expansion of one untried move, a random rollout and backpropagation of
//! the rollout reward with its sign flipped at every level. After the iteration budget is
//! spent it plays the root child with the best win rate.
//!
//! # Example
//!
//! ```rust
//! use gomoku_mcts::board::Player;
//! use gomoku_mcts::boards::tic_tac_toe::{Move, TicTacToeBoard};
//! use gomoku_mcts::mcts::MonteCarloTreeSearch;
//! use gomoku_mcts::random::SeededRandomGenerator;
//!
//! // X to move, with two in a row on the top line
//! let board: TicTacToeBoard = "XX./OO./...".parse()?;
//!
//! // Create and configure a new MCTS search instance using the builder
//! let mut mcts = MonteCarloTreeSearch::builder()
//!     .with_random_generator(SeededRandomGenerator::default())
//!     .build()?;
//!
//! // Search and play the most promising move
//! let chosen = mcts.choose_move(&board, 500)?;
//! assert_eq!(chosen.b_move, Move::new(0, 2));
//! assert_eq!(chosen.player, Player::X);
//! # Ok::<(), gomoku_mcts::error::MctsError>(())
//! ```

/// Contains the `Board` trait and the player and outcome types shared by every game.
pub mod board;
/// Contains implementations of the `Board` trait.
pub mod boards;
/// Search engine configuration.
pub mod config;
/// The error type returned by boards and the search engine.
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// The arena-backed search tree and its selection, expansion and backpropagation steps.
pub mod mcts_tree;
/// Contains traits and implementations for random number generation.
pub mod random;

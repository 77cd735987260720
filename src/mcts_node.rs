use crate::board::{Board, GameOutcome};

/// Represents a single node in the Monte Carlo search tree.
///
/// Each node owns a snapshot of the game, the move that produced it and the statistics
/// gathered by the simulations that passed through it. Parent and child links are kept
/// by the tree that owns the node.
#[derive(Debug, Clone)]
pub struct MctsNode<T: Board> {
    /// The game state that this node represents.
    pub board: T,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<T::Move>,
    /// The outcome of the game at this node.
    pub outcome: GameOutcome,
    /// Legal moves that have not been expanded into children yet. Only ever shrinks.
    pub untried_moves: Vec<T::Move>,
    /// The number of simulations that passed through this node.
    pub visits: u32,
    /// The sum of rewards from this node's perspective. May be negative.
    pub reward: f64,
}

impl<T: Board> MctsNode<T> {
    /// Creates an unvisited node. Untried moves are seeded from the board's legal moves.
    pub fn new(board: T, prev_move: Option<T::Move>) -> Self {
        let outcome = board.outcome();
        let untried_moves = board.legal_moves();
        MctsNode {
            board,
            prev_move,
            outcome,
            untried_moves,
            visits: 0,
            reward: 0.0,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Mean reward per visit.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// UCT score of this node as a child of a node with `parent_visits` visits.
    ///
    /// Unvisited nodes score +inf. An exploration constant of 0 gives the plain win rate.
    pub fn uct_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        if exploration == 0.0 {
            return self.win_rate();
        }
        self.win_rate()
            + exploration * f64::sqrt(f64::ln(parent_visits as f64) / self.visits as f64)
    }
}

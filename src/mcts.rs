use crate::board::{Board, GameOutcome, Player};
use crate::config::{MctsConfig, RolloutReward};
use crate::error::MctsError;
use crate::mcts_tree::SearchTree;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use ego_tree::NodeId;
use tracing::{debug, trace};

/// Search budget used when the caller has no preference.
pub const DEFAULT_ITERATIONS: u32 = 2000;

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the configuration and the random source. Every call to [`search`] works on
/// a tree owned by the caller, and [`choose_move`] builds a fresh one per call.
///
/// [`search`]: MonteCarloTreeSearch::search
/// [`choose_move`]: MonteCarloTreeSearch::choose_move
#[derive(Debug, Clone)]
pub struct MonteCarloTreeSearch<K: RandomGenerator = StandardRandomGenerator> {
    config: MctsConfig,
    random: K,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
#[derive(Debug, Clone)]
pub struct MonteCarloTreeSearchBuilder<K: RandomGenerator> {
    config: MctsConfig,
    random_generator: K,
}

impl<K: RandomGenerator> MonteCarloTreeSearchBuilder<K> {
    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the exploration constant used during selection.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Sets the rollout scoring rule.
    pub fn with_reward(mut self, reward: RolloutReward) -> Self {
        self.config.reward = reward;
        self
    }

    /// Sets the random number generator used by rollouts.
    pub fn with_random_generator<R: RandomGenerator>(
        self,
        rg: R,
    ) -> MonteCarloTreeSearchBuilder<R> {
        MonteCarloTreeSearchBuilder {
            config: self.config,
            random_generator: rg,
        }
    }

    /// Validates the configuration and builds the engine.
    pub fn build(self) -> Result<MonteCarloTreeSearch<K>, MctsError> {
        self.config.validate()?;
        Ok(MonteCarloTreeSearch {
            config: self.config,
            random: self.random_generator,
        })
    }
}

impl MonteCarloTreeSearch<StandardRandomGenerator> {
    /// Returns a new builder with the default configuration and an unseeded generator.
    pub fn builder() -> MonteCarloTreeSearchBuilder<StandardRandomGenerator> {
        MonteCarloTreeSearchBuilder {
            config: MctsConfig::default(),
            random_generator: StandardRandomGenerator,
        }
    }

    /// Convenience for a one-off search with the default configuration.
    pub fn from_board<T: Board>(board: &T, iterations: u32) -> Result<ChosenMove<T>, MctsError> {
        MonteCarloTreeSearch::default().choose_move(board, iterations)
    }
}

impl Default for MonteCarloTreeSearch<StandardRandomGenerator> {
    fn default() -> Self {
        Self {
            config: MctsConfig::default(),
            random: StandardRandomGenerator,
        }
    }
}

/// The engine's answer for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenMove<T: Board> {
    /// The selected move.
    pub b_move: T::Move,
    /// The player the move was made for.
    pub player: Player,
    /// The board after the move.
    pub board: T,
}

impl<K: RandomGenerator> MonteCarloTreeSearch<K> {
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs `iterations` rounds of selection, expansion, simulation and backpropagation
    /// on `tree`, then returns the move of the root child with the best win rate.
    pub fn search<T: Board>(
        &mut self,
        tree: &mut SearchTree<T>,
        iterations: u32,
    ) -> Result<T::Move, MctsError> {
        let outcome = tree.root().outcome;
        if outcome != GameOutcome::InProgress {
            return Err(MctsError::InvalidState(outcome));
        }

        debug!(
            iterations,
            exploration = self.config.exploration_constant,
            "starting MCTS search"
        );
        for _ in 0..iterations {
            self.do_iteration(tree)?;
        }

        let best_move = tree.best_move()?;
        debug!(
            nodes = tree.len(),
            root_visits = tree.root().visits,
            best_move = ?best_move,
            "MCTS search finished"
        );
        Ok(best_move)
    }

    /// Searches a fresh tree rooted at `board` and plays the chosen move for the player
    /// to move.
    pub fn choose_move<T: Board>(
        &mut self,
        board: &T,
        iterations: u32,
    ) -> Result<ChosenMove<T>, MctsError> {
        let mut tree = SearchTree::new(board.clone());
        let b_move = self.search(&mut tree, iterations)?;
        let player = board.next_player();
        let board = board.apply(b_move, player)?;
        Ok(ChosenMove {
            b_move,
            player,
            board,
        })
    }

    /// Performs one full iteration of the algorithm and returns the node it ended at.
    pub fn do_iteration<T: Board>(&mut self, tree: &mut SearchTree<T>) -> Result<NodeId, MctsError> {
        let selected = tree.select(self.config.exploration_constant);
        let leaf = tree.expand(selected)?;
        let board = &tree
            .get(leaf)
            .ok_or(MctsError::InvariantViolation("expanded node is missing"))?
            .board;
        let reward = self.simulate(board)?;
        tree.backpropagate(leaf, reward)?;

        trace!(
            depth = tree.depth(leaf),
            reward,
            "MCTS simulation complete"
        );
        Ok(leaf)
    }

    /// Plays uniformly random moves from `board` until the game is decided or no move
    /// is left, and scores the result for the player who moved into `board`.
    fn simulate<T: Board>(&mut self, board: &T) -> Result<f64, MctsError> {
        let mover = board.next_player().opponent();
        let mut board = board.clone();
        let mut outcome = board.outcome();

        while !outcome.is_decided() {
            let all_possible_moves = board.legal_moves();
            let Some(&random_move) = self.random.choose(&all_possible_moves) else {
                break;
            };
            let player = board.next_player();
            board = board.apply(random_move, player)?;
            outcome = board.outcome();
        }

        Ok(self.config.reward.score(outcome, mover))
    }
}

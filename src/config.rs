//! Search engine configuration.

use crate::board::{GameOutcome, Player};
use crate::error::MctsError;

/// Default exploration constant for the UCT formula.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// How a finished rollout is scored at the node it started from.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum RolloutReward {
    /// +1 when the rollout ends with either player winning, 0 for a draw or an
    /// unfinished board. The winner does not matter.
    #[default]
    AnyDecisive,
    /// +1 when the player who moved into the node wins, -1 when the opponent wins,
    /// 0 otherwise.
    MoverRelative,
}

impl RolloutReward {
    /// Scores `outcome` for the node whose last move was made by `mover`.
    pub fn score(self, outcome: GameOutcome, mover: Player) -> f64 {
        match (self, outcome) {
            (RolloutReward::AnyDecisive, GameOutcome::Won(_)) => 1.0,
            (RolloutReward::MoverRelative, GameOutcome::Won(winner)) if winner == mover => 1.0,
            (RolloutReward::MoverRelative, GameOutcome::Won(_)) => -1.0,
            _ => 0.0,
        }
    }
}

/// Configuration for Monte Carlo tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant `c` in the UCT score.
    /// Higher values spread visits over more children, 0 is pure exploitation.
    pub exploration_constant: f64,

    /// Rollout scoring rule.
    pub reward: RolloutReward,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            reward: RolloutReward::AnyDecisive,
        }
    }
}

impl MctsConfig {
    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the rollout scoring rule.
    pub fn with_reward(mut self, reward: RolloutReward) -> Self {
        self.reward = reward;
        self
    }

    /// Rejects exploration constants that would poison the UCT scores.
    pub fn validate(&self) -> Result<(), MctsError> {
        let c = self.exploration_constant;
        if !c.is_finite() || c < 0.0 {
            return Err(MctsError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {c}"
            )));
        }
        Ok(())
    }
}

use crate::error::MctsError;
use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// The search engine only ever talks to a game through this trait. Implementations are
/// treated as immutable snapshots: every move produces a fresh board through [`Board::apply`].
pub trait Board: Clone + Debug {
    /// The type representing a move in the game, e.g. a cell coordinate.
    type Move: Copy + PartialEq + Debug;

    /// Returns the player whose turn it is, inferred from the board contents.
    fn next_player(&self) -> Player;

    /// Returns the current outcome of the game.
    fn outcome(&self) -> GameOutcome;

    /// Returns every legal move in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Returns a copy of the board with `player`'s mark placed by `b_move`.
    ///
    /// The receiver is left untouched.
    fn apply(&self, b_move: Self::Move, player: Player) -> Result<Self, MctsError>;
}

/// The two players. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The character used for this player's mark.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The given player completed a line.
    Won(Player),
    /// The board is full and nobody completed a line.
    Draw,
}

impl GameOutcome {
    /// Whether the game is over, either by a win or a draw.
    pub fn is_decided(self) -> bool {
        self != GameOutcome::InProgress
    }

    /// The winner, if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Won(player) => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{GameOutcome, Player};

    #[test]
    fn opponent_flips() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn only_in_progress_is_undecided() {
        assert!(!GameOutcome::InProgress.is_decided());
        assert!(GameOutcome::Draw.is_decided());
        assert!(GameOutcome::Won(Player::O).is_decided());
        assert_eq!(GameOutcome::Won(Player::O).winner(), Some(Player::O));
        assert_eq!(GameOutcome::Draw.winner(), None);
    }
}

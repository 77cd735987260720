use crate::board::GameOutcome;
use thiserror::Error;

/// Errors produced by boards and by the search engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MctsError {
    /// The search was asked to pick a move in a game that is already over.
    #[error("cannot search a finished game: {0:?}")]
    InvalidState(GameOutcome),

    /// Internal consistency failure. Seeing this means a bug in the engine.
    #[error("search invariant violated: {0}")]
    InvariantViolation(&'static str),

    #[error("cell ({row}, {col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("board size {0} is too small, at least 3x3 is required")]
    InvalidBoardSize(usize),

    #[error("malformed board: {0}")]
    ParseBoard(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

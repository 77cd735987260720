use crate::board::{Board, GameOutcome, Player};
use crate::error::MctsError;
use std::fmt;
use std::str::FromStr;

/// Side of the square region that is checked for completed lines.
pub const WIN_REGION: usize = 3;

/// Every winning triple inside the top-left 3x3 region: rows, columns, diagonals.
const WIN_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A cell coordinate, zero-based.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A square three-in-a-row board.
///
/// The grid may be larger than 3x3 for move generation, but only the top-left 3x3 region
/// decides a win. Cells outside that region never produce a winner.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TicTacToeBoard {
    size: usize,
    field: Vec<Option<Player>>,
}

impl TicTacToeBoard {
    /// Creates an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self, MctsError> {
        if size < WIN_REGION {
            return Err(MctsError::InvalidBoardSize(size));
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            field: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the mark at `cell`, or `None` if it is empty or off the board.
    pub fn cell(&self, cell: Move) -> Option<Player> {
        self.index(cell).ok().and_then(|i| self.field[i])
    }

    /// Places `player`'s mark in place. This is how a human move gets onto the board.
    pub fn place(&mut self, cell: Move, player: Player) -> Result<(), MctsError> {
        let i = self.index(cell)?;
        if self.field[i].is_some() {
            return Err(MctsError::InvalidMove {
                row: cell.row,
                col: cell.col,
            });
        }
        self.field[i] = Some(player);
        Ok(())
    }

    fn index(&self, cell: Move) -> Result<usize, MctsError> {
        if cell.row >= self.size || cell.col >= self.size {
            return Err(MctsError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                size: self.size,
            });
        }
        Ok(cell.row * self.size + cell.col)
    }

    fn count(&self, player: Player) -> usize {
        self.field.iter().filter(|x| **x == Some(player)).count()
    }
}

impl Default for TicTacToeBoard {
    /// Creates an empty 3x3 board.
    fn default() -> Self {
        TicTacToeBoard::empty(WIN_REGION)
    }
}

/// Returns a copy of `board` with `player`'s mark at `cell`.
///
/// `board` itself is never modified.
pub fn apply_move(
    board: &TicTacToeBoard,
    cell: Move,
    player: Player,
) -> Result<TicTacToeBoard, MctsError> {
    let mut next = board.clone();
    next.place(cell, player)?;
    Ok(next)
}

impl Board for TicTacToeBoard {
    type Move = Move;

    fn next_player(&self) -> Player {
        if self.count(Player::X) == self.count(Player::O) {
            Player::X
        } else {
            Player::O
        }
    }

    fn outcome(&self) -> GameOutcome {
        for line in WIN_LINES {
            let [first, second, third] = line.map(|(row, col)| self.field[row * self.size + col]);
            if let Some(player) = first {
                if second == first && third == first {
                    return GameOutcome::Won(player);
                }
            }
        }

        if self.field.iter().any(|x| x.is_none()) {
            GameOutcome::InProgress
        } else {
            GameOutcome::Draw
        }
    }

    fn legal_moves(&self) -> Vec<Self::Move> {
        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect()
    }

    fn apply(&self, b_move: Self::Move, player: Player) -> Result<Self, MctsError> {
        apply_move(self, b_move, player)
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 2 - 1);
        for (row, cells) in self.field.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "{rule}")?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    write!(f, "|")?;
                }
                write!(f, "{}", cell.map_or(' ', Player::symbol))?;
            }
        }
        Ok(())
    }
}

impl FromStr for TicTacToeBoard {
    type Err = MctsError;

    /// Parses rows separated by `/` or newlines, using `X`, `O` and `.` for an empty cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let size = rows.len();
        if size < WIN_REGION {
            return Err(MctsError::InvalidBoardSize(size));
        }

        let mut field = Vec::with_capacity(size * size);
        for row in &rows {
            if row.chars().count() != size {
                return Err(MctsError::ParseBoard(format!(
                    "row `{row}` does not have {size} cells"
                )));
            }
            for c in row.chars() {
                field.push(match c {
                    'X' | 'x' => Some(Player::X),
                    'O' | 'o' => Some(Player::O),
                    '.' => None,
                    other => {
                        return Err(MctsError::ParseBoard(format!(
                            "unexpected cell `{other}`"
                        )));
                    }
                });
            }
        }

        let board = Self { size, field };
        let (xs, os) = (board.count(Player::X), board.count(Player::O));
        if xs != os && xs != os + 1 {
            return Err(MctsError::ParseBoard(format!(
                "{xs} X marks and {os} O marks cannot come from alternating turns"
            )));
        }
        Ok(board)
    }
}

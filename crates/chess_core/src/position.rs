use std::fmt;

use crate::{board::BOARD_SIZE, ChessError, ChessResult};

/// A square on the board. Row 0 is black's back rank, row 7 is white's;
/// column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8, // 0-7, top to bottom
    col: u8, // 0-7, left to right
}

impl Position {
    /// Builds a position, rejecting coordinates outside the board.
    pub fn new(row: i32, col: i32) -> ChessResult<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Ok(Self { row: row as u8, col: col as u8 })
        } else {
            Err(ChessError::OutOfBounds { row, col })
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// The square `d_row` rows and `d_col` columns away, if it is on the board.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::new(self.row as i32 + d_row, self.col as i32 + d_col).ok()
    }

    /// Every square, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }

    pub fn from_algebraic(notation: &str) -> ChessResult<Self> {
        let invalid = || ChessError::InvalidNotation(notation.to_string());

        let mut chars = notation.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(invalid()),
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        // Rank 8 is row 0.
        Ok(Self {
            row: b'8' - rank as u8,
            col: file as u8 - b'a',
        })
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

impl std::str::FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

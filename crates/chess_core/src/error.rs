use crate::Position;

/// Errors raised by the rules core.
///
/// An illegal move is not an error: legality queries answer `false` for it.
/// These variants cover malformed requests only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("no piece at {0}")]
    NoPieceAt(Position),

    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("invalid square notation: {0:?}")]
    InvalidNotation(String),

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

pub type ChessResult<T> = Result<T, ChessError>;

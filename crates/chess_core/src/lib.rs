// Core chess rules modules
pub mod board;
pub mod error;
pub mod piece;
pub mod position;
pub mod moves;

// Re-export main types for convenience
pub use board::{Board, BOARD_SIZE};
pub use error::{ChessError, ChessResult};
pub use piece::{Piece, Color, PieceKind, PlacedPiece};
pub use position::Position;
pub use moves::Move;

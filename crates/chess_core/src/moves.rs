use std::fmt;

use crate::{Board, Color, Piece, PieceKind, Position};

/// A requested move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Whether the piece standing on `from` may make this move.
    /// An empty source square is never a valid move.
    pub fn is_valid(&self, board: &Board) -> bool {
        match board.occupant(self.from) {
            Some(piece) => is_legal(piece, self.from, self.to, board),
            None => false,
        }
    }

    fn row_diff(&self) -> i32 {
        self.to.row() as i32 - self.from.row() as i32
    }

    fn col_diff(&self) -> i32 {
        self.to.col() as i32 - self.from.col() as i32
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Legality predicate shared by every piece kind.
pub(crate) fn is_legal(piece: Piece, from: Position, to: Position, board: &Board) -> bool {
    let chess_move = Move::new(from, to);

    if from == to {
        return false;
    }

    // Own pieces can never be captured
    if let Some(dest_piece) = board.occupant(to) {
        if dest_piece.color == piece.color {
            return false;
        }
    }

    let verdict = match piece.kind {
        PieceKind::Pawn => chess_move.is_valid_pawn_move(piece.color, board),
        PieceKind::Knight => chess_move.is_valid_knight_move(),
        PieceKind::Bishop => chess_move.is_valid_diagonal_move(board),
        PieceKind::Rook => chess_move.is_valid_straight_move(board),
        PieceKind::Queen => {
            chess_move.is_valid_diagonal_move(board) || chess_move.is_valid_straight_move(board)
        }
        PieceKind::King => chess_move.is_valid_king_move(),
    };

    log::trace!("{piece} {chess_move}: {verdict}");
    verdict
}

impl Move {
    fn is_valid_pawn_move(&self, color: Color, board: &Board) -> bool {
        let direction = color.forward();
        let row_diff = self.row_diff();
        let col_diff = self.col_diff();

        if col_diff == 0 {
            if !board.is_empty(self.to) {
                return false;
            }
            if row_diff == direction {
                return true;
            }
            // Initial two-square move
            if self.from.row() == color.pawn_start_row() && row_diff == 2 * direction {
                return self
                    .from
                    .offset(direction, 0)
                    .is_some_and(|intermediate| board.is_empty(intermediate));
            }
            return false;
        }

        // Diagonal capture, enemy occupant only
        if col_diff.abs() == 1 && row_diff == direction {
            return board.occupant(self.to).is_some_and(|target| target.color != color);
        }

        false
    }

    fn is_valid_knight_move(&self) -> bool {
        let row_diff = self.row_diff().abs();
        let col_diff = self.col_diff().abs();

        (row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2)
    }

    fn is_valid_diagonal_move(&self, board: &Board) -> bool {
        if self.row_diff().abs() != self.col_diff().abs() {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_straight_move(&self, board: &Board) -> bool {
        if self.row_diff() != 0 && self.col_diff() != 0 {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_king_move(&self) -> bool {
        self.row_diff().abs() <= 1 && self.col_diff().abs() <= 1
    }

    /// Squares strictly between `from` and `to` are empty. Only meaningful
    /// for straight or diagonal lines.
    fn is_path_clear(&self, board: &Board) -> bool {
        let row_step = self.row_diff().signum();
        let col_step = self.col_diff().signum();

        let mut current = self.from.offset(row_step, col_step);
        while let Some(pos) = current {
            if pos == self.to {
                return true;
            }
            if !board.is_empty(pos) {
                return false;
            }
            current = pos.offset(row_step, col_step);
        }

        true
    }
}

use std::fmt;
use std::str::FromStr;

use crate::{ChessError, ChessResult, Color, Move, Piece, PieceKind, PlacedPiece, Position};

pub const BOARD_SIZE: usize = 8;

const BACK_ROW: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 grid of optional occupants, indexed `[row][col]`.
///
/// The grid is the only record of where pieces stand; [`PlacedPiece`]
/// views are read back from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// A board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Clears the board and lays out both armies.
    pub fn setup_initial_position(&mut self) {
        self.squares = [[None; BOARD_SIZE]; BOARD_SIZE];

        for color in [Color::White, Color::Black] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_start_row() as usize;

            for (col, &kind) in BACK_ROW.iter().enumerate() {
                self.squares[back][col] = Some(Piece::new(kind, color));
                self.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }

        log::debug!("initial position set up");
    }

    pub fn occupant(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize]
    }

    /// Occupancy lookup by raw coordinates; off-board coordinates are an error.
    pub fn occupant_at(&self, row: i32, col: i32) -> ChessResult<Option<Piece>> {
        Ok(self.occupant(Position::new(row, col)?))
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.occupant(pos).is_none()
    }

    pub fn placed(&self, pos: Position) -> Option<PlacedPiece> {
        self.occupant(pos).map(|piece| PlacedPiece { piece, position: pos })
    }

    /// All pieces on the board, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        Position::all().filter_map(move |pos| self.placed(pos))
    }

    /// Puts `piece` on `pos`, returning whatever stood there.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize].replace(piece)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize].take()
    }

    /// Moves the occupant of `from` to `to` in one step and returns the
    /// piece it displaced. Legality is not checked here.
    pub fn set_position(&mut self, from: Position, to: Position) -> ChessResult<Option<Piece>> {
        let piece = self.remove(from).ok_or(ChessError::NoPieceAt(from))?;
        let captured = self.place(to, piece);
        log::debug!("{piece} {from} -> {to}");
        Ok(captured)
    }

    /// Checks the move against the mover's legality rule, then applies it.
    pub fn make_move(&mut self, chess_move: Move) -> ChessResult<Option<Piece>> {
        if !self.is_valid_move(chess_move.from, chess_move.to)? {
            log::warn!("rejected illegal move {chess_move}");
            return Err(ChessError::IllegalMove {
                from: chess_move.from,
                to: chess_move.to,
            });
        }

        self.set_position(chess_move.from, chess_move.to)
    }

    /// Legality of moving the piece on `from` to `to`.
    pub fn is_valid_move(&self, from: Position, to: Position) -> ChessResult<bool> {
        let piece = self.occupant(from).ok_or(ChessError::NoPieceAt(from))?;
        Ok(piece.is_valid_move(from, to, self))
    }

    pub fn legal_targets(&self, from: Position) -> ChessResult<Vec<Position>> {
        let placed = self.placed(from).ok_or(ChessError::NoPieceAt(from))?;
        placed.legal_targets(self)
    }

    /// Every move the pieces of `color` could make, ignoring check.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.pieces()
            .filter(|placed| placed.color() == color)
            .flat_map(|placed| {
                // Fresh from this board, so never stale
                placed
                    .legal_targets(self)
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |to| Move::new(placed.position, to))
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// One line per row, row 0 first: `.` for empty, upper case white, lower case black.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.squares.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for square in row {
                write!(f, "{}", square.map_or('.', |piece| piece.symbol()))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() != BOARD_SIZE {
            return Err(ChessError::InvalidLayout(format!(
                "expected {BOARD_SIZE} rows, found {}",
                lines.len()
            )));
        }

        let mut board = Self::empty();
        for (row, line) in lines.iter().enumerate() {
            let count = line.chars().count();
            if count != BOARD_SIZE {
                return Err(ChessError::InvalidLayout(format!("row {row} has {count} squares")));
            }

            for (col, symbol) in line.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol).ok_or_else(|| {
                    ChessError::InvalidLayout(format!("unknown symbol {symbol:?} at row {row}"))
                })?;
                board.squares[row][col] = Some(piece);
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str =
        "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR";

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_position_layout() {
        let board = Board::new();
        assert_eq!(board.to_string(), START);
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces().filter(|p| p.color() == Color::White).count(), 16);

        assert_eq!(board.occupant(pos(0, 3)), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.occupant(pos(7, 4)), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.occupant(pos(4, 4)), None);
    }

    #[test]
    fn test_setup_resets_board() {
        let mut board = Board::empty();
        board.place(pos(4, 4), Piece::new(PieceKind::Queen, Color::White));
        board.setup_initial_position();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_occupant_at_fails_fast() {
        let board = Board::new();
        assert_eq!(board.occupant_at(7, 0), Ok(Some(Piece::new(PieceKind::Rook, Color::White))));
        assert_eq!(board.occupant_at(3, 3), Ok(None));
        assert_eq!(board.occupant_at(8, 0), Err(ChessError::OutOfBounds { row: 8, col: 0 }));
        assert_eq!(board.occupant_at(0, -1), Err(ChessError::OutOfBounds { row: 0, col: -1 }));
    }

    #[test]
    fn test_layout_round_trip() {
        let board: Board = START.parse().unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_layout_rejects_malformed_input() {
        assert!(matches!("".parse::<Board>(), Err(ChessError::InvalidLayout(_))));
        assert!(matches!(
            "rnbqkbnr\npppppppp\n........".parse::<Board>(),
            Err(ChessError::InvalidLayout(_))
        ));
        let bad_symbol = START.replace('q', "x");
        assert!(matches!(bad_symbol.parse::<Board>(), Err(ChessError::InvalidLayout(_))));
        let short_row = START.replacen("........", ".......", 1);
        assert!(matches!(short_row.parse::<Board>(), Err(ChessError::InvalidLayout(_))));
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let knight = Piece::new(PieceKind::Knight, Color::White);

        assert_eq!(board.place(pos(2, 2), rook), None);
        assert_eq!(board.place(pos(2, 2), knight), Some(rook));
        assert_eq!(board.remove(pos(2, 2)), Some(knight));
        assert!(board.is_empty(pos(2, 2)));
        assert_eq!(board.remove(pos(2, 2)), None);
    }

    #[test]
    fn test_set_position_moves_and_captures() {
        let mut board = Board::new();

        // The setter does not care about legality.
        let captured = board.set_position(pos(7, 0), pos(0, 0)).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert!(board.is_empty(pos(7, 0)));

        let rook = board.placed(pos(0, 0)).unwrap();
        assert_eq!((rook.row(), rook.col()), (0, 0));
        assert_eq!(rook.color(), Color::White);

        assert_eq!(
            board.set_position(pos(4, 4), pos(3, 4)),
            Err(ChessError::NoPieceAt(pos(4, 4)))
        );
    }

    #[test]
    fn test_make_move_checks_legality() {
        let mut board = Board::new();
        let e2 = pos(6, 4);
        let e4 = pos(4, 4);
        let e5 = pos(3, 4);

        assert_eq!(board.make_move(Move::new(e2, e4)), Ok(None));
        assert_eq!(board.occupant(e4), Some(Piece::new(PieceKind::Pawn, Color::White)));

        // Double step is gone once the pawn has left its start row.
        let before = board.clone();
        assert_eq!(
            board.make_move(Move::new(e4, pos(2, 4))),
            Err(ChessError::IllegalMove { from: e4, to: pos(2, 4) })
        );
        assert_eq!(board, before);

        assert_eq!(board.make_move(Move::new(e4, e5)), Ok(None));
        assert_eq!(
            board.make_move(Move::new(pos(4, 4), e5)),
            Err(ChessError::NoPieceAt(pos(4, 4)))
        );
    }

    #[test]
    fn test_legal_targets_requires_piece() {
        let board = Board::new();
        assert_eq!(board.legal_targets(pos(4, 4)), Err(ChessError::NoPieceAt(pos(4, 4))));
        assert_eq!(board.legal_targets(pos(7, 1)).unwrap(), vec![pos(5, 0), pos(5, 2)]);
    }

    #[test]
    fn test_starting_move_counts() {
        let board = Board::new();
        assert_eq!(board.legal_moves(Color::White).len(), 20);
        assert_eq!(board.legal_moves(Color::Black).len(), 20);
    }
}

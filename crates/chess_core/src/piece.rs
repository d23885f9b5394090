use std::fmt;

use crate::{Board, ChessError, ChessResult, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step: white pawns advance toward row 0.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pawns start on, the only row allowing a double step.
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Letter used by the text board layout, upper case regardless of color.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Identity of a piece. Where it stands is owned by the [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Upper case for white, lower case for black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let kind = PieceKind::from_symbol(symbol)?;
        let color = if symbol.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self::new(kind, color))
    }

    /// Whether this piece, standing on `from`, may move to `to` on `board`.
    ///
    /// Pure: neither the board nor the piece is touched. Check safety and
    /// turn order are the caller's business.
    pub fn is_valid_move(&self, from: Position, to: Position, board: &Board) -> bool {
        crate::moves::is_legal(*self, from, to, board)
    }
}

impl fmt::Display for Piece {
    /// Prints the `color_kind` key, e.g. `white_pawn`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.color.name(), self.kind.name())
    }
}

/// A piece together with the square it occupies, as read from a board.
///
/// Only a board lookup builds one. Queries re-read the grid and fail with
/// [`ChessError::NoPieceAt`] once the piece no longer stands on that square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub(crate) piece: Piece,
    pub(crate) position: Position,
}

impl PlacedPiece {
    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> u8 {
        self.position.row()
    }

    pub fn col(&self) -> u8 {
        self.position.col()
    }

    pub fn color(&self) -> Color {
        self.piece.color
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    pub fn name(&self) -> &'static str {
        self.piece.name()
    }

    /// Raw-coordinate legality query. Targets off the board are rejected
    /// with an error instead of being answered `false`.
    pub fn is_valid_move(
        &self,
        target_row: i32,
        target_col: i32,
        board: &Board,
    ) -> ChessResult<bool> {
        self.ensure_on(board)?;
        let target = Position::new(target_row, target_col)?;
        Ok(self.piece.is_valid_move(self.position, target, board))
    }

    pub fn legal_targets(&self, board: &Board) -> ChessResult<Vec<Position>> {
        self.ensure_on(board)?;
        Ok(Position::all()
            .filter(|&to| self.piece.is_valid_move(self.position, to, board))
            .collect())
    }

    // The view is stale if the board moved or replaced the piece since the lookup.
    fn ensure_on(&self, board: &Board) -> ChessResult<()> {
        if board.occupant(self.position) == Some(self.piece) {
            Ok(())
        } else {
            Err(ChessError::NoPieceAt(self.position))
        }
    }
}

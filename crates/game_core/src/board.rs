use serde::{Deserialize, Serialize};

use crate::{Color, GameMode, MoveRecord, Piece, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8x8 grid of optional pieces, indexed `[row][col]` with row 0 at the top (rank 8).
///
/// Pieces are plain values, so copying a board for a simulated move never shares
/// state with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn initial(mode: GameMode) -> Self {
        let mut board = Self::empty();
        match mode {
            GameMode::Chess => board.setup_chess(),
            GameMode::Checkers => board.setup_checkers(),
        }
        board
    }

    fn setup_chess(&mut self) {
        for col in 0..8u8 {
            self.put(Square { row: 1, col }, Piece::new(PieceType::Pawn, Color::Black));
            self.put(Square { row: 6, col }, Piece::new(PieceType::Pawn, Color::White));
        }

        for (col, &piece_type) in (0..8u8).zip(BACK_RANK.iter()) {
            self.put(Square { row: 0, col }, Piece::new(piece_type, Color::Black));
            self.put(Square { row: 7, col }, Piece::new(piece_type, Color::White));
        }
    }

    fn setup_checkers(&mut self) {
        for sq in Square::all().filter(|sq| sq.is_dark()) {
            match sq.row {
                0..=2 => self.put(sq, Piece::new(PieceType::Man, Color::Black)),
                5..=7 => self.put(sq, Piece::new(PieceType::Man, Color::White)),
                _ => {}
            }
        }
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row as usize][sq.col as usize] = piece;
    }

    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.set(sq, Some(piece));
    }

    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize].take()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceType::King, color))
            .map(|(sq, _)| sq)
    }

    /// Commits a described move: clears the captured square, relocates the rook on
    /// castling, marks the piece as moved and promotes on the far row.
    pub fn apply_move(&mut self, mv: &MoveRecord) {
        let Some(mut piece) = self.take(mv.from) else {
            return;
        };

        if let Some(capture) = mv.captured {
            self.set(capture.square, None);
        }

        if mv.is_castling() {
            let row = mv.from.row;
            let (rook_from, rook_to) = if mv.to.col > mv.from.col { (7, 5) } else { (0, 3) };
            if let Some(mut rook) = self.take(Square { row, col: rook_from }) {
                rook.has_moved = true;
                self.put(Square { row, col: rook_to }, rook);
            }
        }

        piece.has_moved = true;
        let far_row = match piece.color {
            Color::White => 0,
            Color::Black => 7,
        };
        if mv.to.row == far_row {
            piece.piece_type = match piece.piece_type {
                PieceType::Pawn => PieceType::Queen,
                PieceType::Man => PieceType::CheckersKing,
                other => other,
            };
        }

        self.put(mv.to, piece);
    }

    /// Copy of the board with `mv` applied.
    pub fn after(&self, mv: &MoveRecord) -> Board {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    /// Describes and applies `from -> to`, returning the record. `None` when `from` is empty.
    pub fn play(&mut self, from: Square, to: Square, mode: GameMode) -> Option<MoveRecord> {
        let mv = MoveRecord::describe(self, from, to, mode)?;
        self.apply_move(&mv);
        Some(mv)
    }
}

use serde::{Deserialize, Serialize};

use crate::{Board, GameMode, Piece, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub piece: Piece,
    pub square: Square,
}

/// A chosen move, as handed to the board owner and the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Capture>,
    #[serde(default)]
    pub is_jump: bool,
}

impl MoveRecord {
    /// Builds the record for `from -> to` on `board`. The move is not checked for
    /// legality; only `from` must hold a piece.
    pub fn describe(board: &Board, from: Square, to: Square, mode: GameMode) -> Option<Self> {
        let piece = board.get(from)?;
        let row_delta = (to.row as i8 - from.row as i8).abs();

        let (captured, is_jump) = match mode {
            GameMode::Checkers if row_delta == 2 => {
                let over = Square {
                    row: (from.row + to.row) / 2,
                    col: (from.col + to.col) / 2,
                };
                (board.get(over).map(|piece| Capture { piece, square: over }), true)
            }
            GameMode::Checkers => (None, false),
            GameMode::Chess => {
                let captured = match board.get(to) {
                    Some(target) => Some(Capture { piece: target, square: to }),
                    // en passant: the victim sits beside the pawn, not on the destination
                    None if piece.piece_type == PieceType::Pawn && from.col != to.col => {
                        let beside = Square { row: from.row, col: to.col };
                        board
                            .get(beside)
                            .map(|victim| Capture { piece: victim, square: beside })
                    }
                    None => None,
                };
                (captured, false)
            }
        };

        Some(Self { from, to, piece, captured, is_jump })
    }

    pub fn is_castling(&self) -> bool {
        self.piece.piece_type == PieceType::King && (self.to.col as i8 - self.from.col as i8).abs() == 2
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.piece_type == PieceType::Pawn && (self.to.row as i8 - self.from.row as i8).abs() == 2
    }

    /// Four-character `from + to` form, e.g. `e2e4`.
    pub fn uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

use log::trace;

use super::RuleSet;
use crate::{status::is_king_in_check, Board, Color, GameMode, MoveRecord, Piece, PieceType, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

const STRAIGHT: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KING_HOME_COL: u8 = 4;

pub struct ChessRules;

impl RuleSet for ChessRules {
    fn pseudo_moves(
        &self,
        board: &Board,
        from: Square,
        last_move: Option<&MoveRecord>,
        allow_castling: bool,
    ) -> Vec<Square> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };

        match piece.piece_type {
            PieceType::Pawn => pawn_moves(board, from, piece.color, last_move),
            PieceType::Rook => slide(board, from, piece.color, &STRAIGHT),
            PieceType::Bishop => slide(board, from, piece.color, &DIAGONAL),
            PieceType::Queen => {
                let mut moves = slide(board, from, piece.color, &STRAIGHT);
                moves.extend(slide(board, from, piece.color, &DIAGONAL));
                moves
            }
            PieceType::Knight => hop(board, from, piece.color, &KNIGHT_OFFSETS),
            PieceType::King => {
                let mut moves = hop(board, from, piece.color, &KING_OFFSETS);
                if allow_castling {
                    moves.extend(castling_moves(board, from, piece));
                }
                moves
            }
            PieceType::Man | PieceType::CheckersKing => Vec::new(),
        }
    }

    fn legal_moves(&self, board: &Board, from: Square, last_move: Option<&MoveRecord>) -> Vec<Square> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };

        self.pseudo_moves(board, from, last_move, true)
            .into_iter()
            .filter(|&to| {
                let Some(mv) = MoveRecord::describe(board, from, to, GameMode::Chess) else {
                    return false;
                };
                let safe = !is_king_in_check(&board.after(&mv), piece.color);
                if !safe {
                    trace!("{}{} leaves the {:?} king attacked", from, to, piece.color);
                }
                safe
            })
            .collect()
    }
}

fn slide(board: &Board, from: Square, color: Color, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.get(next) {
                None => moves.push(next),
                Some(other) => {
                    if other.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    moves
}

fn hop(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| board.get(to).map_or(true, |other| other.color != color))
        .collect()
}

fn pawn_moves(board: &Board, from: Square, color: Color, last_move: Option<&MoveRecord>) -> Vec<Square> {
    let dir = color.forward();
    let start_row = match color {
        Color::White => 6,
        Color::Black => 1,
    };
    let mut moves = Vec::new();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(one);
            if from.row == start_row {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(dir, d_col) else {
            continue;
        };
        match board.get(target) {
            Some(other) if other.color != color => moves.push(target),
            Some(_) => {}
            None => {
                if en_passant_target(from, color, last_move) == Some(target) {
                    moves.push(target);
                }
            }
        }
    }

    moves
}

/// Square a pawn on `from` may capture into en passant, given the previous move.
fn en_passant_target(from: Square, color: Color, last_move: Option<&MoveRecord>) -> Option<Square> {
    let last = last_move?;
    if last.piece.color == color || !last.is_double_pawn_push() {
        return None;
    }
    if last.to.row != from.row || (last.to.col as i8 - from.col as i8).abs() != 1 {
        return None;
    }
    Square::new(from.row as i8 + color.forward(), last.to.col as i8)
}

fn castling_moves(board: &Board, from: Square, king: Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    if king.has_moved || from.col != KING_HOME_COL {
        return moves;
    }

    let enemy = king.color.opponent();
    if is_square_attacked(board, from, enemy) {
        return moves;
    }

    let row = from.row;
    let at = |col: u8| Square { row, col };
    let rook_ready = |col: u8| {
        board
            .get(at(col))
            .map_or(false, |rook| rook.is(PieceType::Rook, king.color) && !rook.has_moved)
    };
    let clear = |cols: &[u8]| cols.iter().all(|&col| board.is_empty(at(col)));
    let safe = |cols: &[u8]| cols.iter().all(|&col| !is_square_attacked(board, at(col), enemy));

    if rook_ready(7) && clear(&[5, 6]) && safe(&[5, 6]) {
        moves.push(at(6));
    }
    if rook_ready(0) && clear(&[1, 2, 3]) && safe(&[3, 2]) {
        moves.push(at(2));
    }

    moves
}

/// Whether any `attacker` piece could move onto `target`. Pawns attack their two
/// forward diagonals whether or not the square is occupied; castling is never an attack.
/// This is not pseudo-move reachability: a pawn push onto `target` does not attack it.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board.pieces_of(attacker).any(|(sq, piece)| match piece.piece_type {
        PieceType::Pawn => {
            target.row as i8 - sq.row as i8 == attacker.forward() && (target.col as i8 - sq.col as i8).abs() == 1
        }
        _ => ChessRules.pseudo_moves(board, sq, None, false).contains(&target),
    })
}

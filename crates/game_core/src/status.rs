use serde::{Deserialize, Serialize};

use crate::rules::{has_legal_move, is_square_attacked};
use crate::{Board, Color, GameMode, MoveRecord, PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// Neither side has the material to mate.
    Draw,
    /// Checkers: the side to move has nothing to play.
    Won { winner: Color },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .map_or(false, |king| is_square_attacked(board, king, color.opponent()))
}

pub fn is_checkmate(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> bool {
    is_king_in_check(board, color) && !has_legal_move(board, color, GameMode::Chess, last_move)
}

pub fn is_stalemate(board: &Board, color: Color, last_move: Option<&MoveRecord>) -> bool {
    !is_king_in_check(board, color) && !has_legal_move(board, color, GameMode::Chess, last_move)
}

pub fn has_insufficient_material(board: &Board) -> bool {
    let mut white = Vec::new();
    let mut black = Vec::new();
    for (sq, piece) in board.pieces() {
        if piece.piece_type == PieceType::King {
            continue;
        }
        match piece.color {
            Color::White => white.push((sq, piece.piece_type)),
            Color::Black => black.push((sq, piece.piece_type)),
        }
    }

    let is_minor = |t: PieceType| matches!(t, PieceType::Bishop | PieceType::Knight);
    match (white.as_slice(), black.as_slice()) {
        ([], []) => true,
        ([(_, t)], []) | ([], [(_, t)]) => is_minor(*t),
        // bishops on the same square colour
        ([(w, PieceType::Bishop)], [(b, PieceType::Bishop)]) => w.is_dark() == b.is_dark(),
        _ => false,
    }
}

pub fn game_status(board: &Board, mode: GameMode, to_move: Color, last_move: Option<&MoveRecord>) -> GameStatus {
    match mode {
        GameMode::Chess => {
            if !has_legal_move(board, to_move, mode, last_move) {
                if is_king_in_check(board, to_move) {
                    GameStatus::Checkmate { winner: to_move.opponent() }
                } else {
                    GameStatus::Stalemate
                }
            } else if has_insufficient_material(board) {
                GameStatus::Draw
            } else {
                GameStatus::Ongoing
            }
        }
        GameMode::Checkers => {
            if has_legal_move(board, to_move, mode, last_move) {
                GameStatus::Ongoing
            } else {
                GameStatus::Won { winner: to_move.opponent() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::from_fen;
    use crate::{Piece, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::initial(GameMode::Chess);
        let mut last = None;
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            last = board.play(sq(from), sq(to), GameMode::Chess);
        }

        assert!(is_king_in_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White, last.as_ref()));
        assert!(!is_stalemate(&board, Color::White, last.as_ref()));
        assert_eq!(
            game_status(&board, GameMode::Chess, Color::White, last.as_ref()),
            GameStatus::Checkmate { winner: Color::Black }
        );
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let (board, _) = from_fen("7k/5Q2/6K1/8/8/8/8/8 b", GameMode::Chess).unwrap();
        assert!(is_stalemate(&board, Color::Black, None));
        assert!(!is_checkmate(&board, Color::Black, None));
        assert_eq!(game_status(&board, GameMode::Chess, Color::Black, None), GameStatus::Stalemate);
    }

    #[test]
    fn no_king_is_never_in_check() {
        let board = Board::initial(GameMode::Checkers);
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn insufficient_material_cases() {
        let bare = |fen| from_fen(fen, GameMode::Chess).unwrap().0;
        assert!(has_insufficient_material(&bare("4k3/8/8/8/8/8/8/4K3 w")));
        assert!(has_insufficient_material(&bare("4k3/8/8/8/8/8/8/4KN2 w")));
        // c1 and f8 are both dark squares
        assert!(has_insufficient_material(&bare("4kb2/8/8/8/8/8/8/2B1K3 w")));
        assert!(!has_insufficient_material(&bare("4k3/8/8/8/8/8/8/4KR2 w")));
        assert!(!has_insufficient_material(&Board::initial(GameMode::Chess)));
    }

    #[test]
    fn blocked_checkers_side_loses() {
        let mut board = Board::empty();
        // white man on a1 facing a black man on b2 backed by c3
        board.put(sq("a1"), Piece::new(PieceType::Man, Color::White));
        board.put(sq("b2"), Piece::new(PieceType::Man, Color::Black));
        board.put(sq("c3"), Piece::new(PieceType::Man, Color::Black));

        assert_eq!(
            game_status(&board, GameMode::Checkers, Color::White, None),
            GameStatus::Won { winner: Color::Black }
        );
        assert_eq!(game_status(&board, GameMode::Checkers, Color::Black, None), GameStatus::Ongoing);
    }
}

use log::trace;

use super::RuleSet;
use crate::{Board, Color, MoveRecord, Piece, PieceType, Square};

const WHITE_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const BLACK_MAN_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub struct CheckersRules;

fn directions(piece: Piece) -> &'static [(i8, i8)] {
    match (piece.piece_type, piece.color) {
        (PieceType::CheckersKing, _) => &KING_DIRECTIONS,
        (_, Color::White) => &WHITE_MAN_DIRECTIONS,
        (_, Color::Black) => &BLACK_MAN_DIRECTIONS,
    }
}

impl CheckersRules {
    /// Jump destinations for the piece on `from`. Men may not jump kings.
    pub fn captures(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some(piece) = board.get(from).filter(|p| p.piece_type.is_checkers()) else {
            return Vec::new();
        };

        let mut jumps = Vec::new();
        for &(d_row, d_col) in directions(piece) {
            let (Some(over), Some(landing)) = (from.offset(d_row, d_col), from.offset(2 * d_row, 2 * d_col)) else {
                continue;
            };
            let Some(victim) = board.get(over) else {
                continue;
            };
            if victim.color == piece.color {
                continue;
            }
            if piece.piece_type == PieceType::Man && victim.piece_type == PieceType::CheckersKing {
                continue;
            }
            if board.is_empty(landing) {
                jumps.push(landing);
            }
        }
        jumps
    }

    /// Whether any piece of `color` has a jump somewhere on the board.
    pub fn side_has_capture(&self, board: &Board, color: Color) -> bool {
        board
            .pieces_of(color)
            .any(|(sq, _)| !self.captures(board, sq).is_empty())
    }
}

impl RuleSet for CheckersRules {
    fn pseudo_moves(
        &self,
        board: &Board,
        from: Square,
        _last_move: Option<&MoveRecord>,
        _allow_castling: bool,
    ) -> Vec<Square> {
        let Some(piece) = board.get(from).filter(|p| p.piece_type.is_checkers()) else {
            return Vec::new();
        };

        let jumps = self.captures(board, from);
        if !jumps.is_empty() {
            return jumps;
        }

        directions(piece)
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .filter(|&to| board.is_empty(to))
            .collect()
    }

    fn legal_moves(&self, board: &Board, from: Square, last_move: Option<&MoveRecord>) -> Vec<Square> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };

        let mut moves = self.pseudo_moves(board, from, last_move, false);
        if self.side_has_capture(board, piece.color) {
            trace!("capture available for {:?}, restricting {} to jumps", piece.color, from);
            moves.retain(|to| (to.row as i8 - from.row as i8).abs() == 2);
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn man(color: Color) -> Piece {
        Piece::new(PieceType::Man, color)
    }

    fn king(color: Color) -> Piece {
        Piece::new(PieceType::CheckersKing, color)
    }

    #[test]
    fn men_step_toward_the_opponent() {
        let board = Board::initial(crate::GameMode::Checkers);
        let mut white = CheckersRules.legal_moves(&board, sq("c3"), None);
        white.sort();
        assert_eq!(white, vec![sq("b4"), sq("d4")]);

        let mut black = CheckersRules.legal_moves(&board, sq("d6"), None);
        black.sort();
        assert_eq!(black, vec![sq("c5"), sq("e5")]);

        // back-row men are blocked by their own side
        assert!(CheckersRules.legal_moves(&board, sq("a1"), None).is_empty());
    }

    #[test]
    fn capture_replaces_simple_moves() {
        let mut board = Board::empty();
        board.put(sq("c3"), man(Color::White));
        board.put(sq("d4"), man(Color::Black));

        assert_eq!(CheckersRules.pseudo_moves(&board, sq("c3"), None, false), vec![sq("e5")]);
    }

    #[test]
    fn jump_needs_empty_landing() {
        let mut board = Board::empty();
        board.put(sq("c3"), man(Color::White));
        board.put(sq("d4"), man(Color::Black));
        board.put(sq("e5"), man(Color::Black));

        assert_eq!(CheckersRules.pseudo_moves(&board, sq("c3"), None, false), vec![sq("b4")]);
    }

    #[test]
    fn man_cannot_capture_king() {
        let mut board = Board::empty();
        board.put(sq("c3"), man(Color::White));
        board.put(sq("d4"), king(Color::Black));

        assert_eq!(CheckersRules.pseudo_moves(&board, sq("c3"), None, false), vec![sq("b4")]);

        board.put(sq("c3"), king(Color::White));
        assert_eq!(CheckersRules.pseudo_moves(&board, sq("c3"), None, false), vec![sq("e5")]);
    }

    #[test]
    fn king_moves_backwards_too() {
        let mut board = Board::empty();
        board.put(sq("d4"), king(Color::Black));
        assert_eq!(CheckersRules.pseudo_moves(&board, sq("d4"), None, false).len(), 4);
    }

    #[test]
    fn mandatory_capture_freezes_other_pieces() {
        let mut board = Board::empty();
        board.put(sq("c3"), man(Color::White));
        board.put(sq("d4"), man(Color::Black));
        board.put(sq("g3"), man(Color::White));

        assert!(CheckersRules.side_has_capture(&board, Color::White));
        assert!(CheckersRules.legal_moves(&board, sq("g3"), None).is_empty());
        assert_eq!(CheckersRules.legal_moves(&board, sq("c3"), None), vec![sq("e5")]);
    }

    #[test]
    fn chess_pieces_do_not_move_under_checkers_rules() {
        let mut board = Board::empty();
        board.put(sq("d4"), Piece::new(PieceType::Queen, Color::White));
        assert!(CheckersRules.legal_moves(&board, sq("d4"), None).is_empty());
    }
}

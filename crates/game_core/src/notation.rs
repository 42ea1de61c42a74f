//! Text forms of boards, squares and moves.
//!
//! [`to_fen`] writes checkers boards with chess letters (men as pawns, kings as
//! kings). That output is a convenience for move-suggestion services and logs,
//! not a standard checkers FEN, and it cannot be read back without knowing the mode.

use crate::rules::all_legal_moves;
use crate::{Board, Color, CoreError, CoreResult, GameMode, MoveRecord, Piece, PieceType, Square};

/// Piece placement and side to move, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`.
pub fn to_fen(board: &Board, turn: Color) -> String {
    format!("{} {}", placement(board), turn.fen_char())
}

/// Six-field FEN. Castling rights come from the unmoved-king/rook flags and the
/// en-passant field from the last move.
pub fn to_full_fen(board: &Board, turn: Color, last_move: Option<&MoveRecord>) -> String {
    let en_passant = last_move
        .filter(|mv| mv.is_double_pawn_push())
        .map(|mv| {
            Square {
                row: (mv.from.row + mv.to.row) / 2,
                col: mv.from.col,
            }
            .to_algebraic()
        })
        .unwrap_or_else(|| "-".to_string());

    format!("{} {} {} {} 0 1", placement(board), turn.fen_char(), castling_field(board), en_passant)
}

fn placement(board: &Board) -> String {
    let mut fen = String::with_capacity(64);
    for row in 0..8u8 {
        let mut empty = 0;
        for col in 0..8u8 {
            match board.get(Square { row, col }) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if row < 7 {
            fen.push('/');
        }
    }
    fen
}

fn castling_field(board: &Board) -> String {
    let unmoved = |sq: &str, piece_type: PieceType, color: Color| {
        Square::from_algebraic(sq)
            .and_then(|sq| board.get(sq))
            .map_or(false, |p| p.is(piece_type, color) && !p.has_moved)
    };

    let mut field = String::new();
    for (color, king, rooks) in [
        (Color::White, "e1", [("h1", 'K'), ("a1", 'Q')]),
        (Color::Black, "e8", [("h8", 'k'), ("a8", 'q')]),
    ] {
        if !unmoved(king, PieceType::King, color) {
            continue;
        }
        for (rook, flag) in rooks {
            if unmoved(rook, PieceType::Rook, color) {
                field.push(flag);
            }
        }
    }

    if field.is_empty() {
        field.push('-');
    }
    field
}

/// Parses the placement field (and side to move, defaulting to white). In checkers
/// mode `P/p` become men and `K/k` checkers kings. Pieces off their home squares are
/// marked as moved.
pub fn from_fen(fen: &str, mode: GameMode) -> CoreResult<(Board, Color)> {
    let invalid = |reason: &str| CoreError::InvalidFen {
        fen: fen.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or_else(|| invalid("empty string"))?;
    let turn = match fields.next() {
        None => Color::White,
        Some(side) => {
            let mut chars = side.chars();
            match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                (Some(color), None) => color,
                _ => return Err(invalid("side to move must be 'w' or 'b'")),
            }
        }
    };

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid("expected 8 ranks"));
    }

    let mut board = Board::empty();
    for (row, rank) in rows.iter().enumerate() {
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                continue;
            }
            if col >= 8 {
                return Err(invalid("rank too long"));
            }
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let piece_type = piece_type_for(c.to_ascii_lowercase(), mode).ok_or_else(|| invalid("unknown piece letter"))?;
            let sq = Square {
                row: row as u8,
                col: col as u8,
            };
            let mut piece = Piece::new(piece_type, color);
            piece.has_moved = !on_home_square(piece, sq);
            board.put(sq, piece);
            col += 1;
        }
        if col != 8 {
            return Err(invalid("rank does not cover 8 files"));
        }
    }

    Ok((board, turn))
}

fn piece_type_for(letter: char, mode: GameMode) -> Option<PieceType> {
    match (mode, letter) {
        (GameMode::Checkers, 'p') => Some(PieceType::Man),
        (GameMode::Checkers, 'k') => Some(PieceType::CheckersKing),
        (GameMode::Checkers, _) => None,
        (GameMode::Chess, 'p') => Some(PieceType::Pawn),
        (GameMode::Chess, 'r') => Some(PieceType::Rook),
        (GameMode::Chess, 'n') => Some(PieceType::Knight),
        (GameMode::Chess, 'b') => Some(PieceType::Bishop),
        (GameMode::Chess, 'q') => Some(PieceType::Queen),
        (GameMode::Chess, 'k') => Some(PieceType::King),
        (GameMode::Chess, _) => None,
    }
}

fn on_home_square(piece: Piece, sq: Square) -> bool {
    let back_row: u8 = match piece.color {
        Color::White => 7,
        Color::Black => 0,
    };
    match piece.piece_type {
        PieceType::Pawn => sq.row as i8 == back_row as i8 + piece.color.forward(),
        PieceType::King => sq.row == back_row && sq.col == 4,
        PieceType::Rook => sq.row == back_row && (sq.col == 0 || sq.col == 7),
        _ => true,
    }
}

pub fn square_to_coord(sq: Square) -> String {
    sq.to_algebraic()
}

/// `"e4"` to `Square { row: 4, col: 4 }`; `None` for anything malformed.
pub fn coord_to_square(coord: &str) -> Option<Square> {
    Square::from_algebraic(coord)
}

pub fn parse_uci(mv: &str) -> CoreResult<(Square, Square)> {
    if mv.len() != 4 || !mv.is_ascii() {
        return Err(CoreError::InvalidMove(mv.to_string()));
    }
    let from = coord_to_square(&mv[..2]).ok_or_else(|| CoreError::InvalidMove(mv.to_string()))?;
    let to = coord_to_square(&mv[2..]).ok_or_else(|| CoreError::InvalidMove(mv.to_string()))?;
    Ok((from, to))
}

pub fn all_legal_moves_uci(board: &Board, color: Color, mode: GameMode, last_move: Option<&MoveRecord>) -> Vec<String> {
    all_legal_moves(board, color, mode, last_move)
        .into_iter()
        .map(|(from, to)| format!("{from}{to}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_position_fen() {
        let board = Board::initial(GameMode::Chess);
        assert_eq!(to_fen(&board, Color::White), format!("{START} w"));
        assert_eq!(to_full_fen(&board, Color::White, None), format!("{START} w KQkq - 0 1"));
    }

    #[test]
    fn checkers_fen_borrows_chess_letters() {
        let board = Board::initial(GameMode::Checkers);
        assert_eq!(
            to_fen(&board, Color::Black),
            "1p1p1p1p/p1p1p1p1/1p1p1p1p/8/8/P1P1P1P1/1P1P1P1P/P1P1P1P1 b"
        );
    }

    #[test]
    fn fen_reads_back_what_it_writes() {
        let (board, turn) = from_fen(&format!("{START} w"), GameMode::Chess).unwrap();
        assert_eq!(board, Board::initial(GameMode::Chess));
        assert_eq!(turn, Color::White);
    }

    #[test]
    fn fen_marks_displaced_pieces_as_moved() {
        let (board, _) = from_fen("4k3/8/8/8/4P3/8/3P4/R3K1R1 b", GameMode::Chess).unwrap();
        let at = |s| board.get(Square::from_algebraic(s).unwrap()).unwrap();
        assert!(at("e4").has_moved);
        assert!(!at("d2").has_moved);
        assert!(!at("a1").has_moved);
        assert!(at("g1").has_moved);
        assert!(!at("e1").has_moved);
    }

    #[test]
    fn en_passant_and_castling_fields() {
        let mut board = Board::initial(GameMode::Chess);
        let last = board
            .play(Square::from_algebraic("e2").unwrap(), Square::from_algebraic("e4").unwrap(), GameMode::Chess)
            .unwrap();
        let fen = to_full_fen(&board, Color::Black, Some(&last));
        assert!(fen.ends_with("b KQkq e3 0 1"), "{fen}");

        let (moved, _) = from_fen("r3k3/8/8/8/8/8/8/4K2R w", GameMode::Chess).unwrap();
        assert!(to_full_fen(&moved, Color::White, None).contains(" w Kq - "));
    }

    #[test]
    fn rejects_bad_fen() {
        for bad in ["", "8/8/8 w", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w", "9/8/8/8/8/8/8/8 w", "8/8/8/8/8/8/8/8 x"] {
            assert!(from_fen(bad, GameMode::Chess).is_err(), "{bad:?}");
        }
        assert!(from_fen("8/8/8/8/8/8/8/3Q4 w", GameMode::Checkers).is_err());
    }

    #[test]
    fn coordinate_conversions() {
        assert_eq!(coord_to_square("e4"), Some(Square { row: 4, col: 4 }));
        assert_eq!(coord_to_square("z4"), None);
        assert_eq!(coord_to_square("ex"), None);
        assert_eq!(square_to_coord(Square { row: 0, col: 7 }), "h8");
    }

    #[test]
    fn uci_parsing() {
        let (from, to) = parse_uci("g1f3").unwrap();
        assert_eq!((from.to_algebraic(), to.to_algebraic()), ("g1".to_string(), "f3".to_string()));
        assert!(parse_uci("g1f").is_err());
        assert!(parse_uci("g1f9").is_err());
        assert!(parse_uci("é1f3").is_err());
    }

    #[test]
    fn opening_has_twenty_moves() {
        let board = Board::initial(GameMode::Chess);
        let moves = all_legal_moves_uci(&board, Color::White, GameMode::Chess, None);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0], "a2a3");
        assert!(moves.contains(&"g1f3".to_string()));
    }
}

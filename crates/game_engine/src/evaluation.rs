use game_core::{Board, Color, GameMode, PieceType, Square};

// Piece values in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20000; // present on both sides, so it only steadies the sum
const MAN_VALUE: i32 = 100;
const CHECKERS_KING_VALUE: i32 = 300;

// Piece-square tables are written from White's side of the board:
// the first row is the far rank (row 0), the last row White's home rank.
// Black reads them with the row mirrored.

// Pawns: push towards promotion, occupy the centre, keep the king's shield
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0,  0,  0,  0,  0,  0,  0,  0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5,  5, 10, 25, 25, 10,  5,  5],
    [0,  0,  0, 20, 20,  0,  0,  0],
    [5, -5,-10,  0,  0,-10, -5,  5],
    [5, 10, 10,-20,-20, 10, 10,  5],
    [0,  0,  0,  0,  0,  0,  0,  0]
];

// Knights: strong in the centre, poor on the rim
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50]
];

// Checkers pieces: advance, hold the centre, keep the back row as long as possible
const CHECKERS_TABLE: [[i32; 8]; 8] = [
    [0,  0,  0,  0,  0,  0,  0,  0],
    [20, 20, 20, 20, 20, 20, 20, 20],
    [15, 15, 15, 15, 15, 15, 15, 15],
    [10, 12, 14, 16, 16, 14, 12, 10],
    [5,  8, 12, 14, 14, 12,  8,  5],
    [0,  4,  6,  8,  8,  6,  4,  0],
    [0,  0,  0,  0,  0,  0,  0,  0],
    [5, 10, 10,  5,  5, 10, 10,  5]
];

/// Static score of a board: positive favours White, negative favours Black.
///
/// Only material and the piece-square tables count; the score does not depend
/// on whose turn it is.
pub fn evaluate(board: &Board, mode: GameMode) -> i32 {
    board
        .pieces()
        .map(|(sq, piece)| {
            let value = piece_value(piece.piece_type) + position_bonus(mode, piece.piece_type, sq, piece.color);
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
        PieceType::Man => MAN_VALUE,
        PieceType::CheckersKing => CHECKERS_KING_VALUE,
    }
}

fn position_bonus(mode: GameMode, piece_type: PieceType, sq: Square, color: Color) -> i32 {
    let row = match color {
        Color::White => sq.row as usize,
        Color::Black => 7 - sq.row as usize,
    };
    let col = sq.col as usize;

    match (mode, piece_type) {
        (GameMode::Chess, PieceType::Pawn) => PAWN_TABLE[row][col],
        (GameMode::Chess, PieceType::Knight) => KNIGHT_TABLE[row][col],
        (GameMode::Checkers, PieceType::Man | PieceType::CheckersKing) => CHECKERS_TABLE[row][col],
        _ => 0,
    }
}

//! Move generation and legality for both games.
//!
//! Each game mode has one [`RuleSet`] implementation; the free functions here
//! dispatch on [`GameMode`] so callers never branch on the mode themselves.

mod checkers;
mod chess;

pub use checkers::CheckersRules;
pub use chess::{is_square_attacked, ChessRules};

use crate::{Board, Color, GameMode, MoveRecord, Square};

pub trait RuleSet: Sync {
    /// Destinations that follow the piece's movement pattern, ignoring king safety and
    /// board-wide capture obligations.
    fn pseudo_moves(
        &self,
        board: &Board,
        from: Square,
        last_move: Option<&MoveRecord>,
        allow_castling: bool,
    ) -> Vec<Square>;

    /// The subset of [`RuleSet::pseudo_moves`] the mover may actually play.
    fn legal_moves(&self, board: &Board, from: Square, last_move: Option<&MoveRecord>) -> Vec<Square>;
}

impl GameMode {
    pub fn rules(self) -> &'static dyn RuleSet {
        match self {
            GameMode::Chess => &ChessRules,
            GameMode::Checkers => &CheckersRules,
        }
    }
}

pub fn pseudo_moves(
    board: &Board,
    pos: Square,
    mode: GameMode,
    last_move: Option<&MoveRecord>,
    allow_castling: bool,
) -> Vec<Square> {
    mode.rules().pseudo_moves(board, pos, last_move, allow_castling)
}

pub fn legal_moves(board: &Board, pos: Square, mode: GameMode, last_move: Option<&MoveRecord>) -> Vec<Square> {
    mode.rules().legal_moves(board, pos, last_move)
}

/// Every legal `(from, to)` pair for `color`, pieces scanned row by row.
pub fn all_legal_moves(
    board: &Board,
    color: Color,
    mode: GameMode,
    last_move: Option<&MoveRecord>,
) -> Vec<(Square, Square)> {
    let rules = mode.rules();
    board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            rules
                .legal_moves(board, from, last_move)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

pub fn has_legal_move(board: &Board, color: Color, mode: GameMode, last_move: Option<&MoveRecord>) -> bool {
    let rules = mode.rules();
    board
        .pieces_of(color)
        .any(|(from, _)| !rules.legal_moves(board, from, last_move).is_empty())
}

use serde::{Deserialize, Serialize};

use crate::rules::legal_moves;
use crate::{Board, Color, CoreResult, GameMode, MoveRecord, Square};

/// The saved/resumed shape of a game as the host stores it: `{board, turn, lastMove}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    #[serde(default)]
    pub last_move: Option<MoveRecord>,
}

impl GameSnapshot {
    pub fn new_game(mode: GameMode) -> Self {
        Self {
            board: Board::initial(mode),
            turn: Color::White,
            last_move: None,
        }
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Legal destinations from `pos`; empty unless `pos` holds a piece of the side to move.
    pub fn legal_moves(&self, pos: Square, mode: GameMode) -> Vec<Square> {
        if self.board.get(pos).map(|piece| piece.color) != Some(self.turn) {
            return Vec::new();
        }
        legal_moves(&self.board, pos, mode, self.last_move.as_ref())
    }

    /// Plays `from -> to` and hands the turn over. The move is not validated here;
    /// callers check it against [`GameSnapshot::legal_moves`], which also enforces the turn.
    pub fn play(&mut self, from: Square, to: Square, mode: GameMode) -> Option<MoveRecord> {
        let mv = self.board.play(from, to, mode)?;
        self.last_move = Some(mv);
        self.turn = self.turn.opponent();
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, PieceType};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn json_keeps_last_move_for_en_passant() {
        let mut snapshot = GameSnapshot::new_game(GameMode::Chess);
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            snapshot.play(sq(from), sq(to), GameMode::Chess).unwrap();
        }

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"lastMove\""));
        let restored = GameSnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert!(restored.legal_moves(sq("e5"), GameMode::Chess).contains(&sq("d6")));
    }

    #[test]
    fn only_the_side_to_move_has_moves() {
        let mut snapshot = GameSnapshot::new_game(GameMode::Chess);
        assert!(snapshot.legal_moves(sq("e7"), GameMode::Chess).is_empty());
        assert_eq!(snapshot.legal_moves(sq("e2"), GameMode::Chess).len(), 2);

        snapshot.play(sq("e2"), sq("e4"), GameMode::Chess).unwrap();
        assert!(snapshot.legal_moves(sq("d2"), GameMode::Chess).is_empty());
        assert_eq!(snapshot.legal_moves(sq("e7"), GameMode::Chess).len(), 2);
    }

    #[test]
    fn last_move_is_optional() {
        let json = serde_json::to_string(&serde_json::json!({
            "board": Board::initial(GameMode::Checkers),
            "turn": "black",
        }))
        .unwrap();

        let snapshot = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot.turn, Color::Black);
        assert!(snapshot.last_move.is_none());
        assert_eq!(
            snapshot.board.get(sq("b8")),
            Some(Piece::new(PieceType::Man, Color::Black))
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameSnapshot::from_json("{\"board\": 3}").is_err());
    }
}

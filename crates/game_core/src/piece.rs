use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward step: white advances towards row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    #[serde(rename = "checkers-man")]
    Man,
    CheckersKing,
}

impl PieceType {
    pub fn is_checkers(self) -> bool {
        matches!(self, PieceType::Man | PieceType::CheckersKing)
    }

    /// FEN letter for white; checkers pieces borrow the pawn and king letters.
    fn letter(self) -> char {
        match self {
            PieceType::Pawn | PieceType::Man => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King | PieceType::CheckersKing => 'k',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: Color,
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color, has_moved: false }
    }

    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }

    pub fn fen_char(&self) -> char {
        let c = self.piece_type.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// Which rule set interprets a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Chess,
    Checkers,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Chess => write!(f, "chess"),
            GameMode::Checkers => write!(f, "checkers"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chess" => Ok(GameMode::Chess),
            "checkers" => Ok(GameMode::Checkers),
            other => Err(crate::CoreError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkers_pieces_borrow_pawn_and_king_letters() {
        assert_eq!(Piece::new(PieceType::Man, Color::White).fen_char(), 'P');
        assert_eq!(Piece::new(PieceType::CheckersKing, Color::Black).fen_char(), 'k');
        assert_eq!(Piece::new(PieceType::Knight, Color::Black).fen_char(), 'n');
    }

    #[test]
    fn piece_serializes_with_type_tag() {
        let json = serde_json::to_string(&Piece::new(PieceType::CheckersKing, Color::Black)).unwrap();
        assert_eq!(json, r#"{"type":"checkers-king","color":"black","hasMoved":false}"#);
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("checkers".parse::<GameMode>().unwrap(), GameMode::Checkers);
        assert!("go".parse::<GameMode>().is_err());
    }
}

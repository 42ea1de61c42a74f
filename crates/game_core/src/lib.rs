// Board model and rules shared by chess and checkers
pub mod board;
pub mod error;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod snapshot;
pub mod square;
pub mod status;

// Re-export main types for convenience
pub use board::Board;
pub use error::{CoreError, CoreResult};
pub use moves::{Capture, MoveRecord};
pub use notation::{all_legal_moves_uci, coord_to_square, square_to_coord, to_fen};
pub use piece::{Color, GameMode, Piece, PieceType};
pub use rules::{all_legal_moves, legal_moves, pseudo_moves, RuleSet};
pub use snapshot::GameSnapshot;
pub use square::Square;
pub use status::{game_status, is_checkmate, is_king_in_check, is_stalemate, GameStatus};

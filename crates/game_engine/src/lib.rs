pub mod ai;
pub mod error;
pub mod evaluation;
pub mod search;

pub use ai::{Difficulty, MoveAdvisor, MoveChoice, MoveSource, MoveSuggester, NoSuggester, SuggestionRequest};
pub use error::EngineError;
pub use evaluation::evaluate;
pub use search::{best_move, best_move_after, rank_moves, search, SearchOutcome};

use std::collections::HashSet;

use game_core::{all_legal_moves_uci, to_fen, Board, Color, GameMode, MoveRecord};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::search::best_move_after;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Plies searched by the local fallback.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// What an external move-suggestion service is given.
#[derive(Debug, Clone)]
pub struct SuggestionRequest<'a> {
    pub fen: String,
    pub legal_moves: &'a [String],
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

/// An external move source, such as a remote language model. Its answer is
/// only a proposal and is checked against the legal move list.
pub trait MoveSuggester {
    fn suggest(&self, request: &SuggestionRequest<'_>) -> Option<String>;
}

/// Suggester for when no external service is configured.
pub struct NoSuggester;

impl MoveSuggester for NoSuggester {
    fn suggest(&self, _request: &SuggestionRequest<'_>) -> Option<String> {
        None
    }
}

impl<F> MoveSuggester for F
where
    F: Fn(&SuggestionRequest<'_>) -> Option<String>,
{
    fn suggest(&self, request: &SuggestionRequest<'_>) -> Option<String> {
        self(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Suggested,
    Search,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChoice {
    pub uci: String,
    pub source: MoveSource,
}

/// Picks the computer's move: the external suggestion when it is legal, else the
/// local search, else a uniformly random legal move.
#[derive(Debug, Clone, Default)]
pub struct MoveAdvisor {
    difficulty: Difficulty,
    rejected: HashSet<String>, // suggestions that were not legal moves
}

impl MoveAdvisor {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rejected: HashSet::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rejected_suggestions(&self) -> impl Iterator<Item = &str> {
        self.rejected.iter().map(String::as_str)
    }

    pub fn clear_rejected(&mut self) {
        self.rejected.clear();
    }

    pub fn choose_move<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        mode: GameMode,
        color: Color,
        last_move: Option<&MoveRecord>,
        suggester: &dyn MoveSuggester,
        rng: &mut R,
    ) -> Option<MoveChoice> {
        let legal = all_legal_moves_uci(board, color, mode, last_move);
        if legal.is_empty() {
            info!("{:?} has no legal move in {}", color, mode);
            return None;
        }

        let request = SuggestionRequest {
            fen: to_fen(board, color),
            legal_moves: &legal,
            mode,
            difficulty: self.difficulty,
        };
        match suggester.suggest(&request) {
            // exact membership only; near matches count as no answer
            Some(uci) if legal.contains(&uci) => {
                debug!("using suggested move {}", uci);
                return Some(MoveChoice {
                    uci,
                    source: MoveSource::Suggested,
                });
            }
            Some(uci) => {
                warn!("rejecting suggested move {:?}: not a legal move", uci);
                self.rejected.insert(uci);
            }
            None => debug!("no suggestion received"),
        }

        info!("falling back to local search at depth {}", self.difficulty.depth());
        if let Some(uci) = best_move_after(board, mode, self.difficulty.depth(), color, last_move)
            .filter(|uci| legal.contains(uci))
        {
            return Some(MoveChoice {
                uci,
                source: MoveSource::Search,
            });
        }

        warn!("search produced no move, picking at random");
        random_move(&legal, rng).map(|uci| MoveChoice {
            uci,
            source: MoveSource::Random,
        })
    }
}

/// Uniform pick from a legal move list.
pub fn random_move<R: Rng + ?Sized>(legal: &[String], rng: &mut R) -> Option<String> {
    legal.choose(rng).cloned()
}

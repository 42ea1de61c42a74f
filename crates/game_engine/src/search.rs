use game_core::{all_legal_moves, is_king_in_check, Board, Color, GameMode, MoveRecord};
use log::debug;
use rayon::prelude::*;

use crate::evaluation::evaluate;

// Search parameters
pub const MATE_SCORE: i32 = 1_000_000; // beyond any material sum
pub const MAX_DEPTH: u8 = 6;
const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move as `from + to` (e.g. `e2e4`), `None` when the side has no legal move.
    pub best_move: Option<String>,
    /// Minimax value from White's point of view.
    pub score: i32,
    pub nodes: u64,
}

/// Score of a position where `to_move` has no legal move. Losing sides get a mate
/// score that grows with the remaining depth, so quicker wins rank higher.
pub fn terminal_score(board: &Board, mode: GameMode, to_move: Color, depth: u8) -> i32 {
    let lost = match mode {
        GameMode::Chess => is_king_in_check(board, to_move),
        // a checkers side that cannot move has lost, as `game_status` reports it; never a draw
        GameMode::Checkers => true,
    };
    if !lost {
        return 0;
    }

    let score = MATE_SCORE + depth as i32;
    match to_move {
        Color::White => -score,
        Color::Black => score,
    }
}

fn clamp_depth(depth: u8) -> u8 {
    depth.clamp(1, MAX_DEPTH)
}

struct Searcher {
    mode: GameMode,
    nodes: u64,
}

impl Searcher {
    fn new(mode: GameMode) -> Self {
        Self { mode, nodes: 0 }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        to_move: Color,
        last_move: Option<&MoveRecord>,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board, self.mode);
        }

        let moves = all_legal_moves(board, to_move, self.mode, last_move);
        if moves.is_empty() {
            return terminal_score(board, self.mode, to_move, depth);
        }

        let maximizing = to_move == Color::White;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for (from, to) in moves {
            let Some(mv) = MoveRecord::describe(board, from, to, self.mode) else {
                continue;
            };
            let child = board.after(&mv);
            let score = self.minimax(&child, depth - 1, alpha, beta, to_move.opponent(), Some(&mv));

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            // Cutoff - the opponent already has a better line elsewhere
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Minimax value of `board` with `to_move` to play, searched `depth` plies deep.
pub fn minimax(board: &Board, mode: GameMode, depth: u8, to_move: Color, last_move: Option<&MoveRecord>) -> i32 {
    Searcher::new(mode).minimax(board, depth, -INFINITY, INFINITY, to_move, last_move)
}

/// Alpha-beta search from the root. Among equally scored moves the first one in
/// generation order wins, which keeps the result reproducible.
pub fn search(
    board: &Board,
    mode: GameMode,
    depth: u8,
    color: Color,
    last_move: Option<&MoveRecord>,
) -> SearchOutcome {
    let depth = clamp_depth(depth);
    let mut searcher = Searcher::new(mode);
    let moves = all_legal_moves(board, color, mode, last_move);
    debug!("searching {} root moves for {:?} at depth {}", moves.len(), color, depth);

    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: terminal_score(board, mode, color, depth),
            nodes: 1,
        };
    }

    let maximizing = color == Color::White;
    let (mut alpha, mut beta) = (-INFINITY, INFINITY);
    let mut best: Option<(String, i32)> = None;

    for (from, to) in moves {
        let Some(mv) = MoveRecord::describe(board, from, to, mode) else {
            continue;
        };
        let child = board.after(&mv);
        let score = searcher.minimax(&child, depth - 1, alpha, beta, color.opponent(), Some(&mv));

        let improves = match &best {
            None => true,
            Some((_, best_score)) if maximizing => score > *best_score,
            Some((_, best_score)) => score < *best_score,
        };
        if improves {
            debug!("new best move at depth {}: {} score {}", depth, mv.uci(), score);
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            best = Some((mv.uci(), score));
        }
    }

    let (best_move, score) = match best {
        Some((uci, score)) => (Some(uci), score),
        None => (None, 0),
    };
    debug!("search finished: {:?} score {} after {} nodes", best_move, score, searcher.nodes);

    SearchOutcome {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

pub fn best_move(board: &Board, mode: GameMode, depth: u8, color: Color) -> Option<String> {
    best_move_after(board, mode, depth, color, None)
}

/// Same as [`best_move`], with the move that produced `board` (needed for en passant).
pub fn best_move_after(
    board: &Board,
    mode: GameMode,
    depth: u8,
    color: Color,
    last_move: Option<&MoveRecord>,
) -> Option<String> {
    search(board, mode, depth, color, last_move).best_move
}

/// Every root move with its full-window minimax score, in generation order.
/// Root moves are searched in parallel; no pruning is shared between them.
pub fn rank_moves(
    board: &Board,
    mode: GameMode,
    depth: u8,
    color: Color,
    last_move: Option<&MoveRecord>,
) -> Vec<(String, i32)> {
    let depth = clamp_depth(depth);
    let moves = all_legal_moves(board, color, mode, last_move);

    moves
        .par_iter()
        .filter_map(|&(from, to)| {
            let mv = MoveRecord::describe(board, from, to, mode)?;
            let child = board.after(&mv);
            let score = minimax(&child, mode, depth - 1, color.opponent(), Some(&mv));
            Some((mv.uci(), score))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::notation::from_fen;

    fn chess(fen: &str) -> (Board, Color) {
        from_fen(fen, GameMode::Chess).unwrap()
    }

    #[test]
    fn takes_a_hanging_queen() {
        let (board, color) = chess("4k3/8/8/3q4/8/8/8/3RK3 w");
        assert_eq!(best_move(&board, GameMode::Chess, 2, color).as_deref(), Some("d1d5"));
    }

    #[test]
    fn finds_mate_in_one() {
        // back-rank mate: Ra1-a8
        let (board, color) = chess("6k1/5ppp/8/8/8/8/8/R5K1 w");
        let outcome = search(&board, GameMode::Chess, 2, color, None);
        assert_eq!(outcome.best_move.as_deref(), Some("a1a8"));
        assert!(outcome.score > MATE_SCORE);
    }

    #[test]
    fn black_minimises() {
        let (board, color) = chess("3rk3/8/8/3Q4/8/8/8/4K3 b");
        assert_eq!(best_move(&board, GameMode::Chess, 2, color).as_deref(), Some("d8d5"));
    }

    #[test]
    fn no_moves_gives_none() {
        let (board, color) = chess("7k/5Q2/6K1/8/8/8/8/8 b");
        let outcome = search(&board, GameMode::Chess, 3, color, None);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn terminal_scores() {
        let (mated, _) = chess("R5k1/5ppp/8/8/8/8/8/6K1 b");
        assert_eq!(terminal_score(&mated, GameMode::Chess, Color::Black, 2), MATE_SCORE + 2);

        let (stalemated, _) = chess("7k/5Q2/6K1/8/8/8/8/8 b");
        assert_eq!(terminal_score(&stalemated, GameMode::Chess, Color::Black, 2), 0);

        assert_eq!(terminal_score(&Board::empty(), GameMode::Checkers, Color::White, 1), -(MATE_SCORE + 1));
    }

    #[test]
    fn checkers_capture_is_forced() {
        let (board, color) = from_fen("8/8/8/8/3p4/2P5/8/8 w", GameMode::Checkers).unwrap();
        assert_eq!(best_move(&board, GameMode::Checkers, 3, color).as_deref(), Some("c3e5"));
    }

    #[test]
    fn ranking_matches_root_order_and_best_move() {
        let (board, color) = chess("4k3/8/8/3q4/8/8/8/3RK3 w");
        let ranked = rank_moves(&board, GameMode::Chess, 2, color, None);
        let legal = game_core::all_legal_moves_uci(&board, color, GameMode::Chess, None);
        let names: Vec<String> = ranked.iter().map(|(uci, _)| uci.clone()).collect();
        assert_eq!(names, legal);

        let top = ranked.iter().map(|(_, s)| *s).max().unwrap();
        let first_top = ranked.iter().find(|(_, s)| *s == top).unwrap();
        assert_eq!(Some(first_top.0.clone()), best_move(&board, GameMode::Chess, 2, color));
    }

    #[test]
    fn depth_is_clamped() {
        let (board, color) = chess("4k3/8/8/3q4/8/8/8/3RK3 w");
        assert_eq!(
            best_move(&board, GameMode::Chess, 0, color),
            best_move(&board, GameMode::Chess, 1, color)
        );
    }
}

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use game_core::notation::{parse_uci, to_full_fen};
use game_core::{
    all_legal_moves_uci, coord_to_square, game_status, to_fen, CoreError, GameMode, GameSnapshot, GameStatus,
};
use game_engine::{rank_moves, search, Difficulty, MoveAdvisor, NoSuggester};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the chess/checkers rules and search core", long_about = None)]
struct Args {
    /// Which game the board is interpreted as
    #[arg(long, default_value = "chess")]
    mode: GameMode,

    /// JSON game snapshot ({board, turn, lastMove}); a new game when omitted
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the position as FEN
    Fen {
        /// Six-field FEN with castling and en-passant fields
        #[arg(long)]
        full: bool,
    },
    /// List legal moves for the side to move, or for one square
    Moves {
        #[arg(long)]
        square: Option<String>,
    },
    /// Search for the best move
    Best {
        #[arg(long, default_value_t = 3)]
        depth: u8,
    },
    /// Score every legal move
    Rank {
        #[arg(long, default_value_t = 2)]
        depth: u8,
    },
    /// Apply a move given as from+to (e.g. e2e4) and print the new snapshot
    Play { mv: String },
    /// Let the engine play both sides
    Selfplay {
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
        #[arg(long, default_value_t = 60)]
        max_plies: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).context("failed to initialise logging")?;

    let mut snapshot = match &args.snapshot {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            GameSnapshot::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameSnapshot::new_game(args.mode),
    };
    let mode = args.mode;

    match args.command {
        Command::Fen { full } => {
            if full {
                println!("{}", to_full_fen(&snapshot.board, snapshot.turn, snapshot.last_move.as_ref()));
            } else {
                println!("{}", to_fen(&snapshot.board, snapshot.turn));
            }
        }
        Command::Moves { square } => {
            let moves: Vec<String> = match square {
                Some(coord) => {
                    let from = coord_to_square(&coord).ok_or(CoreError::InvalidSquare(coord))?;
                    snapshot
                        .legal_moves(from, mode)
                        .into_iter()
                        .map(|to| format!("{from}{to}"))
                        .collect()
                }
                None => all_legal_moves_uci(&snapshot.board, snapshot.turn, mode, snapshot.last_move.as_ref()),
            };
            println!("{}", moves.join(" "));
        }
        Command::Best { depth } => {
            let outcome = search(&snapshot.board, mode, depth, snapshot.turn, snapshot.last_move.as_ref());
            match outcome.best_move {
                Some(mv) => println!("{mv} (score {}, {} nodes)", outcome.score, outcome.nodes),
                None => println!("no legal move"),
            }
        }
        Command::Rank { depth } => {
            for (mv, score) in rank_moves(&snapshot.board, mode, depth, snapshot.turn, snapshot.last_move.as_ref()) {
                println!("{mv} {score}");
            }
        }
        Command::Play { mv } => {
            let (from, to) = parse_uci(&mv)?;
            if !snapshot.legal_moves(from, mode).contains(&to) {
                bail!("{mv} is not legal for {:?}", snapshot.turn);
            }
            snapshot.play(from, to, mode);
            println!("{}", snapshot.to_json()?);
        }
        Command::Selfplay {
            difficulty,
            max_plies,
            seed,
        } => selfplay(&mut snapshot, mode, difficulty, max_plies, seed)?,
    }

    Ok(())
}

fn selfplay(snapshot: &mut GameSnapshot, mode: GameMode, difficulty: Difficulty, max_plies: u32, seed: u64) -> Result<()> {
    let mut advisor = MoveAdvisor::new(difficulty);
    let mut rng = StdRng::seed_from_u64(seed);

    for ply in 1..=max_plies {
        let status = game_status(&snapshot.board, mode, snapshot.turn, snapshot.last_move.as_ref());
        if status.is_over() {
            println!("{}", describe(status));
            return Ok(());
        }

        let Some(choice) = advisor.choose_move(
            &snapshot.board,
            mode,
            snapshot.turn,
            snapshot.last_move.as_ref(),
            &NoSuggester,
            &mut rng,
        ) else {
            bail!("no move chosen for {:?} in an ongoing game", snapshot.turn);
        };
        let (from, to) = parse_uci(&choice.uci)?;
        snapshot.play(from, to, mode);
        info!("{ply:>3}. {} ({:?})", choice.uci, choice.source);
        println!("{}", to_fen(&snapshot.board, snapshot.turn));
    }

    println!("stopped after {max_plies} plies");
    Ok(())
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "ongoing".to_string(),
        GameStatus::Checkmate { winner } => format!("checkmate, {winner:?} wins"),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::Draw => "draw by insufficient material".to_string(),
        GameStatus::Won { winner } => format!("{winner:?} wins, opponent cannot move"),
    }
}

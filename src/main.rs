//! Gomoku AI Engine CLI
//!
//! `play` runs an engine-vs-engine game, `suggest` ranks hints for a
//! position given as a move list. Engine calls run on a worker thread and
//! are cancelled when the per-move time budget runs out.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gomoku::{
    suggest, AIEngine, Board, CancelToken, Difficulty, EngineConfig, EngineError, MoveResult, Pos,
    SearchType, Stone, Suggester, Suggestion,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Engine vs engine game
    Play(PlayArg),
    /// Ranked hints for a position
    Suggest(SuggestArg),
}

#[derive(Debug, Args)]
struct PlayArg {
    /// Difficulty for Black
    #[arg(long, default_value = "medium")]
    black: Difficulty,
    /// Difficulty for White
    #[arg(long, default_value = "easy")]
    white: Difficulty,
    /// Seed for both engines (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Time budget per move in milliseconds (a depth-5 Hard search needs seconds)
    #[arg(long, default_value_t = 30_000)]
    move_time_ms: u64,
    /// Quiet-move limit per search node
    #[arg(long)]
    max_candidates: Option<usize>,
    /// Print the game record as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SuggestArg {
    /// Moves played so far as `row,col`, Black first
    moves: Vec<Pos>,
    /// Side to hint for (defaults to the side to move)
    #[arg(long)]
    color: Option<Color>,
    /// Number of hints
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    /// Plies to look ahead when scoring each move
    #[arg(long, default_value_t = 1)]
    lookahead: u8,
    /// Quiet-reply limit per node during lookahead
    #[arg(long)]
    max_candidates: Option<usize>,
    /// Print hints as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Color {
    Black,
    White,
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

#[derive(Debug, Serialize)]
struct MoveRecord {
    ply: usize,
    color: Stone,
    pos: Pos,
    /// `None` when the search was cancelled and the top hint was played
    search_type: Option<SearchType>,
    score: i32,
    time_ms: u64,
}

#[derive(Debug, Serialize)]
struct GameRecord {
    black: Difficulty,
    white: Difficulty,
    black_seed: u64,
    white_seed: u64,
    winner: Option<Stone>,
    moves: Vec<MoveRecord>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.mode {
        Mode::Play(arg) => run_play(&arg)?,
        Mode::Suggest(arg) => run_suggest(&arg)?,
    }
    Ok(())
}

fn run_play(arg: &PlayArg) -> anyhow::Result<()> {
    let budget = Duration::from_millis(arg.move_time_ms);
    let config = |difficulty| EngineConfig {
        difficulty,
        seed: arg.seed,
        max_candidates: arg.max_candidates,
        time_limit: None,
    };
    let black = AIEngine::with_config(config(arg.black)).context("black engine")?;
    let white = AIEngine::with_config(config(arg.white)).context("white engine")?;
    let mut record = GameRecord {
        black: arg.black,
        white: arg.white,
        black_seed: black.seed(),
        white_seed: white.seed(),
        winner: None,
        moves: Vec::new(),
    };
    let mut engines = [Some(black), Some(white)];

    let mut board = Board::new();
    let mut color = Stone::Black;
    for ply in 1.. {
        let slot = usize::from(color == Stone::White);
        let engine = engines[slot].take().context("engine lost")?;
        let (engine, result) = timed_move(engine, &board, color, budget)?;
        engines[slot] = Some(engine);

        let entry = match result {
            Ok(r) => MoveRecord {
                ply,
                color,
                pos: r.best_move,
                search_type: Some(r.search_type),
                score: r.score,
                time_ms: r.time_ms,
            },
            Err(EngineError::NoLegalMoves) => break,
            Err(EngineError::SearchCancelled) => {
                let hint = fallback_hint(&board, color)?;
                MoveRecord {
                    ply,
                    color,
                    pos: hint.pos,
                    search_type: None,
                    score: hint.score,
                    time_ms: arg.move_time_ms,
                }
            }
            Err(e) => return Err(e.into()),
        };
        board.place(entry.pos, color)?;
        if !arg.json {
            let how = entry
                .search_type
                .map_or_else(|| "Fallback".to_string(), |t| format!("{t:?}"));
            println!(
                "{ply:3}. {color} {} {how} score={} {}ms",
                entry.pos, entry.score, entry.time_ms
            );
        }
        record.moves.push(entry);

        if let Some(w) = gomoku::rules::winner(&board) {
            record.winner = Some(w);
            break;
        }
        color = color.opponent();
    }

    info!(winner = ?record.winner, plies = record.moves.len(), "game over");
    if arg.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("\n{board}");
        match record.winner {
            Some(w) => println!("Winner: {w}"),
            None => println!("Draw"),
        }
    }
    Ok(())
}

/// Run one engine call on a worker thread, cancelling it once `budget` elapses.
///
/// The engine moves into the worker and comes back with the result so its
/// random state carries over to the next move.
fn timed_move(
    mut engine: AIEngine,
    board: &Board,
    color: Stone,
    budget: Duration,
) -> anyhow::Result<(AIEngine, gomoku::Result<MoveResult>)> {
    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let worker_board = board.clone();
    thread::spawn(move || {
        let result = engine.get_move_cancellable(&worker_board, color, &worker_cancel);
        let _ = tx.send((engine, result));
    });

    match rx.recv_timeout(budget) {
        Ok(done) => Ok(done),
        Err(RecvTimeoutError::Timeout) => {
            cancel.cancel();
            // The search unwinds within one node expansion
            rx.recv().context("engine worker exited without a result")
        }
        Err(RecvTimeoutError::Disconnected) => bail!("engine worker panicked"),
    }
}

/// Top static hint, played after a cancelled search.
fn fallback_hint(board: &Board, color: Stone) -> anyhow::Result<Suggestion> {
    let hint = suggest(board, color, 1)?
        .into_iter()
        .next()
        .context("no hint for fallback move")?;
    warn!(%color, pos = %hint.pos, "search timed out, playing top hint");
    Ok(hint)
}

fn run_suggest(arg: &SuggestArg) -> anyhow::Result<()> {
    let board = Board::from_moves(&arg.moves).context("invalid move list")?;
    let color = arg.color.map_or_else(|| board.side_to_move(), Stone::from);
    let hints = Suggester::new()
        .with_lookahead(arg.lookahead)?
        .with_max_quiet(arg.max_candidates)?
        .suggest(&board, color, arg.top_k)?;

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&hints)?);
        return Ok(());
    }
    println!("{board}");
    println!("Hints for {color}:");
    for (rank, hint) in hints.iter().enumerate() {
        println!(
            "{:2}. {} {:?} score={} raw={}",
            rank + 1,
            hint.pos,
            hint.category,
            hint.score,
            hint.raw_weight
        );
    }
    Ok(())
}

//! Main AI Engine applying the difficulty policy on top of the searcher
//!
//! The engine picks a move in this order:
//!
//! 1. **Immediate win**: a cell that completes five for the mover
//! 2. **Defense**: a cell where the opponent would complete five next ply
//! 3. **Alpha-Beta**: depth-bounded search over the candidate set
//!
//! Medium and Hard run all three steps. Easy performs no search: it picks a
//! seeded random candidate, only checking first whether it must block.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::new(Difficulty::Medium);
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.get_move_with_stats(&board, Stone::White).unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::error::{EngineError, Result};
use crate::eval::evaluate;
use crate::rules::{find_winning_move, winner, winning_moves};
use crate::search::{CancelToken, SearchResult, Searcher, Seeded, WIN_SCORE};
use crate::suggest::{Suggester, Suggestion};

/// Playing strength. Each level maps to a search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Seeded random candidate, blocks an immediate loss
    Easy,
    /// Three-ply search
    #[default]
    Medium,
    /// Five-ply search
    Hard,
}

impl Difficulty {
    /// Search depth in plies
    #[inline]
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown difficulty '{other}', expected easy, medium or hard"
            ))),
        }
    }
}

/// Engine configuration.
///
/// Serializable so callers can load it from JSON:
///
/// ```
/// use gomoku::{Difficulty, EngineConfig};
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{"difficulty":"hard","seed":7}"#).unwrap();
/// assert_eq!(config.difficulty, Difficulty::Hard);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Seed for Easy's random choices; drawn from the thread RNG when absent
    pub seed: Option<u64>,
    /// Limit on quiet moves searched per node; forcing moves are never cut
    pub max_candidates: Option<usize>,
    /// Wall-clock budget per move; an expired search fails with `SearchCancelled`
    pub time_limit: Option<Duration>,
}

/// Type of search that produced the result.
///
/// This indicates which phase of the move policy found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchType {
    /// Completes five for the mover
    ImmediateWin,
    /// Blocks a cell where the opponent would complete five
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Easy's seeded random choice
    Random,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Chosen move
    pub best_move: Pos,
    /// Score for the mover (search value, or static evaluation after the move)
    pub score: i32,
    /// Phase of the policy that chose the move
    pub search_type: SearchType,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            nodes: 1,
            time_ms,
        }
    }

    #[inline]
    fn defense(pos: Pos, score: i32, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score,
            search_type: SearchType::Defense,
            nodes: 1,
            time_ms,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Holds no position state between calls. The only cross-call state is the
/// seeded random source used by Easy, so a fixed seed reproduces a game.
#[derive(Debug, Clone)]
pub struct AIEngine {
    config: EngineConfig,
    seed: u64,
    rng: Pcg32,
}

impl AIEngine {
    /// Create an engine for `difficulty` with a random seed and no limits.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        let seed: u64 = rand::rng().random();
        info!(%difficulty, seed, "engine seeded");
        Self {
            config: EngineConfig {
                difficulty,
                seed: Some(seed),
                ..EngineConfig::default()
            },
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create an engine from a full configuration.
    ///
    /// Fails with `InvalidArgument` for a zero candidate limit or time limit.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        if config.max_candidates == Some(0) {
            return Err(EngineError::InvalidArgument(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        if config.time_limit == Some(Duration::ZERO) {
            return Err(EngineError::InvalidArgument(
                "time_limit must be positive".to_string(),
            ));
        }
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::rng().random();
                info!(seed, "engine seeded");
                seed
            }
        };
        Ok(Self {
            config: EngineConfig {
                seed: Some(seed),
                ..config
            },
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Seed in use; pass it back through `EngineConfig::seed` to replay a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the best move for the given position.
    ///
    /// Use `get_move_with_stats` if you need search statistics.
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Result<Pos> {
        self.get_move_with_stats(board, color).map(|r| r.best_move)
    }

    /// Get the best move with detailed search statistics.
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone) -> Result<MoveResult> {
        self.get_move_cancellable(board, color, &CancelToken::new())
    }

    /// Like `get_move_with_stats`, stopping early once `cancel` fires.
    ///
    /// The configured time limit, if any, is added to `cancel` as a deadline.
    /// `board` is never modified: the search runs on a private copy.
    pub fn get_move_cancellable(
        &mut self,
        board: &Board,
        color: Stone,
        cancel: &CancelToken,
    ) -> Result<MoveResult> {
        let start = Instant::now();
        if !color.is_color() {
            return Err(EngineError::InvalidArgument(
                "side to move must be black or white".to_string(),
            ));
        }
        if winner(board).is_some() || board.is_full() {
            return Err(EngineError::NoLegalMoves);
        }

        let cancel = match self.config.time_limit {
            Some(limit) => cancel.clone().with_time_limit(limit),
            None => cancel.clone(),
        };
        let mut searcher = Searcher::new()
            .with_cancel(cancel)
            .with_max_quiet(self.config.max_candidates)?;
        let mut work = board.clone();
        let opponent = color.opponent();
        let difficulty = self.config.difficulty;

        let result = if difficulty == Difficulty::Easy {
            let threats = winning_moves(board, opponent);
            if threats.is_empty() {
                let found = searcher.search_with(&mut work, color, 0, &mut Seeded::new(&mut self.rng))?;
                MoveResult::from_search(found, SearchType::Random, elapsed_ms(start))
            } else {
                let block = threats[self.rng.random_range(0..threats.len())];
                let score = score_after(&mut work, block, color)?;
                MoveResult::defense(block, score, elapsed_ms(start))
            }
        } else if let Some(win) = find_winning_move(board, color) {
            MoveResult::immediate_win(win, elapsed_ms(start))
        } else if let Some(block) = find_winning_move(board, opponent) {
            let score = score_after(&mut work, block, color)?;
            MoveResult::defense(block, score, elapsed_ms(start))
        } else {
            let found = searcher.search(&mut work, color, difficulty.depth())?;
            MoveResult::from_search(found, SearchType::AlphaBeta, elapsed_ms(start))
        };

        debug!(
            %color,
            %difficulty,
            best = %result.best_move,
            score = result.score,
            search_type = ?result.search_type,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move chosen"
        );
        Ok(result)
    }

    /// Ranked hints for `color`, cut to `top_k`.
    ///
    /// Hard looks two plies deep; the other levels score moves statically.
    /// The configured quiet-move limit applies to the lookahead.
    pub fn suggest(&self, board: &Board, color: Stone, top_k: usize) -> Result<Vec<Suggestion>> {
        let lookahead = if self.config.difficulty == Difficulty::Hard { 2 } else { 1 };
        Suggester::new()
            .with_lookahead(lookahead)?
            .with_max_quiet(self.config.max_candidates)?
            .suggest(board, color, top_k)
    }
}

fn score_after(board: &mut Board, pos: Pos, color: Stone) -> Result<i32> {
    board.place(pos, color)?;
    let score = evaluate(board, color);
    board.remove(pos)?;
    Ok(score)
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::Category;

    fn engine(difficulty: Difficulty, seed: u64) -> AIEngine {
        AIEngine::with_config(EngineConfig {
            difficulty,
            seed: Some(seed),
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place(Pos::new(r, c), Stone::Black).unwrap();
        }
        for &(r, c) in white {
            board.place(Pos::new(r, c), Stone::White).unwrap();
        }
        board
    }

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 0);
        assert_eq!(Difficulty::Medium.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 5);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn test_config_validation() {
        let bad = EngineConfig {
            max_candidates: Some(0),
            ..EngineConfig::default()
        };
        assert!(matches!(
            AIEngine::with_config(bad),
            Err(EngineError::InvalidArgument(_))
        ));

        let bad = EngineConfig {
            time_limit: Some(Duration::ZERO),
            ..EngineConfig::default()
        };
        assert!(AIEngine::with_config(bad).is_err());
    }

    #[test]
    fn test_missing_seed_is_recorded() {
        let engine = AIEngine::with_config(EngineConfig::default()).unwrap();
        assert_eq!(engine.config().seed, Some(engine.seed()));
    }

    #[test]
    fn test_engine_empty_board() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let result = engine(difficulty, 1).get_move(&Board::new(), Stone::Black);
            assert_eq!(result, Ok(Pos::new(7, 7)), "{difficulty}");
        }
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let board = board_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(3, 3), (3, 4), (3, 5), (3, 6)]);
        let result = engine(Difficulty::Hard, 0)
            .get_move_with_stats(&board, Stone::Black)
            .unwrap();

        // Own win takes priority over blocking White's four
        assert_eq!(result.best_move, Pos::new(9, 4));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_open_four() {
        let board = board_with(&[(7, 7), (7, 8), (7, 9), (7, 10)], &[(6, 6), (8, 8), (6, 9)]);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let result = engine(difficulty, 0)
                .get_move_with_stats(&board, Stone::White)
                .unwrap();
            assert!(
                [Pos::new(7, 6), Pos::new(7, 11)].contains(&result.best_move),
                "{difficulty} played {}",
                result.best_move
            );
            assert_eq!(result.search_type, SearchType::Defense);
        }
    }

    #[test]
    fn test_engine_blocks_closed_four() {
        // White (3,4)-(3,7) is capped by Black at (3,3): the only block is (3,8)
        let board = board_with(&[(3, 3), (8, 8), (9, 9)], &[(3, 4), (3, 5), (3, 6), (3, 7)]);
        let result = engine(Difficulty::Hard, 0)
            .get_move_with_stats(&board, Stone::Black)
            .unwrap();
        assert_eq!(result.best_move, Pos::new(3, 8));
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_easy_blocks_immediate_loss() {
        let board = board_with(&[(10, 0), (12, 5)], &[(9, 0), (9, 1), (9, 2), (9, 3)]);
        for seed in 0..10 {
            let result = engine(Difficulty::Easy, seed)
                .get_move_with_stats(&board, Stone::Black)
                .unwrap();
            assert_eq!(result.best_move, Pos::new(9, 4));
            assert_eq!(result.search_type, SearchType::Defense);
        }
    }

    #[test]
    fn test_easy_reproducible_per_seed() {
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);
        let moves = |seed: u64| {
            let mut e = engine(Difficulty::Easy, seed);
            (0..5)
                .map(|_| e.get_move(&board, Stone::White).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(moves(99), moves(99));

        let first = engine(Difficulty::Easy, 99).get_move_with_stats(&board, Stone::White).unwrap();
        assert_eq!(first.search_type, SearchType::Random);
        assert!(crate::search::candidates(&board).contains(&first.best_move));
    }

    #[test]
    fn test_medium_deterministic() {
        let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (6, 6)]);
        let a = engine(Difficulty::Medium, 1).get_move(&board, Stone::White);
        let b = engine(Difficulty::Medium, 2).get_move(&board, Stone::White);
        assert_eq!(a, b);
    }

    #[test]
    fn test_engine_does_not_modify_board() {
        let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (6, 6)]);
        let before = board.clone();
        let result = engine(Difficulty::Medium, 0)
            .get_move_with_stats(&board, Stone::White)
            .unwrap();
        assert_eq!(board, before);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(result.nodes > 1);
    }

    #[test]
    fn test_hard_quiet_position_searches_full_depth() {
        // No four anywhere, so neither short-circuit applies
        let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (6, 6)]);
        assert!(winning_moves(&board, Stone::White).is_empty());
        assert!(winning_moves(&board, Stone::Black).is_empty());
        let before = board.clone();

        let hard = |seed| {
            AIEngine::with_config(EngineConfig {
                difficulty: Difficulty::Hard,
                seed: Some(seed),
                max_candidates: Some(6),
                time_limit: None,
            })
            .unwrap()
        };
        let first = hard(1).get_move_with_stats(&board, Stone::White).unwrap();
        let second = hard(2).get_move_with_stats(&board, Stone::White).unwrap();

        assert_eq!(first.search_type, SearchType::AlphaBeta);
        assert_eq!(board, before);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert!(first.nodes > 1);

        // Same answer as a direct five-ply search
        let mut work = board.clone();
        let direct = Searcher::new()
            .with_max_quiet(Some(6))
            .unwrap()
            .search(&mut work, Stone::White, 5)
            .unwrap();
        assert_eq!(direct.best_move, first.best_move);
        assert_eq!(direct.depth, 5);
    }

    #[test]
    fn test_finished_game_has_no_moves() {
        let board = board_with(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)], &[(5, 5), (6, 6)]);
        assert_eq!(
            engine(Difficulty::Easy, 0).get_move(&board, Stone::White),
            Err(EngineError::NoLegalMoves)
        );
        assert_eq!(
            engine(Difficulty::Hard, 0).get_move(&board, Stone::White),
            Err(EngineError::NoLegalMoves)
        );
    }

    #[test]
    fn test_cancelled_token() {
        let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (6, 6)]);
        let token = CancelToken::new();
        token.cancel();
        let result = engine(Difficulty::Hard, 0).get_move_cancellable(&board, Stone::White, &token);
        assert_eq!(result, Err(EngineError::SearchCancelled));
    }

    #[test]
    fn test_medium_converts_open_three_against_easy() {
        let mut medium = engine(Difficulty::Medium, 5);
        let mut easy = engine(Difficulty::Easy, 5);
        let mut board = board_with(&[(7, 5), (7, 6), (7, 7)], &[(6, 5), (8, 7), (10, 10)]);

        let mut color = Stone::Black;
        let mut result = None;
        for _ in 0..10 {
            let player = if color == Stone::Black { &mut medium } else { &mut easy };
            let pos = player.get_move(&board, color).unwrap();
            board.place(pos, color).unwrap();
            if let Some(w) = winner(&board) {
                result = Some(w);
                break;
            }
            color = color.opponent();
        }
        assert_eq!(result, Some(Stone::Black), "final board:\n{board}");
    }

    #[test]
    fn test_engine_suggest() {
        let board = board_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(3, 3)]);
        let hints = engine(Difficulty::Hard, 0).suggest(&board, Stone::Black, 3).unwrap();
        assert_eq!(hints[0].pos, Pos::new(9, 4));
        assert_eq!(hints[0].category, Category::Win);
        assert!(hints.len() <= 3);
    }
}

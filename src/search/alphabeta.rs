//! Alpha-Beta search over the candidate set
//!
//! Negamax with alpha-beta pruning. Each child is visited by placing the
//! stone, recursing and removing the stone again, so the board is restored
//! bit-for-bit before a subtree returns. Cancellation and errors are only
//! propagated after that removal.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&mut board, Stone::White, 2).unwrap();
//! println!("Best move: {}", result.best_move);
//! ```

use tracing::{debug, trace, warn};

use crate::board::{Board, Pos, Stone};
use crate::error::{EngineError, Result};
use crate::eval::{LineScores, LineUndo, PatternScore};
use crate::rules::{has_five_at_pos, winner};

use super::{candidates, order_moves, CancelToken, FirstFound, TieBreak};

/// Score of a completed five before the depth bonus
pub const WIN_SCORE: i32 = PatternScore::FIVE;

/// Infinity score for alpha-beta bounds
const INF: i32 = 1_000_000_000;

/// Deepest search accepted
pub const MAX_SEARCH_DEPTH: u8 = 10;

/// How many nodes pass between wall-clock checks
const CLOCK_CHECK_MASK: u64 = 1023;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Static evaluations at depth 0
    pub leaves: u64,
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    #[allow(clippy::cast_precision_loss)]
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found
    pub best_move: Pos,
    /// Score of the best move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Depth-bounded alpha-beta searcher.
///
/// Holds no position state between calls; the only settings are the
/// cancellation token and the optional quiet-move limit. Leaf scores come
/// from [`LineScores`], rebuilt at the start of every call and updated on
/// each place/remove.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    cancel: CancelToken,
    max_quiet: Option<usize>,
    nodes: u64,
    stats: SearchStats,
    scores: LineScores,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check this token before expanding each node.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Search at most `limit` quiet moves per node (forcing moves are always searched).
    pub fn with_max_quiet(mut self, limit: Option<usize>) -> Result<Self> {
        if limit == Some(0) {
            return Err(EngineError::InvalidArgument(
                "candidate limit must be at least 1".to_string(),
            ));
        }
        self.max_quiet = limit;
        Ok(self)
    }

    /// Search with deterministic first-found tie-breaking.
    pub fn search(&mut self, board: &mut Board, color: Stone, depth: u8) -> Result<SearchResult> {
        self.search_with(board, color, depth, &mut FirstFound)
    }

    /// Search `depth` plies and pick among equally scored root moves with `tie_break`.
    ///
    /// Depth 0 looks no further than the candidate list: every candidate
    /// ties at the current static score and `tie_break` alone decides.
    /// On return, successful or not, `board` equals its state at the call.
    pub fn search_with(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        tie_break: &mut dyn TieBreak,
    ) -> Result<SearchResult> {
        validate(color, depth)?;
        self.nodes = 0;
        self.stats = SearchStats::default();

        #[cfg(debug_assertions)]
        let snapshot = board.clone();

        let result = self.search_root(board, color, depth, tie_break);

        #[cfg(debug_assertions)]
        debug_assert_eq!(*board, snapshot, "search left the board modified");

        match &result {
            Ok(r) => debug!(
                best = %r.best_move,
                score = r.score,
                depth,
                nodes = r.nodes,
                cutoffs = r.stats.beta_cutoffs,
                "search finished"
            ),
            Err(EngineError::SearchCancelled) => warn!(nodes = self.nodes, "search cancelled"),
            Err(_) => {}
        }
        result
    }

    /// Value of playing `pos` for `color`, looking `depth` plies deep including the move.
    ///
    /// With `depth == 1` this is the static evaluation after the move.
    pub fn score_move(&mut self, board: &mut Board, pos: Pos, color: Stone, depth: u8) -> Result<i32> {
        validate(color, depth)?;
        if depth == 0 {
            return Err(EngineError::InvalidArgument(
                "move lookahead must be at least 1".to_string(),
            ));
        }
        self.scores = LineScores::new(board);
        let undo = self.place(board, pos, color)?;
        let child = self.child_score(board, pos, color, depth, -INF, INF);
        self.remove(board, pos, undo)?;
        child
    }

    fn search_root(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        tie_break: &mut dyn TieBreak,
    ) -> Result<SearchResult> {
        if self.cancel.should_stop() {
            return Err(EngineError::SearchCancelled);
        }
        if winner(board).is_some() {
            return Err(EngineError::NoLegalMoves);
        }
        let moves = candidates(board);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        self.nodes = 1;
        self.scores = LineScores::new(board);

        // Only one move: nothing to compare it against
        if let &[only] = moves.as_slice() {
            let undo = self.place(board, only, color)?;
            let score = self.child_score(board, only, color, depth.min(1), -INF, INF);
            self.remove(board, only, undo)?;
            return Ok(self.result(only, score?, depth));
        }

        if depth == 0 {
            let score = self.scores.evaluate(color);
            let best_move = tie_break.choose(&moves).ok_or(EngineError::NoLegalMoves)?;
            return Ok(self.result(best_move, score, depth));
        }

        let ordered = order_moves(board, color, &moves, self.max_quiet);
        let widen = i32::from(tie_break.wants_ties());
        let mut alpha = -INF;
        let beta = INF;
        let mut best_score = -INF;
        let mut tied: Vec<Pos> = Vec::new();

        for &mov in &ordered {
            if self.cancel.should_stop() {
                return Err(EngineError::SearchCancelled);
            }
            let undo = self.place(board, mov, color)?;
            let child = self.child_score(board, mov, color, depth, alpha - widen, beta);
            self.remove(board, mov, undo)?;
            let score = child?;
            trace!(%mov, score, "root move");

            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(mov);
            } else if score == best_score {
                tied.push(mov);
            }
            alpha = alpha.max(best_score);
        }

        let best_move = tie_break.choose(&tied).ok_or(EngineError::NoLegalMoves)?;
        Ok(self.result(best_move, best_score, depth))
    }

    /// Score of the stone just placed at `mov` for `color`, with `depth`
    /// plies remaining at the node where it was placed.
    fn child_score(
        &mut self,
        board: &mut Board,
        mov: Pos,
        color: Stone,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> Result<i32> {
        if has_five_at_pos(board, mov, color) {
            // Sooner wins score higher, later losses score less negative
            return Ok(WIN_SCORE + i32::from(depth));
        }
        if depth <= 1 {
            self.stats.leaves += 1;
            return Ok(self.scores.evaluate(color));
        }
        Ok(-self.negamax(board, color.opponent(), depth - 1, -beta, -alpha)?)
    }

    /// Recursive alpha-beta search with negamax formulation.
    fn negamax(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32> {
        self.nodes += 1;
        if self.cancel.is_cancelled()
            || (self.nodes & CLOCK_CHECK_MASK == 0 && self.cancel.deadline_passed())
        {
            return Err(EngineError::SearchCancelled);
        }

        let moves = candidates(board);
        if moves.is_empty() {
            // Full board: draw
            return Ok(0);
        }
        let ordered = order_moves(board, color, &moves, self.max_quiet);

        let mut best = -INF;
        for (i, &mov) in ordered.iter().enumerate() {
            let undo = self.place(board, mov, color)?;
            let child = self.child_score(board, mov, color, depth, alpha, beta);
            self.remove(board, mov, undo)?;
            let score = child?;

            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }
        Ok(best)
    }

    /// Place a stone and rescore the lines through it.
    fn place(&mut self, board: &mut Board, mov: Pos, color: Stone) -> Result<LineUndo> {
        board.place(mov, color)?;
        Ok(self.scores.update(board, mov))
    }

    fn remove(&mut self, board: &mut Board, mov: Pos, undo: LineUndo) -> Result<()> {
        board.remove(mov)?;
        self.scores.undo(undo);
        Ok(())
    }

    fn result(&self, best_move: Pos, score: i32, depth: u8) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }
}

fn validate(color: Stone, depth: u8) -> Result<()> {
    if !color.is_color() {
        return Err(EngineError::InvalidArgument(
            "side to move must be black or white".to_string(),
        ));
    }
    if depth > MAX_SEARCH_DEPTH {
        return Err(EngineError::InvalidArgument(format!(
            "depth {depth} exceeds maximum {MAX_SEARCH_DEPTH}"
        )));
    }
    Ok(())
}

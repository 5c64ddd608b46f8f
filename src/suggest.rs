//! Ranked move hints
//!
//! Runs the evaluator (or a shallow search) over every candidate and sorts
//! the result into the hint categories: winning moves first, then forced
//! blocks, then everything else by score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::error::{EngineError, Result};
use crate::eval::{evaluate, score_for};
use crate::rules::{makes_five, winner};
use crate::search::{candidates, CancelToken, Searcher, MAX_SEARCH_DEPTH};

/// Hint category, in display priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The move completes five
    Win,
    /// Not playing here lets the opponent complete five next ply
    Block,
    /// Ranked by evaluation after the move
    Score,
}

/// One ranked hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub pos: Pos,
    /// Evaluation for the mover after playing `pos`
    pub score: i32,
    /// Mover's own pattern weight after playing `pos`; breaks score ties
    pub raw_weight: i32,
    pub category: Category,
}

/// Suggestion ranker.
///
/// With the default lookahead of 1 each move is scored by the static
/// evaluation after playing it. A larger lookahead scores it with the
/// searcher instead, `lookahead` plies deep including the move itself.
#[derive(Debug, Clone)]
pub struct Suggester {
    lookahead: u8,
    max_quiet: Option<usize>,
    cancel: CancelToken,
}

impl Default for Suggester {
    fn default() -> Self {
        Self {
            lookahead: 1,
            max_quiet: None,
            cancel: CancelToken::default(),
        }
    }
}

impl Suggester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score moves `lookahead` plies deep. Must be in `1..=MAX_SEARCH_DEPTH`.
    pub fn with_lookahead(mut self, lookahead: u8) -> Result<Self> {
        if lookahead == 0 || lookahead > MAX_SEARCH_DEPTH {
            return Err(EngineError::InvalidArgument(format!(
                "lookahead must be between 1 and {MAX_SEARCH_DEPTH}, got {lookahead}"
            )));
        }
        self.lookahead = lookahead;
        Ok(self)
    }

    /// Search at most `limit` quiet replies per node when looking ahead.
    ///
    /// Only affects scores with a lookahead above 1; every candidate is
    /// still ranked.
    pub fn with_max_quiet(mut self, limit: Option<usize>) -> Result<Self> {
        if limit == Some(0) {
            return Err(EngineError::InvalidArgument(
                "candidate limit must be at least 1".to_string(),
            ));
        }
        self.max_quiet = limit;
        Ok(self)
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Up to `top_k` hints for `color`, best first.
    ///
    /// Order: category, then score (higher first), then raw pattern weight
    /// (higher first), then candidate generator order.
    pub fn suggest(&self, board: &Board, color: Stone, top_k: usize) -> Result<Vec<Suggestion>> {
        if top_k == 0 {
            return Err(EngineError::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !color.is_color() {
            return Err(EngineError::InvalidArgument(
                "side to move must be black or white".to_string(),
            ));
        }
        if winner(board).is_some() {
            return Err(EngineError::NoLegalMoves);
        }
        let moves = candidates(board);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let mut searcher = Searcher::new()
            .with_cancel(self.cancel.clone())
            .with_max_quiet(self.max_quiet)?;
        let mut work = board.clone();
        let mut ranked = Vec::with_capacity(moves.len());
        for pos in moves {
            if self.cancel.should_stop() {
                return Err(EngineError::SearchCancelled);
            }
            let category = if makes_five(board, pos, color) {
                Category::Win
            } else if makes_five(board, pos, color.opponent()) {
                Category::Block
            } else {
                Category::Score
            };

            let score = if self.lookahead > 1 {
                searcher.score_move(&mut work, pos, color, self.lookahead)?
            } else {
                work.place(pos, color)?;
                let score = evaluate(&work, color);
                work.remove(pos)?;
                score
            };
            work.place(pos, color)?;
            let raw_weight = score_for(&work, color);
            work.remove(pos)?;

            ranked.push(Suggestion {
                pos,
                score,
                raw_weight,
                category,
            });
        }

        ranked.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.score.cmp(&a.score))
                .then(b.raw_weight.cmp(&a.raw_weight))
        });
        ranked.truncate(top_k);

        debug!(
            %color,
            count = ranked.len(),
            top = ?ranked.first().map(|s| (s.pos, s.category)),
            "suggestions ranked"
        );
        Ok(ranked)
    }
}

/// Rank hints for `color` with static scoring. See [`Suggester::suggest`].
pub fn suggest(board: &Board, color: Stone, top_k: usize) -> Result<Vec<Suggestion>> {
    Suggester::new().suggest(board, color, top_k)
}

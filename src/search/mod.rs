//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation around existing stones
//! - Tactical move ordering
//! - Alpha-Beta search with cooperative cancellation
//! - Tie-break strategies for equally scored root moves

pub mod alphabeta;
pub mod cancel;
pub mod candidates;
pub mod ordering;
pub mod tiebreak;

pub use alphabeta::{SearchResult, SearchStats, Searcher, MAX_SEARCH_DEPTH, WIN_SCORE};
pub use cancel::CancelToken;
pub use candidates::{candidates, CANDIDATE_RADIUS};
pub use ordering::{classify_move, order_moves, MoveClass};
pub use tiebreak::{FirstFound, Seeded, TieBreak};

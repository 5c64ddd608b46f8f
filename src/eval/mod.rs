//! Evaluation module for Gomoku positions
//!
//! Pattern recognition over sliding 5-cell windows and the weighted sum
//! that scores a board for one side.

pub mod heuristic;
pub mod incremental;
pub mod patterns;

pub use heuristic::{evaluate, score_for};
pub use incremental::{LineScores, LineUndo};
pub use patterns::{classify_window, Pattern, PatternScore};

//! Error types for the Gomoku engine
//!
//! Every fallible engine operation returns [`Result`]. Nothing is silently
//! swallowed: the engine never guesses a move when it fails.

use thiserror::Error;

/// Errors that can occur in the Gomoku engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Placing on an occupied or out-of-range cell, or removing from an empty one.
    /// Always a caller bug.
    #[error("Invalid move at ({row}, {col}): {reason}")]
    InvalidMove { row: i32, col: i32, reason: &'static str },

    /// Bad depth, top-k, side to move or other parameter shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Board is full or the game is already decided; callers treat this as a draw/end
    #[error("No legal moves available")]
    NoLegalMoves,

    /// Cooperative cancellation; the board has been unwound to its pre-call state
    #[error("Search cancelled")]
    SearchCancelled,
}

impl EngineError {
    pub(crate) fn invalid_move(row: impl Into<i32>, col: impl Into<i32>, reason: &'static str) -> Self {
        Self::InvalidMove {
            row: row.into(),
            col: col.into(),
            reason,
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

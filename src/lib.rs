//! Gomoku move-search engine
//!
//! A deterministic game-tree engine for freestyle Gomoku:
//! - 15x15 board
//! - 5-in-a-row to win (overlines count)
//! - No captures, no forbidden moves
//!
//! Given a board and a side to move it returns a best move under a
//! difficulty (search depth) budget, or a ranked list of hints.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards, and line extraction
//! - [`rules`]: Five-in-a-row detection and threat queries
//! - [`eval`]: Sliding-window pattern evaluation
//! - [`search`]: Candidate generation, move ordering, alpha-beta search
//! - [`engine`]: Difficulty policy integrating all components
//! - [`suggest`]: Ranked hints for display
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new(Difficulty::Medium);
//!
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! // AI responds as White
//! let pos = engine.get_move(&board, Stone::White).unwrap();
//! board.place(pos, Stone::White).unwrap();
//! println!("AI plays at ({}, {})", pos.row, pos.col);
//! ```
//!
//! # Search Priority
//!
//! For Medium and Hard the engine follows this priority:
//! 1. Immediate winning move (instant)
//! 2. Block of the opponent's immediate win
//! 3. Alpha-Beta search at the difficulty's depth
//!
//! Easy plays a seeded random candidate unless it has to block.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod suggest;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use engine::{AIEngine, Difficulty, EngineConfig, MoveResult, SearchType};
pub use error::{EngineError, Result};
pub use eval::evaluate;
pub use search::{CancelToken, SearchResult, Searcher};
pub use suggest::{suggest, Category, Suggester, Suggestion};

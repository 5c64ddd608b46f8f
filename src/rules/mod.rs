//! Game rules for freestyle Gomoku
//!
//! - Win conditions (five or more in a row)
//! - One-ply threat queries (winning cells, open threats)

pub mod threat;
pub mod win;

// Re-exports for convenient access
pub use threat::{creates_open_threat, find_winning_move, winning_moves};
pub use win::{
    find_five_positions, has_five_at_pos, has_five_in_row, makes_five, run_through, winner, FIVE,
};

//! Candidate move generation
//!
//! Only empty cells near existing stones are worth searching. This bounds the
//! branching factor to a few dozen moves on a populated board instead of 225.

use crate::board::{Board, Pos, TOTAL_CELLS};

/// Chebyshev radius around existing stones that candidate cells must lie in
pub const CANDIDATE_RADIUS: i32 = 2;

/// Empty cells within [`CANDIDATE_RADIUS`] of a stone, in row-major order.
///
/// An empty board yields the center cell only. A board whose stones have no
/// free neighborhood left falls back to every empty cell, so the list is
/// empty only when the board is full.
pub fn candidates(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![Pos::center()];
    }

    let mut near = [false; TOTAL_CELLS];
    for pos in board.occupied().iter_ones() {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                if let Some(p) = pos.offset(dr, dc, 1) {
                    near[p.to_index()] = true;
                }
            }
        }
    }

    let mut moves: Vec<Pos> = (0..TOTAL_CELLS)
        .filter(|&idx| near[idx])
        .map(Pos::from_index)
        .filter(|&p| board.is_empty(p))
        .collect();

    if moves.is_empty() {
        moves = board.empty_cells().collect();
    }
    moves
}

//! One-ply threat queries used for short-circuits and move ordering

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::win::{makes_five, run_through};

/// Every empty cell where `color` completes five, in row-major order.
///
/// Only cells near a stone can complete a line, so the scan is limited to
/// the neighborhood of `color`'s own stones.
pub fn winning_moves(board: &Board, color: Stone) -> Vec<Pos> {
    let Some(stones) = board.stones(color) else {
        return Vec::new();
    };
    if stones.count() < 4 {
        return Vec::new();
    }
    let mut seen = [false; crate::board::TOTAL_CELLS];
    let mut wins = Vec::new();
    for stone in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            for dist in -4..=4 {
                let Some(p) = stone.offset(dr, dc, dist) else {
                    continue;
                };
                if seen[p.to_index()] {
                    continue;
                }
                seen[p.to_index()] = true;
                if makes_five(board, p, color) {
                    wins.push(p);
                }
            }
        }
    }
    wins.sort_unstable();
    wins
}

/// First cell (row-major) where `color` completes five.
#[inline]
pub fn find_winning_move(board: &Board, color: Stone) -> Option<Pos> {
    winning_moves(board, color).into_iter().next()
}

/// Whether placing `color` at the empty `pos` creates a run of at least
/// `min_count` stones with at least one open end.
pub fn creates_open_threat(board: &Board, pos: Pos, color: Stone, min_count: usize) -> bool {
    if !color.is_color() || !board.is_empty(pos) {
        return false;
    }
    DIRECTIONS.iter().any(|&dir| {
        let (run, open_ends) = run_through(board, pos, dir, color);
        run + 1 >= min_count && open_ends >= 1
    })
}

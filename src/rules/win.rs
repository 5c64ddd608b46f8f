//! Win condition checking
//!
//! Five or more stones of one color in a row wins; overlines count.

use crate::board::{Board, Direction, Pos, Stone, DIRECTIONS};

/// Stones needed in a row to win
pub const FIVE: usize = 5;

/// Count consecutive `color` stones next to `pos` along `dir`, both ways.
///
/// The cell at `pos` itself is not counted, so this works both for a stone
/// already on the board and for a hypothetical placement on an empty cell.
/// Returns `(run, open_ends)` where `open_ends` counts the empty cells that
/// terminate the run (0..=2).
#[inline]
pub fn run_through(board: &Board, pos: Pos, (dr, dc): Direction, color: Stone) -> (usize, u8) {
    let mut run = 0;
    let mut open_ends = 0;
    for sign in [1, -1] {
        let mut dist = 1;
        loop {
            match pos.offset(dr * sign, dc * sign, dist).map(|p| board.get(p)) {
                Some(s) if s == color => {
                    run += 1;
                    dist += 1;
                }
                Some(Stone::Empty) => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }
    (run, open_ends)
}

/// Fast five-in-a-row check through a specific stone.
///
/// Only checks 4 directions from the given position. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    board.get(pos) == color
        && DIRECTIONS
            .iter()
            .any(|&dir| run_through(board, pos, dir, color).0 + 1 >= FIVE)
}

/// Whether placing `color` on the empty cell `pos` completes five.
///
/// Does not mutate the board.
#[inline]
pub fn makes_five(board: &Board, pos: Pos, color: Stone) -> bool {
    color.is_color()
        && board.is_empty(pos)
        && DIRECTIONS
            .iter()
            .any(|&dir| run_through(board, pos, dir, color).0 + 1 >= FIVE)
}

/// Find the positions of a 5-in-a-row if one exists
///
/// Returns the whole run (at least 5 positions) in line order.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            // Only start from the first stone of a run
            if pos.offset(-dr, -dc, 1).is_some_and(|p| board.get(p) == stone) {
                continue;
            }
            let line: Vec<Pos> = (0..)
                .map_while(|i| pos.offset(dr, dc, i).filter(|&p| board.get(p) == stone))
                .collect();
            if line.len() >= FIVE {
                return Some(line);
            }
        }
    }
    None
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Check for a winner
///
/// Returns `Some(Stone)` if either color has five in a row. Black is
/// reported first if (illegally) both do.
pub fn winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&s| has_five_in_row(board, s))
}

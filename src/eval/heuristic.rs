//! Heuristic evaluation function for Gomoku board positions
//!
//! Every line on the board is cut into sliding 5-cell windows; each window
//! is classified per color and the pattern weights are summed. The result
//! for one side is its own total minus the opponent's, which makes
//! `evaluate(board, c) == -evaluate(board, c.opponent())` hold exactly.

use crate::board::{lines, Board, Line, Stone};

use super::patterns::classify_window;

const WINDOW: usize = 5;

/// Evaluate the board from the perspective of the given color.
///
/// Positive values favor `color`. An empty board scores 0.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let (black, white) = pattern_totals(board);
    match color {
        Stone::Black => black - white,
        Stone::White => white - black,
        Stone::Empty => 0,
    }
}

/// Sum of pattern weights for `color` alone (its "raw pattern weight").
#[must_use]
pub fn score_for(board: &Board, color: Stone) -> i32 {
    if !color.is_color() {
        return 0;
    }
    lines(board).map(|line| line_score(&line, color)).sum()
}

/// Pattern totals for (Black, White) in one pass over the lines.
fn pattern_totals(board: &Board) -> (i32, i32) {
    lines(board).fold((0, 0), |(b, w), line| {
        (
            b + line_score(&line, Stone::Black),
            w + line_score(&line, Stone::White),
        )
    })
}

/// Score every window of one line for `color`.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn line_score(line: &Line, color: Stone) -> i32 {
    let cells = line.cells();
    if cells.len() < WINDOW {
        return 0;
    }
    (0..=cells.len() - WINDOW)
        .filter_map(|i| {
            let before = line.get(i as isize - 1);
            let after = line.get((i + WINDOW) as isize);
            classify_window(&cells[i..i + WINDOW], before, after, color)
        })
        .map(|p| p.weight())
        .sum()
}

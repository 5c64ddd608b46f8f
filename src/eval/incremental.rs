//! Pattern totals maintained move by move
//!
//! A stone placed or removed at a cell only changes the four lines through
//! that cell. [`LineScores`] caches the pattern total of every line for both
//! colors, rescores just those four lines after each change, and restores
//! the saved totals on undo without rescoring anything.
//!
//! The totals always equal a full [`evaluate`](super::evaluate) of the
//! same board, so search scores do not depend on which one is used.

use crate::board::line::WIN_LENGTH;
use crate::board::{lines, lines_through, Board, Direction, Pos, Stone, BOARD_SIZE};

use super::heuristic::line_score;

/// Rows, columns and diagonals long enough to hold a five
pub const LINE_COUNT: usize = 72;

/// (Black, White) pattern total of one line
type Totals = (i32, i32);

/// Saved totals for the lines touched by one [`LineScores::update`].
#[derive(Debug, Clone, Copy)]
pub struct LineUndo {
    saved: [Option<(usize, Totals)>; 4],
    black: i32,
    white: i32,
}

/// Per-line pattern totals for both colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScores {
    lines: [Totals; LINE_COUNT],
    black: i32,
    white: i32,
}

impl Default for LineScores {
    /// Totals of the empty board
    fn default() -> Self {
        Self {
            lines: [(0, 0); LINE_COUNT],
            black: 0,
            white: 0,
        }
    }
}

impl LineScores {
    /// Score every line of `board`.
    pub fn new(board: &Board) -> Self {
        let mut scores = Self::default();
        for line in lines(board) {
            let Some(id) = line.pos_at(0).and_then(|p| line_id(p, line.direction())) else {
                continue;
            };
            let totals = (line_score(&line, Stone::Black), line_score(&line, Stone::White));
            scores.lines[id] = totals;
            scores.black += totals.0;
            scores.white += totals.1;
        }
        scores
    }

    /// Rescore the lines through `pos` after its cell changed on `board`.
    ///
    /// Pass the returned record to [`undo`](Self::undo) once the cell is
    /// changed back.
    pub fn update(&mut self, board: &Board, pos: Pos) -> LineUndo {
        let mut undo = LineUndo {
            saved: [None; 4],
            black: self.black,
            white: self.white,
        };
        for (slot, (line, _)) in undo.saved.iter_mut().zip(lines_through(board, pos)) {
            let Some(id) = line_id(pos, line.direction()) else {
                continue;
            };
            let old = self.lines[id];
            let new = (line_score(&line, Stone::Black), line_score(&line, Stone::White));
            self.black += new.0 - old.0;
            self.white += new.1 - old.1;
            self.lines[id] = new;
            *slot = Some((id, old));
        }
        undo
    }

    /// Restore the totals saved by the matching [`update`](Self::update).
    pub fn undo(&mut self, undo: LineUndo) {
        for (id, old) in undo.saved.into_iter().flatten() {
            self.lines[id] = old;
        }
        self.black = undo.black;
        self.white = undo.white;
    }

    /// Own total minus the opponent's, as [`evaluate`](super::evaluate) scores it.
    #[inline]
    pub fn evaluate(&self, color: Stone) -> i32 {
        match color {
            Stone::Black => self.black - self.white,
            Stone::White => self.white - self.black,
            Stone::Empty => 0,
        }
    }
}

/// Slot of the line along `dir` through `pos`, or `None` when that line is
/// shorter than five cells.
///
/// Rows take 0..15, columns 15..30, SE diagonals 30..51 and SW diagonals 51..72.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn line_id(pos: Pos, dir: Direction) -> Option<usize> {
    let n = BOARD_SIZE as i32;
    let span = n - WIN_LENGTH as i32; // 10
    let low = WIN_LENGTH as i32 - 1; // 4
    let (r, c) = (i32::from(pos.row), i32::from(pos.col));
    let id = match dir {
        (0, 1) => r,
        (1, 0) => n + c,
        (1, 1) => {
            let diff = c - r;
            if diff.abs() > span {
                return None;
            }
            2 * n + span + diff
        }
        (1, -1) => {
            let sum = r + c;
            if sum < low || sum > 2 * (n - 1) - low {
                return None;
            }
            2 * n + 2 * span + 1 + sum - low
        }
        _ => return None,
    };
    Some(id as usize)
}

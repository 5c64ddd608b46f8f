//! Move ordering for alpha-beta
//!
//! Forcing moves go first so cutoffs come early: own wins, then blocks of the
//! opponent's wins, then blocks of the opponent's open threats, then the rest.
//! The partition is stable, so generator order decides inside each class and
//! the result stays deterministic.

use crate::board::{Board, Pos, Stone};
use crate::rules::{creates_open_threat, makes_five};

/// Run length an opponent threat must reach before blocking it is forced-ish
const THREAT_RUN: usize = 3;

/// Tactical class of a candidate, in search priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveClass {
    /// Completes five for the mover
    Win,
    /// Takes a cell where the opponent would complete five
    Block,
    /// Takes a cell where the opponent would make an open run of three or more
    Defend,
    /// Everything else
    Quiet,
}

/// Classify a candidate for the side to move.
pub fn classify_move(board: &Board, pos: Pos, color: Stone) -> MoveClass {
    let opponent = color.opponent();
    if makes_five(board, pos, color) {
        MoveClass::Win
    } else if makes_five(board, pos, opponent) {
        MoveClass::Block
    } else if creates_open_threat(board, pos, opponent, THREAT_RUN) {
        MoveClass::Defend
    } else {
        MoveClass::Quiet
    }
}

/// Reorder `moves` by [`MoveClass`], keeping generator order inside a class.
///
/// `max_quiet` caps only the quiet class; forcing moves are never dropped.
pub fn order_moves(board: &Board, color: Stone, moves: &[Pos], max_quiet: Option<usize>) -> Vec<Pos> {
    let mut classified: Vec<(MoveClass, Pos)> = moves
        .iter()
        .map(|&pos| (classify_move(board, pos, color), pos))
        .collect();
    classified.sort_by_key(|&(class, _)| class);

    let limit = max_quiet.unwrap_or(usize::MAX);
    let mut quiet_taken = 0usize;
    classified
        .into_iter()
        .filter(|&(class, _)| {
            if class != MoveClass::Quiet {
                return true;
            }
            quiet_taken += 1;
            quiet_taken <= limit
        })
        .map(|(_, pos)| pos)
        .collect()
}

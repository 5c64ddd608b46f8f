//! Board structure with checked placement and removal

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE};
use crate::error::{EngineError, Result};

/// Game board: one bitboard per color.
///
/// The search mutates a board in place with [`Board::place`] and restores it
/// with [`Board::remove`]; no snapshot is taken implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Build a position from alternating moves, Black first.
    pub fn from_moves(moves: &[Pos]) -> Result<Self> {
        let mut board = Self::new();
        let mut color = Stone::Black;
        for &pos in moves {
            board.place(pos, color)?;
            color = color.opponent();
        }
        Ok(board)
    }

    /// Get stone at a position; off-board positions read as `Empty`
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is an empty cell on the board
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.in_bounds() && !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone on an empty, in-range cell.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<()> {
        if !pos.in_bounds() {
            return Err(EngineError::invalid_move(pos.row, pos.col, "out of range"));
        }
        if !self.is_empty(pos) {
            return Err(EngineError::invalid_move(pos.row, pos.col, "cell is occupied"));
        }
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {
                return Err(EngineError::InvalidArgument(
                    "cannot place an empty stone".to_string(),
                ))
            }
        }
        Ok(())
    }

    /// Restore a cell to empty. Only valid on a cell the caller placed.
    pub fn remove(&mut self, pos: Pos) -> Result<()> {
        if !pos.in_bounds() {
            return Err(EngineError::invalid_move(pos.row, pos.col, "out of range"));
        }
        if self.is_empty(pos) {
            return Err(EngineError::invalid_move(pos.row, pos.col, "cell is already empty"));
        }
        self.black.clear(pos);
        self.white.clear(pos);
        Ok(())
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// All occupied cells
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black.union(&self.white)
    }

    /// Whether any stone lies within Chebyshev distance `radius` of `pos`.
    pub fn has_neighbor_within(&self, pos: Pos, radius: i32) -> bool {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(p) = pos.offset(dr, dc, 1) {
                    if !self.is_empty(p) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == BOARD_SIZE * BOARD_SIZE
    }

    /// Color whose turn it is, assuming Black moved first and colors alternated.
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.black.count() <= self.white.count() {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE)
            .map(Pos::from_index)
            .filter(|&p| self.is_empty(p))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{c:3}")?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE {
            write!(f, "{r:3}")?;
            for c in 0..BOARD_SIZE {
                let ch = match self.get(Pos::new(r as u8, c as u8)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{ch:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Directional line extraction
//!
//! A [`Line`] is the ordered run of cells along one of the four directions,
//! clipped at the board edges. The evaluator slides 5-cell windows across
//! these; the ranker and threat queries look at the lines through one cell.

use arrayvec::ArrayVec;

use super::{Board, Pos, Stone, BOARD_SIZE};

/// Minimum length for a line to hold a five
pub const WIN_LENGTH: usize = 5;

/// Step vector `(dr, dc)` along a line
pub type Direction = (i32, i32);

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [Direction; 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// An ordered sequence of cells along one direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    start: Pos,
    dir: Direction,
    cells: ArrayVec<Stone, BOARD_SIZE>,
}

impl Line {
    /// Read the line starting at `start` and running along `dir` to the edge.
    fn read(board: &Board, start: Pos, dir: Direction) -> Self {
        let mut cells = ArrayVec::new();
        let mut cur = Some(start);
        while let Some(p) = cur {
            cells.push(board.get(p));
            cur = p.offset(dir.0, dir.1, 1);
        }
        Self { start, dir, cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Board cell at index `i` of this line
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn pos_at(&self, i: usize) -> Option<Pos> {
        if i >= self.cells.len() {
            return None;
        }
        self.start.offset(self.dir.0, self.dir.1, i as i32)
    }

    /// Cell just outside or inside the line at a signed index; `None` off the board.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    pub fn get(&self, i: isize) -> Option<Stone> {
        if i < 0 {
            None
        } else {
            self.cells.get(i as usize).copied()
        }
    }
}

/// Every row, column and diagonal long enough to contain a five.
pub fn lines(board: &Board) -> impl Iterator<Item = Line> + '_ {
    let n = BOARD_SIZE as u8;
    let last_start = n - WIN_LENGTH as u8; // 10

    let rows = (0..n).map(|r| (Pos::new(r, 0), (0, 1)));
    let cols = (0..n).map(|c| (Pos::new(0, c), (1, 0)));
    let diag_se = (0..=last_start)
        .map(|c| Pos::new(0, c))
        .chain((1..=last_start).map(|r| Pos::new(r, 0)))
        .map(|p| (p, (1, 1)));
    let diag_sw = (WIN_LENGTH as u8 - 1..n)
        .map(|c| Pos::new(0, c))
        .chain((1..=last_start).map(move |r| Pos::new(r, n - 1)))
        .map(|p| (p, (1, -1)));

    rows.chain(cols)
        .chain(diag_se)
        .chain(diag_sw)
        .map(move |(start, dir)| Line::read(board, start, dir))
}

/// The four full lines through `pos`, each with the index of `pos` inside it.
pub fn lines_through(board: &Board, pos: Pos) -> [(Line, usize); 4] {
    DIRECTIONS.map(|(dr, dc)| {
        let mut start = pos;
        let mut idx = 0;
        while let Some(prev) = start.offset(-dr, -dc, 1) {
            start = prev;
            idx += 1;
        }
        (Line::read(board, start, (dr, dc)), idx)
    })
}

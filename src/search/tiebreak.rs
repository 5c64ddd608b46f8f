//! Tie-break strategies for equally scored root moves

use rand::Rng;

use crate::board::Pos;

/// Picks one move among root moves that share the best score.
pub trait TieBreak {
    /// Whether ties must be exact. The root then searches with a window one
    /// point wider so an equal score is a real value rather than a bound.
    fn wants_ties(&self) -> bool {
        false
    }

    /// Choose from `tied` (in search order). Returns `None` only when empty.
    fn choose(&mut self, tied: &[Pos]) -> Option<Pos>;
}

/// Deterministic: the first best move in search order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFound;

impl TieBreak for FirstFound {
    fn choose(&mut self, tied: &[Pos]) -> Option<Pos> {
        tied.first().copied()
    }
}

/// Uniform choice among exact ties using a caller-owned random source.
#[derive(Debug)]
pub struct Seeded<'a, R> {
    rng: &'a mut R,
}

impl<'a, R: Rng> Seeded<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TieBreak for Seeded<'_, R> {
    fn wants_ties(&self) -> bool {
        true
    }

    fn choose(&mut self, tied: &[Pos]) -> Option<Pos> {
        if tied.is_empty() {
            return None;
        }
        Some(tied[self.rng.random_range(0..tied.len())])
    }
}

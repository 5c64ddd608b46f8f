//! Pattern weights and 5-cell window classification
//!
//! A window's pattern depends only on how many own, opponent and empty cells
//! it holds and on whether the two cells just outside it are empty.

use serde::{Deserialize, Serialize};

use crate::board::Stone;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - terminal
    pub const FIVE: i32 = 100_000;

    /// Open four: _OOOO_ style window, both flanks empty
    pub const OPEN_FOUR: i32 = 10_000;
    /// Closed four: one way left to complete
    pub const CLOSED_FOUR: i32 = 3_000;

    /// Open three: both flanks empty
    pub const OPEN_THREE: i32 = 1_000;
    /// Closed three: exactly one flank empty
    pub const CLOSED_THREE: i32 = 200;

    /// Open two: both flanks empty
    pub const OPEN_TWO: i32 = 50;
}

/// Classified shape of a single window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    Five,
    OpenFour,
    ClosedFour,
    OpenThree,
    ClosedThree,
    OpenTwo,
}

impl Pattern {
    #[inline]
    pub const fn weight(self) -> i32 {
        match self {
            Pattern::Five => PatternScore::FIVE,
            Pattern::OpenFour => PatternScore::OPEN_FOUR,
            Pattern::ClosedFour => PatternScore::CLOSED_FOUR,
            Pattern::OpenThree => PatternScore::OPEN_THREE,
            Pattern::ClosedThree => PatternScore::CLOSED_THREE,
            Pattern::OpenTwo => PatternScore::OPEN_TWO,
        }
    }
}

/// Classify a 5-cell window for `color`.
///
/// `before` and `after` are the cells immediately outside the window;
/// `None` means off the board, which never counts as an open flank.
/// Windows holding both colors are dead and classify as `None`.
pub fn classify_window(
    window: &[Stone],
    before: Option<Stone>,
    after: Option<Stone>,
    color: Stone,
) -> Option<Pattern> {
    debug_assert_eq!(window.len(), 5);
    let opponent = color.opponent();

    let mut own = 0u8;
    for &cell in window {
        if cell == color {
            own += 1;
        } else if cell == opponent {
            return None;
        }
    }

    let open_flanks =
        u8::from(before == Some(Stone::Empty)) + u8::from(after == Some(Stone::Empty));

    match (own, open_flanks) {
        (5, _) => Some(Pattern::Five),
        (4, 2) => Some(Pattern::OpenFour),
        // The empty cell inside the window still completes five
        (4, _) => Some(Pattern::ClosedFour),
        (3, 2) => Some(Pattern::OpenThree),
        (3, 1) => Some(Pattern::ClosedThree),
        (2, 2) => Some(Pattern::OpenTwo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Stone = Stone::Black;
    const W: Stone = Stone::White;
    const E: Stone = Stone::Empty;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_weight_table() {
        assert_eq!(Pattern::Five.weight(), 100_000);
        assert_eq!(Pattern::OpenFour.weight(), 10_000);
        assert_eq!(Pattern::ClosedFour.weight(), 3_000);
        assert_eq!(Pattern::OpenThree.weight(), 1_000);
        assert_eq!(Pattern::ClosedThree.weight(), 200);
        assert_eq!(Pattern::OpenTwo.weight(), 50);
    }

    #[test]
    fn test_five_ignores_flanks() {
        let w = [B; 5];
        assert_eq!(classify_window(&w, None, None, B), Some(Pattern::Five));
        assert_eq!(classify_window(&w, Some(W), Some(E), B), Some(Pattern::Five));
        assert_eq!(classify_window(&w, None, None, W), None);
    }

    #[test]
    fn test_fours() {
        let w = [B, B, E, B, B];
        assert_eq!(classify_window(&w, Some(E), Some(E), B), Some(Pattern::OpenFour));
        assert_eq!(classify_window(&w, Some(W), Some(E), B), Some(Pattern::ClosedFour));
        assert_eq!(classify_window(&w, None, Some(E), B), Some(Pattern::ClosedFour));
        assert_eq!(classify_window(&w, None, Some(W), B), Some(Pattern::ClosedFour));
    }

    #[test]
    fn test_threes() {
        let w = [E, B, B, B, E];
        assert_eq!(classify_window(&w, Some(E), Some(E), B), Some(Pattern::OpenThree));
        assert_eq!(classify_window(&w, Some(E), None, B), Some(Pattern::ClosedThree));
        assert_eq!(classify_window(&w, Some(W), Some(B), B), None);
    }

    #[test]
    fn test_twos() {
        let w = [B, E, E, B, E];
        assert_eq!(classify_window(&w, Some(E), Some(E), B), Some(Pattern::OpenTwo));
        assert_eq!(classify_window(&w, Some(E), None, B), None);
    }

    #[test]
    fn test_mixed_window_is_dead() {
        let w = [B, B, B, B, W];
        assert_eq!(classify_window(&w, Some(E), Some(E), B), None);
        assert_eq!(classify_window(&w, Some(E), Some(E), W), None);
    }

    #[test]
    fn test_singles_score_nothing() {
        let w = [E, E, B, E, E];
        assert_eq!(classify_window(&w, Some(E), Some(E), B), None);
        assert_eq!(classify_window(&[E; 5], Some(E), Some(E), B), None);
    }
}

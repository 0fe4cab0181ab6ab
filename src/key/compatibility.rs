//! Harmonic compatibility scoring between two wheel positions
//!
//! Higher is better. Scores, first match wins:
//!
//! | relationship                          | score |
//! |---------------------------------------|-------|
//! | either key unknown                    | 0     |
//! | same key                              | 10    |
//! | relative major/minor                  | 8     |
//! | one step apart, same quality          | 7     |
//! | one step apart, different quality     | 5     |
//! | two steps apart, same quality         | 3     |
//! | anything else                         | 1     |

use crate::types::WheelPosition;

/// Minimum score counted as a good transition in statistics
pub const GOOD_TRANSITION_SCORE: u8 = 5;

/// Score for mixing directly from `from` into `to`
///
/// The function is symmetric: swapping the arguments gives the same score.
pub fn compatibility(from: Option<WheelPosition>, to: Option<WheelPosition>) -> u8 {
    let (Some(a), Some(b)) = (from, to) else {
        return 0;
    };

    let same_quality = a.mode() == b.mode();
    let diff = a.number().abs_diff(b.number());
    // 11 and 10 cover the 12 -> 1 wraparound
    let adjacent = diff == 1 || diff == 11;
    let two_away = diff == 2 || diff == 10;

    if diff == 0 && same_quality {
        10
    } else if diff == 0 {
        8
    } else if adjacent && same_quality {
        7
    } else if adjacent {
        5
    } else if two_away && same_quality {
        3
    } else {
        1
    }
}

/// Whether a transition scores at least [`GOOD_TRANSITION_SCORE`]
pub fn is_good_transition(from: Option<WheelPosition>, to: Option<WheelPosition>) -> bool {
    compatibility(from, to) >= GOOD_TRANSITION_SCORE
}

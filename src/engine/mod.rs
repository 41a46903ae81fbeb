pub mod mcts;

pub use self::mcts::{SearchResult, Searcher, EXPLORATION};

use crate::board::Side;

// +1 for X, -1 for O; rollout outcomes use the same scale
#[inline(always)]
pub fn side_score(side: Side) -> i32 {
    match side {
        Side::X => 1,
        Side::O => -1,
    }
}

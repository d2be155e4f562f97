/// Rank position → bounded score.
///
/// Pure function, no state. Scores are never stored on items: any insertion or
/// removal shifts positions, so callers recompute at display time.
use crate::constants::{MAX_SCORE, MIN_SCORE};
use crate::types::{Item, RankedList};

/// Map a 1-based rank to a score in `[0, 10]`, rounded to one decimal place.
///
/// Rank 1 is always 10.0. For `total > 1` the last rank is 0.0 and the ranks in
/// between interpolate linearly. Positions outside `1..=total` are clamped.
pub fn score(position: usize, total: usize) -> f64 {
    if total <= 1 {
        return MAX_SCORE;
    }
    let position = position.clamp(1, total);
    let fraction = (position - 1) as f64 / (total - 1) as f64;
    let raw = MAX_SCORE - fraction * (MAX_SCORE - MIN_SCORE);
    round_to_tenth(raw).clamp(MIN_SCORE, MAX_SCORE)
}

/// Exact halves go to the even tenth: 6.25 becomes 6.2, 6.35 becomes 6.4.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// A ranked item paired with its display rank and score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a> {
    pub rank: usize,
    pub score: f64,
    pub item: &'a Item,
}

/// Score every entry of a ranked list, best first.
pub fn scored(ranked: &RankedList) -> Vec<ScoredItem<'_>> {
    let total = ranked.len();
    ranked
        .iter()
        .enumerate()
        .map(|(i, item)| ScoredItem {
            rank: i + 1,
            score: score(i + 1, total),
            item,
        })
        .collect()
}

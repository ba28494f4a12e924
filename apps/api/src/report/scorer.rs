use crate::report::models::{Priority, Suggestion};

const BASE_SCORE: f64 = 100.0;
const HIGH_PENALTY: f64 = 15.0;
const MEDIUM_PENALTY: f64 = 5.0;

/// Aggregate 0 – 100 score from suggestion priorities.
/// 100 − 15 per high − 5 per medium; low-priority suggestions are free.
pub fn score(suggestions: &[Suggestion]) -> u32 {
    let penalty: f64 = suggestions
        .iter()
        .map(|s| match s.priority {
            Priority::High => HIGH_PENALTY,
            Priority::Medium => MEDIUM_PENALTY,
            Priority::Low => 0.0,
        })
        .sum();
    clamp_score(BASE_SCORE - penalty)
}

/// Clamps to [0, 100] and rounds to the nearest integer. Non-finite input scores 0.
pub fn clamp_score(raw: f64) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u32
}

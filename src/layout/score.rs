use super::finger::Finger;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Frequency-weighted per-key cost (row reach + finger strength).
    pub ergonomic: f64,
    /// Unweighted same-finger / same-hand bigram penalty sum.
    pub bigram: f64,
    pub total: f64,
}

/// Penalty for typing two keys back to back. Keys outside every finger zone
/// carry no bigram penalty.
#[inline]
pub fn bigram_penalty(
    first: Option<Finger>,
    second: Option<Finger>,
    same_finger_penalty: f64,
    same_hand_penalty: f64,
) -> f64 {
    match (first, second) {
        (Some(f1), Some(f2)) if f1 == f2 => same_finger_penalty,
        (Some(f1), Some(f2)) if f1.hand() == f2.hand() => same_hand_penalty,
        _ => 0.0,
    }
}

/// Percentage by which `score` improves on `baseline`. `None` when the
/// baseline is zero or either value is not finite.
pub fn improvement_pct(baseline: f64, score: f64) -> Option<f64> {
    if baseline == 0.0 || !baseline.is_finite() || !score.is_finite() {
        return None;
    }
    Some((baseline - score) / baseline * 100.0)
}

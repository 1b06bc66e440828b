//! Scores an implied membership against the true selection.
use serde::Serialize;

use std::collections::HashSet;


/// A trait that compares the ids implied by a rule set
/// with the ids of the selected rows.
pub trait Membership {
    /// The statistics record attached to a prediction.
    type Stats: Serialize;

    /// Compare `predicted` against `actual`.
    fn stats(&self, predicted: &[String], actual: &[String]) -> Self::Stats;
}


/// Set-overlap statistics between predicted and actual member ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOverlap;


/// The record returned by [`SetOverlap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapStats {
    /// Ids both predicted and selected.
    pub matches: usize,
    /// Ids predicted but not selected.
    pub extra: usize,
    /// Ids selected but not predicted.
    pub missing: usize,
    /// `matches / |predicted|`.
    pub precision: f64,
    /// `matches / |actual|`.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// `matches / |predicted ∪ actual|`.
    pub jaccard: f64,
}


impl OverlapStats {
    /// Returns `true` if the prediction equals the selection.
    pub fn is_exact(&self) -> bool {
        self.extra == 0 && self.missing == 0
    }
}


impl Membership for SetOverlap {
    type Stats = OverlapStats;

    fn stats(&self, predicted: &[String], actual: &[String]) -> OverlapStats {
        let predicted = predicted.iter().collect::<HashSet<_>>();
        let actual = actual.iter().collect::<HashSet<_>>();

        let matches = predicted.intersection(&actual).count();
        let extra = predicted.len() - matches;
        let missing = actual.len() - matches;
        let union = matches + extra + missing;

        // An empty denominator scores perfectly only when
        // both sides are empty.
        let both_empty = union == 0;
        let ratio = |num: usize, den: usize| {
            if den == 0 {
                if both_empty { 1f64 } else { 0f64 }
            } else {
                num as f64 / den as f64
            }
        };

        let precision = ratio(matches, predicted.len());
        let recall = ratio(matches, actual.len());
        let jaccard = ratio(matches, union);
        let f1 = if precision + recall > 0f64 {
            2f64 * precision * recall / (precision + recall)
        } else {
            0f64
        };

        OverlapStats {
            matches, extra, missing, precision, recall, f1, jaccard,
        }
    }
}

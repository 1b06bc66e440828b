use rayon::prelude::*;

use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;

use crate::{
    tree::LabelWeight,
    Feature,
    Sample,
};

/// Score for a splitting.
/// This is just a wrapper for `f64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug)]
struct Score(f64);

impl From<f64> for Score {
    #[inline(always)]
    fn from(score: f64) -> Self {
        Self(score)
    }
}

impl PartialEq for Score {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Splitting criteria for growing decision tree.
/// Both criteria minimize the weighted impurity of the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitBy {
    /// Gini index.
    #[default]
    Gini,
    /// Binary entropy function.
    Entropy,
}

impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gini => "Gini index",
            Self::Entropy => "Entropy",
        };

        write!(f, "{name}")
    }
}

impl SplitBy {
    /// Returns the best pair of feature name and threshold
    /// over the examples `idx`.
    /// Returns `None` if every feature is constant on `idx`.
    ///
    /// Among equally good splits, the feature that comes first
    /// in the sample and the smallest threshold win.
    pub(super) fn best_split<'a>(
        &self,
        sample: &'a Sample,
        idx:    &[usize],
    ) -> Option<(&'a str, f64)>
    {
        let target = sample.target();
        let impurity = self.impurity();
        sample.features()
            .par_iter()
            .filter_map(|feature| {
                let pack = pack(idx, feature, target);
                split_by_impurity(pack, impurity)
                    .map(|(threshold, score)| (score, feature.name(), threshold))
            })
            .min_by_key(|(score, _, _)| *score)
            .map(|(_, name, threshold)| (name, threshold))
    }

    fn impurity(&self) -> fn(&LabelWeight) -> f64 {
        match self {
            Self::Gini => gini_impurity,
            Self::Entropy => entropic_impurity,
        }
    }
}

/// Group the examples `idx` by the distinct values of `feature`
/// in ascending order.
fn pack(idx: &[usize], feature: &Feature, target: &[bool])
    -> Vec<(f64, LabelWeight)>
{
    let mut items = idx.iter()
        .map(|&i| (feature[i], target[i]))
        .collect::<Vec<_>>();
    items.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut packed: Vec<(f64, LabelWeight)> = Vec::new();
    for (x, y) in items {
        match packed.last_mut() {
            Some((value, weight)) if *value == x => {
                weight.add(y, 1f64);
            },
            _ => {
                let mut weight = LabelWeight::default();
                weight.add(y, 1f64);
                packed.push((x, weight));
            },
        }
    }
    packed
}

/// Scan the thresholds between consecutive distinct values
/// and return the one that minimizes the weighted impurity.
fn split_by_impurity(
    pack: Vec<(f64, LabelWeight)>,
    impurity: fn(&LabelWeight) -> f64,
) -> Option<(f64, Score)>
{
    if pack.len() < 2 { return None; }

    let total = pack.iter()
        .fold(LabelWeight::default(), |acc, (_, w)| acc + *w);
    let total_weight = total.total();

    let mut left = LabelWeight::default();
    let mut best: Option<(f64, Score)> = None;

    for pair in pack.windows(2) {
        let (value, weight) = pair[0];
        let next = pair[1].0;

        left = left + weight;
        let right = total - left;

        let score = (
            left.total() * impurity(&left)
            + right.total() * impurity(&right)
        ) / total_weight;
        let score = Score::from(score);

        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((midpoint(value, next), score));
        }
    }
    best
}

/// The threshold between two consecutive distinct values.
#[inline]
fn midpoint(lo: f64, hi: f64) -> f64 {
    let threshold = lo / 2f64 + hi / 2f64;
    if threshold == hi || threshold.is_infinite() { lo } else { threshold }
}

/// Returns the entropic-impurity of the given weight.
#[inline(always)]
fn entropic_impurity(weight: &LabelWeight) -> f64 {
    let total = weight.total();
    if total <= 0f64 { return 0f64; }

    [weight.positive, weight.negative].into_iter()
        .map(|p| {
            let r = p / total;
            if r <= 0f64 { 0f64 } else { -r * r.ln() }
        })
        .sum::<f64>()
}

/// Returns the gini-impurity of the given weight.
#[inline(always)]
fn gini_impurity(weight: &LabelWeight) -> f64 {
    let total = weight.total();
    if total <= 0f64 { return 0f64; }

    let correct = (weight.positive / total).powi(2)
        + (weight.negative / total).powi(2);

    (1f64 - correct).max(0f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use polars::prelude::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn test_feature() -> Feature {
        let vals = (1..=10).map(|i| i as f64 / 10f64)
            .collect::<Vec<_>>();
        Feature::new("feat", vals)
    }

    fn test_sample() -> Sample {
        let data = DataFrame::new(vec![
            Series::new("unused", &[0.0, 0.0, 0.0, 0.3, 0.3, 0.3, 0.3, 0.3, 0.9, 0.9]),
            Series::new("feat", &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]),
        ]).unwrap();
        let selection = [true, true, true, true, true, false, false, false, false, false];
        Sample::from_dataframe(&data, &["unused", "feat"], &selection)
            .unwrap()
    }

    fn data_01() -> (Feature, Vec<bool>, Vec<usize>) {
        let feat = test_feature();
        let mut y = vec![true; 5];
        y.extend(std::iter::repeat(false).take(5));
        let ix = (0..10).collect::<Vec<_>>();
        (feat, y, ix)
    }

    fn data_02() -> (Feature, Vec<bool>, Vec<usize>) {
        let (feat, mut y, ix) = data_01();
        y[4] = false;
        y[5] = true;
        (feat, y, ix)
    }

    #[test]
    fn test_pack_groups_equal_values() {
        let feat = Feature::new("feat", vec![2.0, 1.0, 2.0, 3.0]);
        let y = [true, false, false, true];
        let pack = pack(&[0, 1, 2, 3], &feat, &y);

        let values = pack.iter().map(|(v, _)| *v).collect::<Vec<_>>();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(pack[1].1, LabelWeight { positive: 1f64, negative: 1f64 });
    }

    #[test]
    fn test_split_by_gini_01() {
        let (x, y, ix) = data_01();

        let pack = pack(&ix[..], &x, &y[..]);
        let (threshold, score) = split_by_impurity(pack, gini_impurity)
            .unwrap();

        assert_abs_diff_eq!(threshold, 0.55, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(score.0, 0f64, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_split_by_entropy_01() {
        let (x, y, ix) = data_01();

        let pack = pack(&ix[..], &x, &y[..]);
        let (threshold, score) = split_by_impurity(pack, entropic_impurity)
            .unwrap();

        assert_abs_diff_eq!(threshold, 0.55, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(score.0, 0f64, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_split_by_gini_02() {
        // Labels: + + + + - + - - - -
        // The best split isolates the first four examples.
        let (x, y, ix) = data_02();

        let pack = pack(&ix[..], &x, &y[..]);
        let (threshold, score) = split_by_impurity(pack, gini_impurity)
            .unwrap();

        assert_abs_diff_eq!(threshold, 0.45, epsilon = TEST_TOLERANCE);
        let expected = {
            let right = 1f64 - (1f64 / 6f64).powi(2) - (5f64 / 6f64).powi(2);
            6f64 * right / 10f64
        };
        assert_abs_diff_eq!(score.0, expected, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_split_of_constant_feature() {
        let feat = Feature::new("feat", vec![1.0; 4]);
        let y = [true, false, true, false];
        let pack = pack(&[0, 1, 2, 3], &feat, &y);

        assert!(split_by_impurity(pack, gini_impurity).is_none());
    }

    #[test]
    fn test_split_without_improvement_is_still_found() {
        // XOR-like labels: no threshold lowers the impurity,
        // yet a split must be reported.
        let feat = Feature::new("feat", vec![0.0, 1.0, 2.0, 3.0]);
        let y = [true, false, false, true];
        let pack = pack(&[0, 1, 2, 3], &feat, &y);

        let (threshold, _) = split_by_impurity(pack, gini_impurity)
            .unwrap();
        assert_abs_diff_eq!(threshold, 0.5, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(4f64, 5f64), 4.5);
        assert_eq!(midpoint(1f64, 1f64 + f64::EPSILON), 1f64);
    }

    #[test]
    fn test_best_split_gini() {
        let sample = test_sample();
        let m = sample.shape().0;
        let ix = (0..m).collect::<Vec<_>>();
        let (name, thr) = SplitBy::Gini.best_split(&sample, &ix[..])
            .unwrap();

        assert_eq!("feat", name);
        assert_abs_diff_eq!(thr, 0.55, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_best_split_entropy() {
        let sample = test_sample();
        let m = sample.shape().0;
        let ix = (0..m).collect::<Vec<_>>();
        let (name, thr) = SplitBy::Entropy.best_split(&sample, &ix[..])
            .unwrap();

        assert_eq!("feat", name);
        assert_abs_diff_eq!(thr, 0.55, epsilon = TEST_TOLERANCE);
    }

    #[test]
    fn test_best_split_skips_constant_feature() {
        let sample = test_sample();
        // Rows 0..3 share `unused == 0.0`, but `feat` still varies.
        let (name, _) = SplitBy::Gini.best_split(&sample, &[0, 1, 2])
            .unwrap();
        assert_eq!("feat", name);
    }
}

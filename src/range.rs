//! The range inference driver.
//!
//! The driver fits a tree on the selection, reads the rules off
//! the paths of the selected rows, and rebuilds the membership
//! the rules imply. An unconstrained call then refits the tree
//! with every smaller depth budget down to `1`,
//! so the result runs from the most faithful explanation
//! to the simplest one.
//! [`RangeInferenceBuilder::max_simplifications`] stops the sweep early.

/// Defines the configuration read from files.
pub mod config;
/// Defines the builder of `RangeInference`.
pub mod builder;


use polars::prelude::*;

use crate::{
    constants::MASK_NAME,
    error::{RangeError, Result},
    learner::{DecisionPath, TreeLearner},
    membership::{Membership, OverlapStats},
    prediction::{Intent, Prediction, RangeInfo},
    rules::{ThresholdEvaluation, build_mask, extract_rules},
    Sample,
};

pub use config::RangeConfig;
pub use builder::RangeInferenceBuilder;


/// Infers range explanations of selections over one dataset.
/// Construct it through [`RangeInferenceBuilder`].
pub struct RangeInference<'a, L, M> {
    data: &'a DataFrame,
    learner: L,
    membership: M,
    evaluation: ThresholdEvaluation,
    max_simplifications: Option<usize>,
    ids: Vec<String>,
}


impl<'a, L, M> RangeInference<'a, L, M>
    where L: TreeLearner,
          M: Membership,
{
    /// Returns the row ids as strings, in dataset order.
    pub fn ids(&self) -> &[String] {
        &self.ids[..]
    }


    /// Returns the tree learner.
    pub fn learner(&self) -> &L {
        &self.learner
    }


    /// Returns which thresholds the rules are evaluated with.
    pub fn threshold_evaluation(&self) -> ThresholdEvaluation {
        self.evaluation
    }


    /// Returns how many simplified candidates may follow
    /// the unconstrained one. `None` means no limit.
    pub fn max_simplifications(&self) -> Option<usize> {
        self.max_simplifications
    }


    /// Explain `selection` with axis-aligned ranges over `dimensions`.
    ///
    /// With `max_depth == None` the first candidate comes from
    /// an unconstrained tree and is followed by one candidate
    /// for every depth budget from its depth minus one down to `1`,
    /// or for the first `max_simplifications` of them.
    /// With `Some(depth)` exactly one candidate is returned.
    pub fn infer<S>(
        &self,
        dimensions: &[S],
        selection: &[bool],
        max_depth: Option<usize>,
    ) -> Result<Vec<Prediction<M::Stats>>>
        where S: AsRef<str> + Sync,
    {
        if max_depth == Some(0) {
            return Err(RangeError::InputShape(
                "the depth budget must be positive".to_string()
            ));
        }

        let sample = Sample::from_dataframe(self.data, dimensions, selection)?;
        let dimensions = dimensions.iter()
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>();
        let selected_ids = sample.selected_rows()
            .map(|row| self.ids[row].clone())
            .collect::<Vec<_>>();

        if sample.is_single_class() {
            log::warn!(
                "the selection holds {} of {} rows, \
                 the explanation degenerates to a single leaf",
                selected_ids.len(),
                sample.shape().0,
            );
        }

        let first = self.candidate(&sample, &dimensions, &selected_ids, max_depth)?;
        let observed_depth = first.depth();

        let mut predictions = vec![first];
        if max_depth.is_none() {
            let limit = self.max_simplifications.unwrap_or(usize::MAX);
            for depth in (1..observed_depth).rev().take(limit) {
                let prediction = self.candidate(
                    &sample, &dimensions, &selected_ids, Some(depth)
                )?;
                predictions.push(prediction);
            }
        }

        log::info!(
            "inferred {} range candidates over {:?} (depth {} to {})",
            predictions.len(),
            dimensions,
            observed_depth,
            predictions.last().map_or(observed_depth, Prediction::depth),
        );
        Ok(predictions)
    }


    /// Fit one tree and turn it into a prediction.
    fn candidate(
        &self,
        sample: &Sample,
        dimensions: &[String],
        selected_ids: &[String],
        max_depth: Option<usize>,
    ) -> Result<Prediction<M::Stats>>
    {
        let tree = self.learner.fit(sample, max_depth)?;
        let depth = tree.depth();

        let rules = extract_rules(&tree, sample, sample.target())?;

        let mask = if rules.is_empty() {
            BooleanChunked::full(MASK_NAME, false, self.data.height())
        } else {
            build_mask(self.data, &rules, self.evaluation)?
        };
        let member_ids = mask.into_iter()
            .zip(&self.ids)
            .filter_map(|(member, id)| (member == Some(true)).then(|| id.clone()))
            .collect::<Vec<_>>();

        log::debug!(
            "{learner} (budget {max_depth:?}): depth {depth}, {n_rules} rules, \
             {n_members} members",
            learner = self.learner.name(),
            n_rules = rules.len(),
            n_members = member_ids.len(),
        );

        let membership = self.membership.stats(&member_ids, selected_ids);
        let intent = if max_depth.is_none() {
            Intent::Range
        } else {
            Intent::SimplifiedRange
        };
        let info = RangeInfo { depth, rules };

        Ok(Prediction::new(
            intent, member_ids, dimensions.to_vec(), info, membership,
        ))
    }
}


/// Explain `selection` over `dimensions` of `data`
/// with the default configuration.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use range_intent::prelude::*;
///
/// let data = df!(
///     "id" => (0..10_i64).collect::<Vec<_>>(),
///     "x"  => (0..10).map(f64::from).collect::<Vec<_>>(),
/// ).unwrap();
/// let selection = (0..10).map(|i| i >= 5).collect::<Vec<_>>();
///
/// let predictions = infer_range(&data, &["x"], &selection, None).unwrap();
/// assert_eq!(predictions.len(), 1);
/// assert_eq!(predictions[0].rules().to_strings(), vec![vec!["x >= 4.5"]]);
/// ```
pub fn infer_range<S>(
    data: &DataFrame,
    dimensions: &[S],
    selection: &[bool],
    max_depth: Option<usize>,
) -> Result<Vec<Prediction<OverlapStats>>>
    where S: AsRef<str> + Sync,
{
    RangeInferenceBuilder::new(data)
        .build()?
        .infer(dimensions, selection, max_depth)
}

use polars::prelude::*;

use crate::{
    constants::DEFAULT_ID_COLUMN,
    decision_tree::{DecisionTree, DecisionTreeBuilder, SplitBy},
    error::{RangeError, Result},
    learner::TreeLearner,
    membership::{Membership, SetOverlap},
    rules::ThresholdEvaluation,
};
use super::{
    config::RangeConfig,
    RangeInference,
};


/// A struct that builds [`RangeInference`].
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use range_intent::prelude::*;
///
/// let data = df!(
///     "id" => &[1_i64, 2, 3, 4],
///     "x"  => &[0.0, 1.0, 2.0, 3.0],
/// ).unwrap();
///
/// let inference = RangeInferenceBuilder::new(&data)
///     .split_by(SplitBy::Entropy)
///     .threshold_evaluation(ThresholdEvaluation::Rounded)
///     .build()
///     .unwrap();
///
/// let predictions = inference.infer(&["x"], &[false, false, true, true], None)
///     .unwrap();
/// assert_eq!(predictions[0].member_ids, vec!["3", "4"]);
/// ```
pub struct RangeInferenceBuilder<'a, L, M> {
    data: &'a DataFrame,
    learner: L,
    membership: M,
    id_column: String,
    evaluation: ThresholdEvaluation,
    max_simplifications: Option<usize>,
}


impl<'a> RangeInferenceBuilder<'a, DecisionTree, SetOverlap> {
    /// Construct a new instance of [`RangeInferenceBuilder`].
    /// By default, the parameters are set as follows;
    /// ```text
    /// learner: DecisionTree (Gini index, no depth cap),
    /// membership: SetOverlap,
    /// id_column: "id",
    /// threshold_evaluation: ThresholdEvaluation::Exact,
    /// max_simplifications: unbounded,
    /// ```
    pub fn new(data: &'a DataFrame) -> Self {
        Self {
            data,
            learner: DecisionTreeBuilder::new().build(),
            membership: SetOverlap,
            id_column: DEFAULT_ID_COLUMN.to_string(),
            evaluation: ThresholdEvaluation::default(),
            max_simplifications: None,
        }
    }


    /// Set the splitting criterion of the decision tree.
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        let mut builder = DecisionTreeBuilder::new().split_by(split_by);
        if let Some(depth) = self.learner.max_depth() {
            builder = builder.max_depth(depth);
        }
        self.learner = builder.build();
        self
    }


    /// Apply every knob of `config`.
    pub fn config(self, config: &RangeConfig) -> Self {
        let mut builder = self.split_by(config.split_by)
            .id_column(&config.id_column)
            .threshold_evaluation(config.threshold_evaluation);
        builder.max_simplifications = config.max_simplifications;
        builder
    }
}


impl<'a, L, M> RangeInferenceBuilder<'a, L, M>
    where L: TreeLearner,
          M: Membership,
{
    /// Set the column holding the row ids.
    /// Default value is `"id"`.
    pub fn id_column<S: AsRef<str>>(mut self, name: S) -> Self {
        self.id_column = name.as_ref().to_string();
        self
    }


    /// Set which thresholds the rules are evaluated with.
    /// Default value is [`ThresholdEvaluation::Exact`].
    pub fn threshold_evaluation(mut self, evaluation: ThresholdEvaluation)
        -> Self
    {
        self.evaluation = evaluation;
        self
    }


    /// Keep at most `limit` simplified candidates
    /// after the unconstrained one.
    /// By default, every depth down to `1` is refitted,
    /// which costs one fit per level of the unconstrained tree.
    pub fn max_simplifications(mut self, limit: usize) -> Self {
        self.max_simplifications = Some(limit);
        self
    }


    /// Replace the tree learner.
    pub fn learner<T>(self, learner: T) -> RangeInferenceBuilder<'a, T, M>
        where T: TreeLearner
    {
        RangeInferenceBuilder {
            data: self.data,
            learner,
            membership: self.membership,
            id_column: self.id_column,
            evaluation: self.evaluation,
            max_simplifications: self.max_simplifications,
        }
    }


    /// Replace the membership statistics.
    pub fn membership<N>(self, membership: N) -> RangeInferenceBuilder<'a, L, N>
        where N: Membership
    {
        RangeInferenceBuilder {
            data: self.data,
            learner: self.learner,
            membership,
            id_column: self.id_column,
            evaluation: self.evaluation,
            max_simplifications: self.max_simplifications,
        }
    }


    /// Build a [`RangeInference`].
    /// Fails if the id column is missing or holds a null.
    pub fn build(self) -> Result<RangeInference<'a, L, M>> {
        let ids = read_ids(self.data, &self.id_column)?;

        Ok(RangeInference {
            data: self.data,
            learner: self.learner,
            membership: self.membership,
            evaluation: self.evaluation,
            max_simplifications: self.max_simplifications,
            ids,
        })
    }
}


/// Read the id column as strings.
fn read_ids(data: &DataFrame, id_column: &str) -> Result<Vec<String>> {
    let column = data.column(id_column)
        .map_err(|_| RangeError::UnknownDimension(id_column.to_string()))?;
    let ids = column.cast(&DataType::Utf8)?;

    ids.utf8()?
        .into_iter()
        .enumerate()
        .map(|(row, id)| {
            id.map(str::to_string)
                .ok_or_else(|| RangeError::InputShape(format!(
                    "the id column `{id_column}` has no value at row {row}"
                )))
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ids_casts_to_strings() {
        let data = df!("id" => &[7_i64, 8, 9]).unwrap();
        let ids = read_ids(&data, "id").unwrap();
        assert_eq!(ids, vec!["7", "8", "9"]);
    }

    #[test]
    fn test_build_rejects_missing_id_column() {
        let data = df!("x" => &[1.0, 2.0]).unwrap();
        let err = RangeInferenceBuilder::new(&data).build().err().unwrap();
        assert!(
            matches!(err, RangeError::UnknownDimension(ref name) if name == "id"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_build_rejects_null_ids() {
        let data = df!("id" => &[Some("a"), None]).unwrap();
        let err = RangeInferenceBuilder::new(&data).build().err().unwrap();
        assert!(matches!(err, RangeError::InputShape(_)), "got {err:?}");
    }

    #[test]
    fn test_config_is_applied() {
        let data = df!("row" => &[1_i64, 2]).unwrap();
        let config = RangeConfig {
            id_column: "row".to_string(),
            split_by: SplitBy::Entropy,
            threshold_evaluation: ThresholdEvaluation::Rounded,
            max_simplifications: Some(1),
        };
        let inference = RangeInferenceBuilder::new(&data)
            .config(&config)
            .build()
            .unwrap();

        assert_eq!(inference.ids(), &["1".to_string(), "2".to_string()]);
        assert_eq!(inference.learner().split_by(), SplitBy::Entropy);
        assert_eq!(inference.threshold_evaluation(), ThresholdEvaluation::Rounded);
        assert_eq!(inference.max_simplifications(), Some(1));
    }

    #[test]
    fn test_split_by_keeps_depth_cap() {
        let data = df!("id" => &[1_i64]).unwrap();
        let learner = DecisionTreeBuilder::new().max_depth(2).build();
        let inference = RangeInferenceBuilder::new(&data)
            .learner(learner)
            .split_by(SplitBy::Entropy)
            .build()
            .unwrap();
        assert_eq!(inference.learner().max_depth(), Some(2));
        assert_eq!(inference.learner().split_by(), SplitBy::Entropy);
    }
}

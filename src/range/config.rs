use serde::{Serialize, Deserialize};

use crate::{
    constants::DEFAULT_ID_COLUMN,
    decision_tree::SplitBy,
    error::Result,
    rules::ThresholdEvaluation,
};


/// Knobs of [`RangeInference`](super::RangeInference)
/// that can be read from a configuration file.
///
/// Missing keys take their default value:
/// ```
/// use range_intent::prelude::*;
///
/// let config = RangeConfig::from_json(r#"{ "split_by": "Entropy" }"#)
///     .unwrap();
/// assert_eq!(config.id_column, "id");
/// assert_eq!(config.split_by, SplitBy::Entropy);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// The column holding the row ids.
    pub id_column: String,
    /// Splitting criterion of the decision tree.
    pub split_by: SplitBy,
    /// Whether the rules are evaluated with the exact or the rounded
    /// thresholds when the member ids are computed.
    pub threshold_evaluation: ThresholdEvaluation,
    /// How many simplified candidates follow the unconstrained one.
    /// `None` refits for every depth down to `1`,
    /// `Some(1)` keeps only the candidate one level shallower.
    pub max_simplifications: Option<usize>,
}


impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            split_by: SplitBy::default(),
            threshold_evaluation: ThresholdEvaluation::default(),
            max_simplifications: None,
        }
    }
}


impl RangeConfig {
    /// Read a configuration from a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;

    #[test]
    fn test_default() {
        let config = RangeConfig::default();
        assert_eq!(config.id_column, "id");
        assert_eq!(config.split_by, SplitBy::Gini);
        assert_eq!(config.threshold_evaluation, ThresholdEvaluation::Exact);
        assert_eq!(config.max_simplifications, None);
    }

    #[test]
    fn test_from_json() {
        let text = r#"{
            "id_column": "row_id",
            "threshold_evaluation": "Rounded",
            "max_simplifications": 1
        }"#;
        let config = RangeConfig::from_json(text).unwrap();
        assert_eq!(config.id_column, "row_id");
        assert_eq!(config.split_by, SplitBy::Gini);
        assert_eq!(config.threshold_evaluation, ThresholdEvaluation::Rounded);
        assert_eq!(config.max_simplifications, Some(1));
    }

    #[test]
    fn test_from_json_rejects_unknown_variant() {
        let err = RangeConfig::from_json(r#"{ "split_by": "Variance" }"#)
            .unwrap_err();
        assert!(matches!(err, RangeError::Serialize(_)), "got {err:?}");
    }
}

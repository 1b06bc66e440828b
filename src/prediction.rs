//! The ranked candidate explanations returned by the inference.
use serde::Serialize;

use std::fmt;

use crate::{
    constants::ALGORITHM,
    error::Result,
    rules::RuleSet,
};


/// Whether a candidate came from the unconstrained fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intent {
    /// The most faithful explanation.
    Range,
    /// An explanation fitted under a depth budget.
    SimplifiedRange,
}


impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Range => "Range",
            Self::SimplifiedRange => "SimplifiedRange",
        };
        write!(f, "{name}")
    }
}


/// The tree summary attached to a [`Prediction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeInfo {
    /// Depth of the fitted tree.
    pub depth: usize,
    /// The rules read off the tree.
    pub rules: RuleSet,
}


/// One candidate explanation of a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction<S> {
    /// Simplicity of the explanation, `1 / (depth² + 1)`.
    pub rank: f64,
    /// See [`Intent`].
    pub intent: Intent,
    /// Ids of the rows the rules admit, in dataset order.
    pub member_ids: Vec<String>,
    /// The dimensions the tree was fitted on.
    pub dimensions: Vec<String>,
    /// The tree depth and its rules.
    pub info: RangeInfo,
    /// Always `"DecisionTree"`.
    pub algorithm: String,
    /// Statistics of `member_ids` against the selection.
    pub membership: S,
    /// Always `"Range-DecisionTree"`.
    pub description: String,
}


impl<S> Prediction<S> {
    pub(crate) fn new(
        intent: Intent,
        member_ids: Vec<String>,
        dimensions: Vec<String>,
        info: RangeInfo,
        membership: S,
    ) -> Self
    {
        Self {
            rank: rank(info.depth),
            intent,
            member_ids,
            dimensions,
            info,
            algorithm: ALGORITHM.to_string(),
            membership,
            description: format!("Range-{ALGORITHM}"),
        }
    }


    /// Returns the depth of the tree behind this candidate.
    #[inline]
    pub fn depth(&self) -> usize {
        self.info.depth
    }


    /// Returns the rules of this candidate.
    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.info.rules
    }
}


impl<S: Serialize> Prediction<S> {
    /// Render this prediction as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }
}


/// Returns `1 / (depth² + 1)`.
#[inline]
pub fn rank(depth: usize) -> f64 {
    let depth = depth as f64;
    1f64 / (depth.powi(2) + 1f64)
}

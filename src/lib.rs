#![warn(missing_docs)]

//!
//! A crate that explains a selected subset of rows of a dataset
//! by axis-aligned ranges over some of its columns.
//!
//! The explanation is read off a binary classification tree
//! fitted on the selection.
//! Each root-to-leaf path of a selected row becomes a rule,
//! i.e., a conjunction of threshold expressions such as
//! `age >= 30.0` or `height <= 1.8`,
//! and a row is a member of the explanation
//! if it satisfies at least one rule.
//!
//! An unconstrained call returns a list of candidates.
//! The first one comes from a tree grown until its leaves are pure,
//! and the following ones are refitted under decreasing depth budgets.
//! Each candidate carries a rank `1 / (depth² + 1)`
//! that favours shallow trees, and set-overlap statistics
//! of its members against the selection.
//!
//! ```
//! use polars::prelude::*;
//! use range_intent::prelude::*;
//!
//! let data = df!(
//!     "id" => (0..10_i64).collect::<Vec<_>>(),
//!     "x"  => (0..10).map(f64::from).collect::<Vec<_>>(),
//! ).unwrap();
//! let selection = (0..10).map(|i| (3..=6).contains(&i)).collect::<Vec<_>>();
//!
//! let predictions = infer_range(&data, &["x"], &selection, None).unwrap();
//!
//! assert_eq!(predictions.len(), 2);
//! assert_eq!(predictions[0].intent, Intent::Range);
//! assert_eq!(
//!     predictions[0].rules().to_strings(),
//!     vec![vec!["x >= 2.5", "x <= 6.5"]],
//! );
//! assert_eq!(predictions[1].intent, Intent::SimplifiedRange);
//! assert_eq!(predictions[1].depth(), 1);
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod tree;
pub mod learner;
pub mod decision_tree;
pub mod rules;
pub mod membership;
pub mod prediction;
pub mod range;

pub mod prelude;


pub use error::{RangeError, Result};

pub use sample::{Feature, Sample};

pub use learner::{TreeLearner, DecisionPath, PathStep};

pub use decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
};

pub use rules::{
    Comparison,
    Expression,
    Rule,
    RuleSet,
    ThresholdEvaluation,
    evaluate,
    build_mask,
    build_mask_from_text,
    extract_rules,
};

pub use membership::{Membership, SetOverlap, OverlapStats};

pub use prediction::{Intent, Prediction, RangeInfo};

pub use range::{
    RangeConfig,
    RangeInference,
    RangeInferenceBuilder,
    infer_range,
};

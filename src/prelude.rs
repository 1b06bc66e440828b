//! Exports the standard inference entry points and traits.
//!
pub use crate::range::{
    // Driver
    infer_range,
    RangeInference,
    RangeInferenceBuilder,
    RangeConfig,
};


pub use crate::learner::{
    // Tree learner traits
    TreeLearner,
    DecisionPath,
    PathStep,
};


pub use crate::decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
};


pub use crate::rules::{
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


pub use crate::membership::{
    Membership,
    SetOverlap,
    OverlapStats,
};


pub use crate::prediction::{
    Intent,
    Prediction,
};


pub use crate::{
    RangeError,
    Sample,
};

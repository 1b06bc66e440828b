//! Threshold expressions, rules, and the masks they imply.
//!
//! A [`Rule`] is the conjunction of the expressions along one
//! root-to-leaf path of a tree, and a [`RuleSet`] is the disjunction
//! of the rules of every selected row.

/// Defines a single threshold expression and its parser.
pub mod expression;
/// Defines rules and rule sets.
pub mod rule_set;
/// Defines the mask builders.
pub mod mask;
/// Defines the decoder from decision paths to rules.
pub mod extract;


pub use expression::{Comparison, Expression, evaluate};
pub use rule_set::{Rule, RuleSet};
pub use mask::{ThresholdEvaluation, build_mask, build_mask_from_text};
pub use extract::extract_rules;

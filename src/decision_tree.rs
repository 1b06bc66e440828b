//! A CART-style decision tree that classifies
//! the selected rows of a sample.

/// Defines the builder of the decision tree learner.
pub mod builder;
/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod classifier;
/// Defines the splitting criteria.
pub mod split_by;

/// Defines the inner representation of `DecisionTreeClassifier`.
mod node;


pub use builder::DecisionTreeBuilder;
pub use classifier::DecisionTreeClassifier;
pub use dtree::DecisionTree;
pub use node::{Node, BranchNode, LeafNode};
pub use split_by::SplitBy;

use crate::tree::Depth;
use super::{
    dtree::DecisionTree,
    split_by::SplitBy,
};


/// A struct that builds [`DecisionTree`].
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```
/// use range_intent::prelude::*;
///
/// let learner = DecisionTreeBuilder::new()
///     .max_depth(3)
///     .split_by(SplitBy::Entropy)
///     .build();
/// assert_eq!(learner.max_depth(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionTreeBuilder {
    max_depth: Option<Depth>,
    split_by: SplitBy,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_depth: None (grow until the leaves are pure),
    /// split_by: SplitBy::Gini,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Specify the maximal depth of the tree.
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "Tree must have positive depth");
        self.max_depth = Some(Depth::from(depth));

        self
    }


    /// Set the node splitting rule.
    /// Default value is `SplitBy::Gini`.
    #[inline]
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_components(self.split_by, self.max_depth)
    }
}

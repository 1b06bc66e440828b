//! Provides the traits at the seam between the range inference
//! and the classification tree that explains a selection.
//!
//! Any CART-style binary classifier can drive the inference
//! as long as it can report its depth and the decision path
//! of every row.

use crate::{
    error::Result,
    tree::LeftRight,
    Sample,
};


/// One node visited by a row on its way from the root to a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep<'a> {
    /// An internal node and the side the row went to.
    Branch {
        /// Pre-order id of the node (root is `0`).
        node: usize,
        /// The feature the node splits on.
        feature: &'a str,
        /// The unrounded threshold of the split.
        threshold: f64,
        /// `Left` if the value is at most `threshold`.
        direction: LeftRight,
    },
    /// The terminal node.
    Leaf {
        /// Pre-order id of the node.
        node: usize,
        /// The class predicted by the leaf.
        positive: bool,
    },
}


/// A trait that fits a binary classification tree
/// on a [`Sample`] whose target is the selection.
pub trait TreeLearner {
    /// The fitted tree.
    type Tree: DecisionPath;

    /// Returns the name of the learner.
    fn name(&self) -> &str;

    /// Fit a tree of depth at most `max_depth`.
    /// `None` grows the tree until every leaf is pure
    /// or cannot be split anymore.
    fn fit(&self, sample: &Sample, max_depth: Option<usize>)
        -> Result<Self::Tree>;
}


/// A fitted binary classification tree.
pub trait DecisionPath {
    /// Returns the length of the longest root-to-leaf path.
    /// A tree that consists of a single leaf has depth `0`.
    fn depth(&self) -> usize;

    /// Predicts whether the `row`-th example is selected.
    fn predict(&self, sample: &Sample, row: usize) -> bool;

    /// Returns the nodes visited by the `row`-th example
    /// in root-to-leaf order. The last step is always a leaf.
    fn decision_path(&self, sample: &Sample, row: usize) -> Vec<PathStep<'_>>;

    /// Predicts every example of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<bool> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect()
    }
}

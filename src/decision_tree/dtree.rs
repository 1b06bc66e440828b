use std::fmt;

use crate::{
    error::{RangeError, Result},
    learner::{DecisionPath, TreeLearner},
    tree::{Depth, LabelWeight, LeftRight, Splitter},
    Sample,
};

use super::{
    node::Node,
    split_by::SplitBy,
    classifier::DecisionTreeClassifier,
};


/// Generates a [`DecisionTreeClassifier`] that separates
/// the selected rows of a [`Sample`] from the others.
///
/// A node is split as long as it holds both classes,
/// some feature is non-constant on it,
/// and the depth budget is not exhausted.
/// Construct it through [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionTree {
    split_by: SplitBy,
    max_depth: Option<Depth>,
}


impl DecisionTree {
    #[inline]
    pub(super) fn from_components(
        split_by: SplitBy,
        max_depth: Option<Depth>,
    ) -> Self
    {
        Self { split_by, max_depth }
    }


    /// Returns the splitting criterion.
    #[inline]
    pub fn split_by(&self) -> SplitBy {
        self.split_by
    }


    /// Returns the depth cap set by the builder, if any.
    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth.map(Depth::get)
    }
}


impl TreeLearner for DecisionTree {
    type Tree = DecisionTreeClassifier;


    fn name(&self) -> &str {
        "Decision Tree"
    }


    /// Grow a tree over every row of `sample`.
    /// `max_depth` overrides the cap given to the builder.
    fn fit(&self, sample: &Sample, max_depth: Option<usize>)
        -> Result<Self::Tree>
    {
        let n_sample = sample.shape().0;
        if n_sample == 0 {
            return Err(RangeError::InputShape(
                "cannot fit a tree on an empty sample".to_string()
            ));
        }

        let depth = max_depth.map(Depth::from).or(self.max_depth);
        let nodes = grow(sample, self.split_by, depth);
        let n_nodes = nodes.len();

        let tree = DecisionTreeClassifier::from_nodes(nodes);
        log::debug!(
            "fitted a tree of depth {} with {} nodes (cap: {:?})",
            tree.depth(),
            n_nodes,
            depth.map(Depth::get),
        );
        Ok(tree)
    }
}


/// A node waiting to be grown.
struct Pending {
    indices: Vec<usize>,
    depth: Option<Depth>,
    parent: Option<(usize, LeftRight)>,
}


/// Grow a tree over every row of `sample`.
/// The nodes are returned in pre-order, each at the index of its id.
fn grow(sample: &Sample, split_by: SplitBy, depth: Option<Depth>)
    -> Vec<Node>
{
    let n_sample = sample.shape().0;
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack = vec![Pending {
        indices: (0..n_sample).collect(),
        depth,
        parent: None,
    }];

    // The left child is pushed last, so its subtree is numbered first.
    while let Some(Pending { indices, depth, parent }) = stack.pop() {
        let id = nodes.len();
        if let Some((parent, side)) = parent {
            nodes[parent].attach(side, id);
        }

        let weight = LabelWeight::of(sample.target(), &indices[..]);
        match split(sample, indices, &weight, split_by, depth) {
            Some((rule, lindices, rindices)) => {
                nodes.push(Node::branch(id, rule, weight));

                let depth = depth.map(|d| d - 1);
                stack.push(Pending {
                    indices: rindices,
                    depth,
                    parent: Some((id, LeftRight::Right)),
                });
                stack.push(Pending {
                    indices: lindices,
                    depth,
                    parent: Some((id, LeftRight::Left)),
                });
            },
            None => {
                nodes.push(Node::leaf(id, weight));
            },
        }
    }
    nodes
}


/// Split the examples `indices` by the best rule.
/// Returns `None` if the node must be a leaf.
fn split(
    sample: &Sample,
    indices: Vec<usize>,
    weight: &LabelWeight,
    split_by: SplitBy,
    depth: Option<Depth>,
) -> Option<(Splitter, Vec<usize>, Vec<usize>)>
{
    if weight.is_pure() || depth.is_some_and(|d| d == 0) {
        return None;
    }

    // Find the best pair of feature name and threshold
    // based on `split_by`.
    let (feature, threshold) = split_by.best_split(sample, &indices[..])?;
    let rule = Splitter::new(feature, threshold);


    let mut lindices = Vec::new();
    let mut rindices = Vec::new();
    for i in indices.into_iter() {
        match rule.split(sample, i) {
            LeftRight::Left  => { lindices.push(i); },
            LeftRight::Right => { rindices.push(i); },
        }
    }

    if lindices.is_empty() || rindices.is_empty() {
        return None;
    }
    Some((rule, lindices, rindices))
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.max_depth
            .map_or_else(|| "unbounded".to_string(), |d| d.to_string());
        writeln!(
            f,
            "\
            ----------\n\
            # Decision Tree Learner\n\n\
            - Max depth: {depth}\n\
            - Splitting criterion: {split_by}\n\
            ----------\
            ",
            split_by = self.split_by,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{learner::PathStep, DecisionTreeBuilder};
    use polars::prelude::*;
    use test_log::test;

    fn sample(x: &[f64], selection: &[bool]) -> Sample {
        let data = DataFrame::new(vec![Series::new("x", x)]).unwrap();
        Sample::from_dataframe(&data, &["x"], selection).unwrap()
    }

    fn range(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_fit_separable_threshold() {
        let x = range(10);
        let selection = x.iter().map(|&v| v >= 5.0).collect::<Vec<_>>();
        let sample = sample(&x, &selection);

        let tree = DecisionTreeBuilder::new().build()
            .fit(&sample, None)
            .unwrap();

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_all(&sample), selection);
    }

    #[test]
    fn test_fit_box_needs_two_levels() {
        let x = range(10);
        let selection = x.iter()
            .map(|&v| (3.0..=6.0).contains(&v))
            .collect::<Vec<_>>();
        let sample = sample(&x, &selection);
        let learner = DecisionTreeBuilder::new().build();

        let tree = learner.fit(&sample, None).unwrap();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.predict_all(&sample), selection);

        let tree = learner.fit(&sample, Some(1)).unwrap();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_fit_single_class_is_a_leaf() {
        let x = range(4);
        let sample = sample(&x, &[true; 4]);

        let tree = DecisionTreeBuilder::new().build()
            .fit(&sample, None)
            .unwrap();

        assert_eq!(tree.depth(), 0);
        assert!(tree.predict(&sample, 0));
    }

    #[test]
    fn test_fit_with_identical_rows_stops() {
        // Two identical rows with different labels cannot be separated.
        let x = [1.0, 1.0, 2.0];
        let sample = sample(&x, &[true, false, false]);

        let tree = DecisionTreeBuilder::new().build()
            .fit(&sample, None)
            .unwrap();

        assert_eq!(tree.depth(), 1);
        // The leaf `x <= 1.5` holds one row of each class.
        assert!(!tree.predict(&sample, 0));
    }

    #[test]
    fn test_builder_cap_is_overridden_by_argument() {
        let x = range(10);
        let selection = x.iter()
            .map(|&v| (3.0..=6.0).contains(&v))
            .collect::<Vec<_>>();
        let sample = sample(&x, &selection);
        let learner = DecisionTreeBuilder::new().max_depth(1).build();

        assert_eq!(learner.fit(&sample, None).unwrap().depth(), 1);
        assert_eq!(learner.fit(&sample, Some(3)).unwrap().depth(), 2);
    }

    #[test]
    fn test_fit_deep_tree_without_recursion() {
        // Alternating labels on a line: every split peels off one row,
        // so the tree is about as deep as the sample is large.
        let n = 5_000;
        let x = range(n);
        let selection = (0..n).map(|i| i % 2 == 0).collect::<Vec<_>>();
        let sample = sample(&x, &selection);

        let tree = DecisionTreeBuilder::new().build()
            .fit(&sample, None)
            .unwrap();

        assert_eq!(tree.depth(), n - 1);
        assert_eq!(tree.nodes().len(), 2 * n - 1);
        assert_eq!(tree.predict_all(&sample), selection);

        let path = tree.decision_path(&sample, n - 1);
        assert!(path.len() <= n, "got a path of {} steps", path.len());
        assert!(matches!(path.last(), Some(PathStep::Leaf { positive: false, .. })));
    }

    #[test]
    fn test_display() {
        let learner = DecisionTreeBuilder::new()
            .split_by(SplitBy::Entropy)
            .build();
        let text = learner.to_string();
        assert!(text.contains("Max depth: unbounded"), "got {text}");
        assert!(text.contains("Entropy"), "got {text}");
    }
}

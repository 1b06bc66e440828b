//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{
    learner::{DecisionPath, PathStep},
    tree::LeftRight,
    Sample,
};
use super::node::*;


/// Decision tree classifier.
/// The nodes are stored in pre-order, so the root is `nodes[0]`
/// and every child comes after its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    nodes: Vec<Node>,
    depth: usize,
}


impl DecisionTreeClassifier {
    /// Wrap the pre-ordered `nodes` of a grown tree.
    /// `nodes` is never empty.
    #[inline]
    pub(super) fn from_nodes(nodes: Vec<Node>) -> Self {
        let depth = depth_of(&nodes[..]);
        Self { nodes, depth }
    }


    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }


    /// Returns the node with the pre-order id `id`, if any.
    #[inline]
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }


    /// Returns every node in pre-order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes[..]
    }


    /// Returns the leaf the `row`-th example falls into.
    fn leaf_of(&self, sample: &Sample, row: usize) -> &LeafNode {
        let mut node = self.root();
        loop {
            match node {
                Node::Branch(b) => {
                    let side = b.rule.split(sample, row);
                    node = &self.nodes[b.child(side)];
                },
                Node::Leaf(l) => return l,
            }
        }
    }
}


/// Length of the longest root-to-leaf path of pre-ordered `nodes`.
fn depth_of(nodes: &[Node]) -> usize {
    let mut levels = vec![0usize; nodes.len()];
    for node in nodes {
        if let Node::Branch(b) = node {
            let level = levels[b.id] + 1;
            levels[b.left] = level;
            levels[b.right] = level;
        }
    }
    levels.into_iter().max().unwrap_or(0)
}


impl DecisionPath for DecisionTreeClassifier {
    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }


    #[inline]
    fn predict(&self, sample: &Sample, row: usize) -> bool {
        self.leaf_of(sample, row).prediction()
    }


    fn decision_path(&self, sample: &Sample, row: usize) -> Vec<PathStep<'_>> {
        let mut path = Vec::with_capacity(self.depth + 1);
        let mut node = self.root();
        loop {
            match node {
                Node::Branch(b) => {
                    let direction = b.rule.split(sample, row);
                    path.push(PathStep::Branch {
                        node: b.id,
                        feature: &b.rule.feature,
                        threshold: b.rule.threshold,
                        direction,
                    });
                    node = &self.nodes[b.child(direction)];
                },
                Node::Leaf(l) => {
                    path.push(PathStep::Leaf {
                        node: l.id,
                        positive: l.prediction(),
                    });
                    return path;
                },
            }
        }
    }
}


impl fmt::Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(0usize, 0usize)];
        while let Some((id, indent)) = stack.pop() {
            let pad = "  ".repeat(indent);
            match &self.nodes[id] {
                Node::Branch(b) => {
                    writeln!(
                        f,
                        "{pad}[{id}] {feat} <= {thr:.2} ?",
                        feat = b.rule.feature,
                        thr = b.rule.threshold,
                    )?;
                    stack.push((b.child(LeftRight::Right), indent + 1));
                    stack.push((b.child(LeftRight::Left), indent + 1));
                },
                Node::Leaf(l) => {
                    writeln!(
                        f,
                        "{pad}[{id}] {label} ({pos} / {neg})",
                        label = l.prediction(),
                        pos = l.weight.positive,
                        neg = l.weight.negative,
                    )?;
                },
            }
        }
        Ok(())
    }
}

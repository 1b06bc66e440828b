//! Defines the inner representation
//! of the Decision Tree class.
//!
//! The nodes of a tree live in one `Vec`, indexed by their pre-order id,
//! and a branch refers to its children by id.
use serde::{Serialize, Deserialize};

use crate::tree::{LabelWeight, LeftRight, Splitter};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) id: usize,
    pub(super) rule: Splitter,
    pub(super) left: usize,
    pub(super) right: usize,
    pub(super) weight: LabelWeight,
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) id: usize,
    pub(super) weight: LabelWeight,
}


impl Node {
    /// Returns a branch node.
    /// The children are attached once they get their ids.
    #[inline]
    pub(super) fn branch(id: usize, rule: Splitter, weight: LabelWeight)
        -> Self
    {
        Self::Branch(BranchNode { id, rule, left: id, right: id, weight })
    }


    /// Returns a leaf node.
    #[inline]
    pub(super) fn leaf(id: usize, weight: LabelWeight) -> Self {
        Self::Leaf(LeafNode { id, weight })
    }


    /// Make `child` the `side` child of this node.
    /// Leaves are left untouched.
    #[inline]
    pub(super) fn attach(&mut self, side: LeftRight, child: usize) {
        if let Node::Branch(b) = self {
            match side {
                LeftRight::Left => { b.left = child; },
                LeftRight::Right => { b.right = child; },
            }
        }
    }


    /// Returns the pre-order id of this node.
    #[inline]
    pub fn id(&self) -> usize {
        match self {
            Node::Branch(b) => b.id,
            Node::Leaf(l) => l.id,
        }
    }


    /// Returns the number of selected/unselected training rows
    /// that reached this node.
    #[inline]
    pub fn weight(&self) -> LabelWeight {
        match self {
            Node::Branch(b) => b.weight,
            Node::Leaf(l) => l.weight,
        }
    }
}


impl BranchNode {
    /// Returns the split of this node.
    #[inline]
    pub fn rule(&self) -> &Splitter {
        &self.rule
    }


    /// Returns the id of the child on `side`.
    #[inline]
    pub fn child(&self, side: LeftRight) -> usize {
        match side {
            LeftRight::Left => self.left,
            LeftRight::Right => self.right,
        }
    }
}


impl LeafNode {
    /// Returns the class predicted by this leaf.
    #[inline]
    pub fn prediction(&self) -> bool {
        self.weight.majority()
    }
}

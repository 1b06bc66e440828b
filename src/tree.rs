//! This file defines some tools for tree algorithms
use serde::{Serialize, Deserialize};
use std::{fmt, cmp, ops};
use crate::Sample;


/// Struct `Depth` defines the maximal depth of a tree.
/// This is just a wrapper for `usize`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Depth(usize);

impl Depth {
    /// Returns the wrapped value.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.0;
        write!(f, "{depth}")
    }
}

impl From<usize> for Depth {
    fn from(depth: usize) -> Self {
        Self(depth)
    }
}

impl ops::Sub<usize> for Depth {
    type Output = Self;
    /// Define the subtraction of the `Depth` struct.
    /// The subtraction does not return a value less than `0`.
    #[inline]
    fn sub(self, other: usize) -> Self::Output {
        Self(self.0.saturating_sub(other))
    }
}

impl cmp::PartialEq<usize> for Depth {
    #[inline]
    fn eq(&self, rhs: &usize) -> bool {
        self.0.eq(rhs)
    }
}

impl cmp::PartialOrd<usize> for Depth {
    #[inline]
    fn partial_cmp(&self, other: &usize) -> Option<cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeftRight {
    /// The value is at most the threshold.
    Left,
    /// The value is greater than the threshold.
    Right,
}


/// A single axis-aligned split: `feature <= threshold` goes left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    /// The feature name.
    pub feature: String,
    /// The unrounded threshold.
    pub threshold: f64,
}

impl Splitter {
    /// Construct a new splitting rule.
    #[inline]
    pub fn new(name: &str, threshold: f64) -> Self {
        let feature = name.to_string();
        Self {
            feature,
            threshold
        }
    }

    /// Defines the splitting.
    #[inline]
    pub fn split(&self, sample: &Sample, row: usize) -> LeftRight {
        let name = &self.feature;

        let value = sample[name][row];

        if value <= self.threshold { LeftRight::Left } else { LeftRight::Right }
    }
}


/// Total weight of the selected (positive) and
/// unselected (negative) rows reaching a node.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct LabelWeight {
    /// Weight of the selected rows.
    pub positive: f64,
    /// Weight of the unselected rows.
    pub negative: f64,
}

impl LabelWeight {
    /// Count the labels of `target` over `indices`
    /// with unit weight per row.
    pub fn of(target: &[bool], indices: &[usize]) -> Self {
        indices.iter()
            .fold(Self::default(), |mut weight, &i| {
                weight.add(target[i], 1f64);
                weight
            })
    }

    /// Add `w` to the weight of `label`.
    #[inline]
    pub fn add(&mut self, label: bool, w: f64) {
        if label { self.positive += w; } else { self.negative += w; }
    }

    /// Returns the total weight.
    #[inline]
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }

    /// Returns `true` if only one label reaches the node.
    #[inline]
    pub fn is_pure(&self) -> bool {
        self.positive == 0f64 || self.negative == 0f64
    }

    /// Returns the majority label.
    /// Ties go to the unselected class.
    #[inline]
    pub fn majority(&self) -> bool {
        self.positive > self.negative
    }
}

impl ops::Add<Self> for LabelWeight {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            positive: self.positive + rhs.positive,
            negative: self.negative + rhs.negative,
        }
    }
}

impl ops::Sub<Self> for LabelWeight {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            positive: self.positive - rhs.positive,
            negative: self.negative - rhs.negative,
        }
    }
}

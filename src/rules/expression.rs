//! Defines a single threshold comparison on one dimension.
use polars::prelude::*;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{
    constants::{MASK_NAME, THRESHOLD_DIGITS},
    error::{RangeError, Result},
};


/// The comparison operator of an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// `value >= threshold`.
    GreaterEq,
    /// `value <= threshold`.
    LessEq,
}


impl Comparison {
    /// Returns the textual operator.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterEq => ">=",
            Self::LessEq => "<=",
        }
    }


    /// Returns `true` if `value` satisfies the comparison
    /// against `threshold`.
    #[inline]
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterEq => value >= threshold,
            Self::LessEq => value <= threshold,
        }
    }
}


impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// A threshold expression `feature >= threshold`
/// or `feature <= threshold`.
///
/// The structured expression keeps the threshold as the tree found it.
/// The text form rounds it to two decimals:
///
/// ```
/// use range_intent::prelude::*;
///
/// let expr = Expression::new("age", Comparison::GreaterEq, 29.996);
/// assert_eq!(expr.to_string(), "age >= 30.0");
///
/// let parsed: Expression = "age >= 30.0".parse().unwrap();
/// assert_eq!(parsed.threshold(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    feature: String,
    comparison: Comparison,
    threshold: f64,
}


impl Expression {
    /// Construct a new expression.
    pub fn new<T: ToString>(
        feature: T,
        comparison: Comparison,
        threshold: f64,
    ) -> Self
    {
        let feature = feature.to_string();
        Self { feature, comparison, threshold, }
    }


    /// Returns the feature name.
    #[inline]
    pub fn feature(&self) -> &str {
        &self.feature
    }


    /// Returns the comparison operator.
    #[inline]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }


    /// Returns the unrounded threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }


    /// Returns the threshold rounded to two decimals,
    /// i.e., the value shown in the text form.
    /// Halves are rounded to even, so `0.125` becomes `0.12`.
    #[inline]
    pub fn rounded_threshold(&self) -> f64 {
        let scale = 10f64.powi(THRESHOLD_DIGITS);
        (self.threshold * scale).round_ties_even() / scale
    }


    /// Evaluate the expression on every row of `data`.
    /// Null values do not satisfy the expression.
    pub fn mask(&self, data: &DataFrame) -> Result<BooleanChunked> {
        let column = data.column(&self.feature)
            .map_err(|_| RangeError::UnknownDimension(self.feature.clone()))?;
        let values = column.strict_cast(&DataType::Float64)?;

        let mask = values.f64()?
            .into_iter()
            .map(|value| {
                value.is_some_and(|v| self.comparison.holds(v, self.threshold))
            })
            .collect::<Vec<bool>>();

        Ok(BooleanChunked::from_slice(MASK_NAME, &mask))
    }
}


impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:?}",
            self.feature, self.comparison, self.rounded_threshold()
        )
    }
}


impl FromStr for Expression {
    type Err = RangeError;

    /// Parse `feature >= value` or `feature <= value`.
    /// `>=` is looked up before `<=`.
    fn from_str(text: &str) -> Result<Self> {
        let (feature, comparison, value) = if let Some((f, v)) = text.split_once(">=") {
            (f, Comparison::GreaterEq, v)
        } else if let Some((f, v)) = text.split_once("<=") {
            (f, Comparison::LessEq, v)
        } else {
            return Err(RangeError::parse(text, "expected `>=` or `<=`"));
        };

        let feature = feature.trim();
        if feature.is_empty() {
            return Err(RangeError::parse(text, "the feature name is empty"));
        }

        let value = value.trim();
        let threshold = value.parse::<f64>()
            .map_err(|e| RangeError::parse(text, format!("`{value}`: {e}")))?;

        Ok(Self::new(feature, comparison, threshold))
    }
}


impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.feature == other.feature
            && self.comparison == other.comparison
            && self.threshold.to_bits() == other.threshold.to_bits()
    }
}


impl Eq for Expression {}


impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.feature.hash(state);
        self.comparison.hash(state);
        self.threshold.to_bits().hash(state);
    }
}


/// Evaluate the textual threshold expression `text` on `data`.
pub fn evaluate(data: &DataFrame, text: &str) -> Result<BooleanChunked> {
    text.parse::<Expression>()?
        .mask(data)
}

use polars::prelude::*;
use std::ops::Index;

use crate::error::{RangeError, Result};

/// Dense representation of a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    vals: Vec<f64>,
}

impl Feature {
    /// Construct a feature named `name` holding `vals`.
    pub fn new<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), vals, }
    }

    /// Convert a `polars::Series` into a dense feature.
    /// Any dtype castable to `Float64` is accepted,
    /// but null and NaN values are rejected.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name();
        let casted = series.cast(&DataType::Float64)?;
        let vals = casted.f64()?
            .into_iter()
            .enumerate()
            .map(|(row, val)| match val {
                Some(v) if !v.is_nan() => Ok(v),
                _ => Err(RangeError::InputShape(format!(
                    "column `{name}` has no numeric value at row {row}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, vals))
    }

    /// Get the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the feature values.
    pub fn vals(&self) -> &[f64] {
        &self.vals[..]
    }

    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    /// Returns `true` if the feature holds no value.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }
}

impl Index<usize> for Feature {
    type Output = f64;

    fn index(&self, row: usize) -> &Self::Output {
        &self.vals[row]
    }
}

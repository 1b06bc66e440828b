//! Error types of the range inference.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Every failure is fatal to the call that raised it.
#[derive(Debug, Error)]
pub enum RangeError {
    /// The inputs do not line up (selection length, empty dataset, ...).
    #[error("Invalid input shape: {0}")]
    InputShape(String),

    /// A dimension or the id column is missing from the dataset.
    #[error("Unknown column: {0}")]
    UnknownDimension(String),

    /// A threshold expression does not follow `feature >= value`
    /// or `feature <= value`.
    #[error("Failed to parse expression `{expression}`: {reason}")]
    Parse {
        /// The offending text.
        expression: String,
        /// What went wrong.
        reason: String,
    },

    /// A mask was requested for a rule set without any rule.
    #[error("Cannot build a mask from an empty rule set")]
    EmptyRuleSet,

    /// Failure inside `polars`.
    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),

    /// Failure while reading or writing JSON.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RangeError {
    pub(crate) fn parse<E, R>(expression: E, reason: R) -> Self
        where E: ToString,
              R: ToString,
    {
        Self::Parse {
            expression: expression.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type of the range inference.
pub type Result<T> = std::result::Result<T, RangeError>;

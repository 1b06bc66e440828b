//! Constants shared across the crate.

/// The column holding the row identifiers, unless configured otherwise.
pub const DEFAULT_ID_COLUMN: &str = "id";

/// Number of decimals kept when a threshold is rendered as text.
pub const THRESHOLD_DIGITS: i32 = 2;

/// The algorithm name reported by every [`Prediction`](crate::Prediction).
pub const ALGORITHM: &str = "DecisionTree";

/// The name given to the boolean masks built by this crate.
pub const MASK_NAME: &str = "mask";

/// Numeric conversion helpers.
///
/// This module provides checked conversions between arbitrary precision
/// integers, `u64` and `f64`. Every conversion that could lose the value
/// reports a domain error instead of silently saturating or rounding to
/// infinity.
pub mod num;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{error::EvalError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a big integer to the nearest `f64`.
///
/// ## Errors
/// Returns a domain error if the magnitude exceeds `f64::MAX`.
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use safecalc::util::num::bigint_to_f64;
///
/// assert_eq!(bigint_to_f64(&BigInt::from(42)).unwrap(), 42.0);
///
/// let huge = BigInt::from(10).pow(400);
/// assert!(bigint_to_f64(&huge).is_err());
/// ```
pub fn bigint_to_f64(value: &BigInt) -> EvalResult<f64> {
    value.to_f64()
         .filter(|v| v.is_finite())
         .ok_or_else(|| EvalError::domain("integer is too large to convert to a real number"))
}

/// Returns the exact integer held by a real, or `None` if it has a fractional
/// part or is not finite.
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use safecalc::util::num::real_to_bigint;
///
/// assert_eq!(real_to_bigint(-3.0), Some(BigInt::from(-3)));
/// assert_eq!(real_to_bigint(2.5), None);
/// assert_eq!(real_to_bigint(f64::INFINITY), None);
/// ```
#[must_use]
pub fn real_to_bigint(value: f64) -> Option<BigInt> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    BigInt::from_f64(value)
}

/// Converts a big integer to `u64`, failing with `message` when it is negative
/// or too large.
///
/// ## Errors
/// Returns `EvalError::Domain { message }` when the value is out of range.
pub fn bigint_to_u64(value: &BigInt, message: &str) -> EvalResult<u64> {
    value.to_u64().ok_or_else(|| EvalError::domain(message))
}

/// Accepts a real result only if it is finite.
///
/// `operation` names the computation in the error message.
///
/// ## Errors
/// Returns a domain error for infinities and NaN.
///
/// ## Example
/// ```
/// use safecalc::util::num::finite_or_domain;
///
/// assert_eq!(finite_or_domain(1.5, "addition").unwrap(), 1.5);
///
/// let err = finite_or_domain(f64::INFINITY, "addition").unwrap_err();
/// assert_eq!(err.to_string(), "Domain error: result of addition is too large.");
/// ```
pub fn finite_or_domain(value: f64, operation: &str) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else if value.is_nan() {
        Err(EvalError::domain(format!("result of {operation} is undefined")))
    } else {
        Err(EvalError::domain(format!("result of {operation} is too large")))
    }
}

/// Converts a `u64` to `f64` if and only if it is exactly representable.
///
/// ## Errors
/// Returns a domain error if the value exceeds `MAX_SAFE_U64_INT`.
#[allow(clippy::cast_precision_loss)]
pub fn u64_to_f64_checked(value: u64) -> EvalResult<f64> {
    if value > MAX_SAFE_U64_INT {
        return Err(EvalError::domain("integer is too large to convert exactly"));
    }
    Ok(value as f64)
}

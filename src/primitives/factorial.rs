use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::bigint_to_u64,
};

/// Largest argument accepted by [`factorial`] by default.
pub const DEFAULT_FACTORIAL_LIMIT: u64 = 10_000;

const TOO_LARGE: &str = "number too large for factorial";

/// Computes `n!` exactly with the default argument limit.
///
/// # Errors
/// - `n` is negative or has a fractional part.
/// - `n` exceeds [`DEFAULT_FACTORIAL_LIMIT`].
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::factorial};
///
/// assert_eq!(factorial(&5.into()).unwrap(), Number::from(120));
/// assert_eq!(factorial(&5.0.into()).unwrap(), Number::from(120));
/// assert!(factorial(&(-1).into()).is_err());
/// assert!(factorial(&2.5.into()).is_err());
/// assert!(factorial(&10_001.into()).is_err());
/// ```
pub fn factorial(n: &Number) -> EvalResult<Number> {
    factorial_bounded(n, DEFAULT_FACTORIAL_LIMIT)
}

/// Computes `n!` exactly, rejecting arguments above `limit`.
///
/// # Errors
/// Same as [`factorial`], with `limit` in place of the default.
pub fn factorial_bounded(n: &Number, limit: u64) -> EvalResult<Number> {
    let k = factorial_argument(n, limit)?;
    Ok(Number::Integer(factorial_u64(k)))
}

/// Validates a factorial argument and returns it as a `u64`.
///
/// Reals are accepted when they hold an integral value.
///
/// # Errors
/// Rejects negative, fractional and too large arguments.
pub fn factorial_argument(n: &Number, limit: u64) -> EvalResult<u64> {
    let value = n.to_integer()
                 .filter(|v| !v.is_negative())
                 .ok_or_else(|| {
                     EvalError::domain("factorial is only defined for non-negative integers")
                 })?;

    let k = bigint_to_u64(&value, TOO_LARGE)?;
    if k > limit {
        return Err(EvalError::domain(TOO_LARGE));
    }
    Ok(k)
}

/// Multiplies out `n!` without any limit check.
#[must_use]
pub fn factorial_u64(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

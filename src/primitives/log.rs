use std::f64::consts::LN_2;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::u64_to_f64_checked,
};

/// Bit length above which integers are scaled down before taking a logarithm.
const LARGE_INTEGER_BITS: u64 = 1000;

/// Computes the natural logarithm.
///
/// Integers of any size are accepted, including ones too large to convert to
/// `f64`.
///
/// # Errors
/// The argument must be strictly positive.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::ln};
///
/// assert_eq!(ln(&1.into()).unwrap(), Number::from(0.0));
/// assert!(ln(&0.into()).is_err());
/// ```
pub fn ln(value: &Number) -> EvalResult<Number> {
    natural_log(value).map(Number::Real)
}

/// Computes the logarithm of `value` in `base`, which defaults to 10.
///
/// Bases 10 and 2 use the dedicated `f64` routines so that exact powers give
/// exact results.
///
/// # Errors
/// - `value` is zero or negative.
/// - `base` is zero, negative or one.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::log};
///
/// assert_eq!(log(&100.into(), Some(&10.into())).unwrap(), Number::from(2.0));
/// assert_eq!(log(&100.into(), None).unwrap(), Number::from(2.0));
/// assert_eq!(log(&8.into(), Some(&2.into())).unwrap(), Number::from(3.0));
/// assert!(log(&10.into(), Some(&1.into())).is_err());
/// ```
pub fn log(value: &Number, base: Option<&Number>) -> EvalResult<Number> {
    check_positive(value)?;
    let base = match base {
        Some(b) => b.to_f64()?,
        None => 10.0,
    };
    if base <= 0.0 || base == 1.0 {
        return Err(EvalError::domain("logarithm base must be positive and not equal to 1"));
    }

    if let Ok(x) = value.to_f64() {
        if base == 10.0 {
            return Ok(Number::Real(x.log10()));
        }
        if base == 2.0 {
            return Ok(Number::Real(x.log2()));
        }
        return Ok(Number::Real(x.ln() / base.ln()));
    }

    Ok(Number::Real(natural_log(value)? / base.ln()))
}

fn check_positive(value: &Number) -> EvalResult<()> {
    if value.is_negative() || value.is_zero() {
        return Err(EvalError::domain("logarithm is only defined for positive numbers"));
    }
    Ok(())
}

fn natural_log(value: &Number) -> EvalResult<f64> {
    check_positive(value)?;
    match value {
        Number::Integer(n) if n.bits() > LARGE_INTEGER_BITS => big_integer_ln(n),
        _ => Ok(value.to_f64()?.ln()),
    }
}

/// `ln(n) = ln(n >> s) + s * ln(2)`, keeping the top 64 bits of `n`.
fn big_integer_ln(n: &BigInt) -> EvalResult<f64> {
    let shift = n.bits() - 64;
    let top = (n >> shift).to_f64()
                           .ok_or_else(|| EvalError::domain("logarithm argument is out of range"))?;
    Ok(top.ln() + u64_to_f64_checked(shift)? * LN_2)
}

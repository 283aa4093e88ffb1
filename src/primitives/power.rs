use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::finite_or_domain,
};

/// Default cap on the bit length of an exact integer power (about 315 000
/// decimal digits).
pub const DEFAULT_MAX_INTEGER_BITS: u64 = 1 << 20;

/// Raises `base` to `exponent` with the default integer size limit.
///
/// See [`power_bounded`] for the rules.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::power};
///
/// assert_eq!(power(&2.into(), &10.into()).unwrap(), Number::from(1024));
/// assert_eq!(power(&2.into(), &(-1).into()).unwrap(), Number::from(0.5));
/// assert!(power(&0.into(), &(-1).into()).is_err());
/// assert!(power(&(-8).into(), &(1.0 / 3.0).into()).is_err());
/// ```
pub fn power(base: &Number, exponent: &Number) -> EvalResult<Number> {
    power_bounded(base, exponent, DEFAULT_MAX_INTEGER_BITS)
}

/// Raises `base` to `exponent`.
///
/// - An integer base with a non-negative integer exponent gives an exact
///   integer, provided the result fits in `max_bits` bits.
/// - Every other combination is computed in `f64` by [`real_power`].
///
/// # Errors
/// - The exact result would exceed `max_bits`.
/// - Zero raised to a negative power.
/// - A negative base with a fractional exponent (the result would be complex).
/// - The real result overflows.
pub fn power_bounded(base: &Number, exponent: &Number, max_bits: u64) -> EvalResult<Number> {
    if let (Number::Integer(b), Number::Integer(e)) = (base, exponent)
       && !e.is_negative()
    {
        return integer_power(b, e, max_bits).map(Number::Integer);
    }

    real_power(base.to_f64()?, exponent.to_f64()?).map(Number::Real)
}

fn integer_power(base: &BigInt, exponent: &BigInt, max_bits: u64) -> EvalResult<BigInt> {
    if exponent.is_zero() || base.is_one() {
        return Ok(BigInt::one());
    }
    if base.is_zero() {
        return Ok(BigInt::zero());
    }
    if *base == BigInt::from(-1) {
        return Ok(if exponent.is_even() { BigInt::one() } else { -BigInt::one() });
    }

    let too_large = || EvalError::domain("result of exponentiation is too large");
    let exp = exponent.to_u32().ok_or_else(too_large)?;
    if base.bits().saturating_mul(u64::from(exp)) > max_bits {
        return Err(too_large());
    }

    Ok(base.pow(exp))
}

fn check_power_domain(base: f64, exponent: f64) -> EvalResult<()> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::domain("zero cannot be raised to a negative power"));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::domain("negative base with a fractional exponent has no real result"));
    }
    Ok(())
}

/// Real exponentiation with fast paths for the exponents `2`, `1`, `0.5` and
/// `-0.5`.
///
/// The fast paths agree with [`reference_power`] to within rounding and fail on
/// exactly the same inputs.
///
/// # Errors
/// Same domain rules as [`power_bounded`].
///
/// # Example
/// ```
/// use safecalc::primitives::power::real_power;
///
/// assert_eq!(real_power(3.0, 2.0).unwrap(), 9.0);
/// assert_eq!(real_power(16.0, 0.5).unwrap(), 4.0);
/// assert_eq!(real_power(4.0, -0.5).unwrap(), 0.5);
/// assert!(real_power(10.0, 400.0).is_err());
/// ```
pub fn real_power(base: f64, exponent: f64) -> EvalResult<f64> {
    check_power_domain(base, exponent)?;

    let value = if exponent == 2.0 {
        base * base
    } else if exponent == 1.0 {
        base
    } else if exponent == 0.5 {
        base.sqrt()
    } else if exponent == -0.5 {
        base.sqrt().recip()
    } else {
        base.powf(exponent)
    };

    finite_or_domain(value, "exponentiation")
}

/// Real exponentiation through `f64::powf` only.
///
/// # Errors
/// Same domain rules as [`power_bounded`].
pub fn reference_power(base: f64, exponent: f64) -> EvalResult<f64> {
    check_power_domain(base, exponent)?;
    finite_or_domain(base.powf(exponent), "exponentiation")
}

use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::finite_or_domain,
};

/// Adds two numbers, exactly when both are integers.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::add};
///
/// assert_eq!(add(&2.into(), &3.into()).unwrap(), Number::from(5));
/// assert_eq!(add(&2.into(), &0.5.into()).unwrap(), Number::from(2.5));
/// ```
pub fn add(a: &Number, b: &Number) -> EvalResult<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x + y)),
        _ => Ok(Number::Real(finite_or_domain(a.to_f64()? + b.to_f64()?, "addition")?)),
    }
}

/// Subtracts `b` from `a`, exactly when both are integers.
pub fn subtract(a: &Number, b: &Number) -> EvalResult<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x - y)),
        _ => Ok(Number::Real(finite_or_domain(a.to_f64()? - b.to_f64()?, "subtraction")?)),
    }
}

/// Multiplies two numbers, exactly when both are integers.
pub fn multiply(a: &Number, b: &Number) -> EvalResult<Number> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Ok(Number::Integer(x * y)),
        _ => Ok(Number::Real(finite_or_domain(a.to_f64()? * b.to_f64()?, "multiplication")?)),
    }
}

/// Divides `a` by `b`.
///
/// Two integers that divide evenly give an exact integer. Two integers that
/// do not are divided as an exact fraction and rounded once, so operands too
/// large for a real still give their quotient. Every other combination gives
/// a real.
///
/// # Errors
/// - Division by zero (integer or real).
/// - Overflow of the real quotient.
///
/// # Example
/// ```
/// use safecalc::{Number, error::ErrorKind, primitives::divide};
///
/// assert_eq!(divide(&6.into(), &3.into()).unwrap(), Number::from(2));
/// assert_eq!(divide(&7.into(), &2.into()).unwrap(), Number::from(3.5));
///
/// let huge = num_bigint::BigInt::from(10).pow(400);
/// let third = divide(&Number::Integer(huge.clone()), &Number::Integer(huge * 3)).unwrap();
/// assert!((third.to_f64().unwrap() - 1.0 / 3.0).abs() < 1e-15);
///
/// let err = divide(&1.into(), &0.into()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Domain);
/// ```
pub fn divide(a: &Number, b: &Number) -> EvalResult<Number> {
    if b.is_zero() {
        return Err(EvalError::domain("division by zero"));
    }

    if let (Number::Integer(x), Number::Integer(y)) = (a, b) {
        let (quotient, remainder) = x.div_rem(y);
        if remainder.is_zero() {
            return Ok(Number::Integer(quotient));
        }
        let exact = BigRational::new(x.clone(), y.clone());
        let quotient = exact.to_f64().unwrap_or(f64::INFINITY);
        return Ok(Number::Real(finite_or_domain(quotient, "division")?));
    }

    Ok(Number::Real(finite_or_domain(a.to_f64()? / b.to_f64()?, "division")?))
}

/// Computes the floored modulus of `a` by `b`.
///
/// The result takes the sign of the divisor, so `-7 mod 3` is `2` and
/// `7 mod -3` is `-2`.
///
/// # Errors
/// Fails when `b` is zero.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::modulus};
///
/// assert_eq!(modulus(&(-7).into(), &3.into()).unwrap(), Number::from(2));
/// assert_eq!(modulus(&7.5.into(), &2.into()).unwrap(), Number::from(1.5));
/// ```
pub fn modulus(a: &Number, b: &Number) -> EvalResult<Number> {
    if b.is_zero() {
        return Err(EvalError::domain("modulo by zero"));
    }

    if let (Number::Integer(x), Number::Integer(y)) = (a, b) {
        return Ok(Number::Integer(x.mod_floor(y)));
    }

    let divisor = b.to_f64()?;
    let mut remainder = a.to_f64()? % divisor;
    if remainder != 0.0 && (remainder < 0.0) != (divisor < 0.0) {
        remainder += divisor;
    }
    Ok(Number::Real(finite_or_domain(remainder, "modulus")?))
}

/// Flips the sign of a number.
pub fn negate(a: &Number) -> EvalResult<Number> {
    Ok(match a {
        Number::Integer(n) => Number::Integer(-n),
        Number::Real(r) => Number::Real(-r),
    })
}

/// Returns the number unchanged; the unary `+` operator.
pub fn identity(a: &Number) -> EvalResult<Number> {
    Ok(a.clone())
}

/// Returns the absolute value, exactly for integers.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::absolute};
///
/// assert_eq!(absolute(&(-4).into()).unwrap(), Number::from(4));
/// ```
pub fn absolute(a: &Number) -> EvalResult<Number> {
    Ok(match a {
        Number::Integer(n) => Number::Integer(n.abs()),
        Number::Real(r) => Number::Real(r.abs()),
    })
}

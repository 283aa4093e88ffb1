use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
};

/// Computes the square root of a number as a real.
///
/// # Errors
/// Negative inputs have no real square root.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::sqrt};
///
/// assert_eq!(sqrt(&144.into()).unwrap(), Number::from(12.0));
/// assert!(sqrt(&(-1).into()).is_err());
/// ```
pub fn sqrt(value: &Number) -> EvalResult<Number> {
    real_sqrt(value.to_f64()?).map(Number::Real)
}

/// Square root of an `f64`, rejecting negative inputs.
///
/// # Errors
/// Negative inputs have no real square root.
pub fn real_sqrt(value: f64) -> EvalResult<f64> {
    if value < 0.0 {
        return Err(EvalError::domain("square root of a negative number"));
    }
    Ok(value.sqrt())
}

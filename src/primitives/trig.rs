use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::finite_or_domain,
};

/// Below this magnitude of `cos(angle)` the tangent is treated as undefined.
pub const TAN_POLE_EPSILON: f64 = 1e-12;

/// The trigonometric functions; all take their argument in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrigFunction {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
}

impl TrigFunction {
    /// Applies the function to an angle in degrees.
    ///
    /// The angle is reduced modulo 360 before conversion to radians, which
    /// keeps large angles accurate.
    ///
    /// # Errors
    /// The tangent fails where the cosine is (numerically) zero, for example at
    /// 90 and 270 degrees.
    ///
    /// # Example
    /// ```
    /// use safecalc::primitives::trig::TrigFunction;
    ///
    /// assert_eq!(TrigFunction::Sin.apply_degrees(90.0).unwrap(), 1.0);
    /// assert!(TrigFunction::Tan.apply_degrees(90.0).is_err());
    /// assert!(TrigFunction::Tan.apply_degrees(-270.0).is_err());
    /// ```
    pub fn apply_degrees(self, degrees: f64) -> EvalResult<f64> {
        let radians = (degrees % 360.0).to_radians();
        match self {
            Self::Sin => Ok(radians.sin()),
            Self::Cos => Ok(radians.cos()),
            Self::Tan => {
                let cos = radians.cos();
                if cos.abs() < TAN_POLE_EPSILON {
                    return Err(EvalError::domain(format!("tangent is undefined at {degrees} degrees")));
                }
                Ok(radians.sin() / cos)
            },
        }
    }

    /// Returns the function's name as used in expressions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }
}

/// Sine of an angle in degrees.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::sin};
///
/// assert_eq!(sin(&90.into()).unwrap(), Number::from(1.0));
/// ```
pub fn sin(degrees: &Number) -> EvalResult<Number> {
    TrigFunction::Sin.apply_degrees(degrees.to_f64()?).map(Number::Real)
}

/// Cosine of an angle in degrees.
pub fn cos(degrees: &Number) -> EvalResult<Number> {
    TrigFunction::Cos.apply_degrees(degrees.to_f64()?).map(Number::Real)
}

/// Tangent of an angle in degrees.
///
/// # Errors
/// Fails where the tangent has a pole.
pub fn tan(degrees: &Number) -> EvalResult<Number> {
    TrigFunction::Tan.apply_degrees(degrees.to_f64()?).map(Number::Real)
}

/// The exponential function `e^x`.
///
/// # Errors
/// Fails when the result overflows `f64`.
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::exp};
///
/// assert_eq!(exp(&0.into()).unwrap(), Number::from(1.0));
/// assert!(exp(&1000.into()).is_err());
/// ```
pub fn exp(value: &Number) -> EvalResult<Number> {
    finite_or_domain(value.to_f64()?.exp(), "exp").map(Number::Real)
}

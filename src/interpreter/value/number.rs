use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::{
    interpreter::evaluator::core::EvalResult,
    util::num::{bigint_to_f64, real_to_bigint},
};

/// A calculator value.
///
/// `Integer` holds an exact, arbitrarily large integer. `Real` holds a finite
/// `f64`; evaluation never produces infinities or NaN because every operation
/// that could overflow reports a domain error instead.
///
/// Equality is structural: `Integer(2)` and `Real(2.0)` are different values.
/// Use [`Number::to_f64`] to compare numerically.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An exact integer.
    Integer(BigInt),
    /// A finite real number.
    Real(f64),
}

impl Number {
    /// Returns the integer zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::Integer(BigInt::zero())
    }

    /// Converts the value to `f64`.
    ///
    /// # Errors
    /// Fails with a domain error if an integer is too large to be represented
    /// as a finite `f64`.
    ///
    /// # Example
    /// ```
    /// use safecalc::Number;
    ///
    /// assert_eq!(Number::from(12).to_f64().unwrap(), 12.0);
    /// assert_eq!(Number::from(0.5).to_f64().unwrap(), 0.5);
    /// ```
    pub fn to_f64(&self) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => bigint_to_f64(n),
            Self::Real(r) => Ok(*r),
        }
    }

    /// Returns the exact integer this value denotes, if any.
    ///
    /// Reals qualify when they have no fractional part, so `Real(5.0)` yields
    /// `5`.
    ///
    /// # Example
    /// ```
    /// use num_bigint::BigInt;
    /// use safecalc::Number;
    ///
    /// assert_eq!(Number::from(5.0).to_integer(), Some(BigInt::from(5)));
    /// assert_eq!(Number::from(5.5).to_integer(), None);
    /// ```
    #[must_use]
    pub fn to_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(n) => Some(n.clone()),
            Self::Real(r) => real_to_bigint(*r),
        }
    }

    /// Returns `true` for the integer zero and for `±0.0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_zero(),
            Self::Real(r) => *r == 0.0,
        }
    }

    /// Returns `true` if the value is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_negative(),
            Self::Real(r) => *r < 0.0,
        }
    }

    /// Returns `true` for the `Integer` variant.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

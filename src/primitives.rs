//! Checked numeric primitives.
//!
//! Every function here is pure, works on [`Number`](crate::Number) values and
//! reports invalid or unrepresentable results as
//! [`EvalError::Domain`](crate::error::EvalError::Domain) instead of returning
//! infinities, NaN or complex numbers. The evaluator's operator and function
//! tables are thin wrappers over these functions.

/// Addition, subtraction, multiplication, division, modulus, sign and
/// absolute value.
pub mod arithmetic;
/// Exponentiation with exact integer results and real fast paths.
pub mod power;
/// Square roots.
pub mod roots;
/// Exact factorials with a size limit.
pub mod factorial;
/// Logarithms in arbitrary bases.
pub mod log;
/// Trigonometry in degrees and the exponential function.
pub mod trig;
/// Number sequences and primality.
pub mod sequence;

pub use arithmetic::{absolute, add, divide, modulus, multiply, negate, subtract};
pub use factorial::factorial;
pub use log::{ln, log};
pub use power::power;
pub use roots::sqrt;
pub use trig::{cos, exp, sin, tan};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::CallEnv},
        value::number::Number,
    },
    primitives::{
        self,
        factorial::{factorial_argument, factorial_u64},
        power::power_bounded,
        roots::real_sqrt,
        trig::TrigFunction,
    },
};

/// Builtins called directly, outside an expression, have no source offset.
const NO_POSITION: usize = 0;

fn mismatch(function: &str, expected: &str, found: usize) -> EvalError {
    EvalError::ArgumentCountMismatch { function: function.to_string(),
                                       expected: expected.to_string(),
                                       found,
                                       position: NO_POSITION }
}

fn single<'a>(function: &str, args: &'a [Number]) -> EvalResult<&'a Number> {
    match args {
        [x] => Ok(x),
        _ => Err(mismatch(function, "1", args.len())),
    }
}

fn pair<'a>(function: &str, args: &'a [Number]) -> EvalResult<(&'a Number, &'a Number)> {
    match args {
        [x, y] => Ok((x, y)),
        _ => Err(mismatch(function, "2", args.len())),
    }
}

/// Generates a trigonometric builtin taking one angle in degrees.
///
/// With a cache the result is memoized per function and angle; without one
/// the function is applied directly. Both paths give the same value.
///
/// # Example
/// ```
/// use safecalc::{
///     Number,
///     interpreter::evaluator::{core::EvalConfig, function::{builtin::sin, core::CallEnv}},
/// };
///
/// let config = EvalConfig::default();
/// let env = CallEnv { config: &config, cache: None };
///
/// assert_eq!(sin(&[Number::from(90)], &env).unwrap(), Number::from(1.0));
/// ```
macro_rules! trig_builtin {
    ($fname:ident, $function:expr) => {
        /// Builtin wrapper over the matching trigonometric function in degrees.
        pub fn $fname(args: &[Number], env: &CallEnv<'_>) -> EvalResult<Number> {
            let degrees = single(stringify!($fname), args)?.to_f64()?;
            let value = match env.cache {
                Some(cache) => cache.lock().trig($function, degrees)?,
                None => $function.apply_degrees(degrees)?,
            };
            Ok(Number::Real(value))
        }
    };
}

trig_builtin!(sin, TrigFunction::Sin);
trig_builtin!(cos, TrigFunction::Cos);
trig_builtin!(tan, TrigFunction::Tan);

/// Square root, memoized when the evaluator has a cache.
///
/// # Errors
/// Negative arguments.
pub fn sqrt(args: &[Number], env: &CallEnv<'_>) -> EvalResult<Number> {
    let value = single("sqrt", args)?.to_f64()?;
    let root = match env.cache {
        Some(cache) => cache.lock().sqrt(value)?,
        None => real_sqrt(value)?,
    };
    Ok(Number::Real(root))
}

/// Exact factorial, bounded by the evaluator's factorial limit.
///
/// The argument is validated before the cache is consulted, so rejected
/// arguments never occupy a cache slot.
///
/// # Example
/// ```
/// use safecalc::{
///     Number,
///     interpreter::evaluator::{core::EvalConfig, function::{builtin::factorial, core::CallEnv}},
/// };
///
/// let config = EvalConfig { factorial_limit: 10, ..EvalConfig::default() };
/// let env = CallEnv { config: &config, cache: None };
///
/// assert_eq!(factorial(&[Number::from(5)], &env).unwrap(), Number::from(120));
/// assert!(factorial(&[Number::from(11)], &env).is_err());
/// ```
pub fn factorial(args: &[Number], env: &CallEnv<'_>) -> EvalResult<Number> {
    let n = factorial_argument(single("factorial", args)?, env.config.factorial_limit)?;
    let value = match env.cache {
        Some(cache) => cache.lock().factorial(n),
        None => factorial_u64(n),
    };
    Ok(Number::Integer(value))
}

/// `log(x)` in base 10 or `log(x, base)`.
pub fn log(args: &[Number], _: &CallEnv<'_>) -> EvalResult<Number> {
    match args {
        [x] => primitives::log(x, None),
        [x, base] => primitives::log(x, Some(base)),
        _ => Err(mismatch("log", "1 or 2", args.len())),
    }
}

/// Natural logarithm.
pub fn ln(args: &[Number], _: &CallEnv<'_>) -> EvalResult<Number> {
    primitives::ln(single("ln", args)?)
}

/// `e` raised to the argument.
pub fn exp(args: &[Number], _: &CallEnv<'_>) -> EvalResult<Number> {
    primitives::exp(single("exp", args)?)
}

/// Absolute value.
pub fn abs(args: &[Number], _: &CallEnv<'_>) -> EvalResult<Number> {
    primitives::absolute(single("abs", args)?)
}

/// `pow(base, exponent)`, identical to `base ** exponent`.
pub fn pow(args: &[Number], env: &CallEnv<'_>) -> EvalResult<Number> {
    let (base, exponent) = pair("pow", args)?;
    power_bounded(base, exponent, env.config.max_integer_bits)
}

/// `mod(a, b)`, the floored remainder.
pub fn modulus(args: &[Number], _: &CallEnv<'_>) -> EvalResult<Number> {
    let (a, b) = pair("mod", args)?;
    primitives::modulus(a, b)
}

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    primitives::{
        arithmetic::{add, multiply},
        power::power,
    },
};

/// Longest sequence the generators will produce.
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

fn check_length(n: usize) -> EvalResult<()> {
    if n > MAX_SEQUENCE_LENGTH {
        return Err(EvalError::domain(format!("sequence length {n} exceeds the limit of {MAX_SEQUENCE_LENGTH}")));
    }
    Ok(())
}

/// Returns the first `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`.
///
/// # Errors
/// Fails when `n` exceeds [`MAX_SEQUENCE_LENGTH`].
///
/// # Example
/// ```
/// use num_bigint::BigInt;
/// use safecalc::primitives::sequence::fibonacci;
///
/// let seq = fibonacci(7).unwrap();
/// let expected: Vec<BigInt> = [0, 1, 1, 2, 3, 5, 8].into_iter().map(BigInt::from).collect();
/// assert_eq!(seq, expected);
/// assert!(fibonacci(0).unwrap().is_empty());
/// ```
pub fn fibonacci(n: usize) -> EvalResult<Vec<BigInt>> {
    check_length(n)?;
    let mut seq = Vec::with_capacity(n);
    let (mut a, mut b) = (BigInt::zero(), BigInt::one());
    for _ in 0..n {
        let next = &a + &b;
        seq.push(std::mem::replace(&mut a, std::mem::replace(&mut b, next)));
    }
    Ok(seq)
}

/// Returns `a1, a1 + d, a1 + 2d, ...` with `n` terms.
///
/// # Errors
/// Fails on overflow or when `n` exceeds [`MAX_SEQUENCE_LENGTH`].
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::sequence::arithmetic_sequence};
///
/// let seq = arithmetic_sequence(&1.into(), &3.into(), 4).unwrap();
/// assert_eq!(seq, vec![1.into(), 4.into(), 7.into(), Number::from(10)]);
/// ```
pub fn arithmetic_sequence(a1: &Number, d: &Number, n: usize) -> EvalResult<Vec<Number>> {
    indexed_terms(n, |i| add(a1, &multiply(&i, d)?))
}

/// Returns `a1, a1 * r, a1 * r^2, ...` with `n` terms.
///
/// # Errors
/// Fails on overflow or when `n` exceeds [`MAX_SEQUENCE_LENGTH`].
///
/// # Example
/// ```
/// use safecalc::{Number, primitives::sequence::geometric_sequence};
///
/// let seq = geometric_sequence(&3.into(), &2.into(), 4).unwrap();
/// assert_eq!(seq, vec![3.into(), 6.into(), 12.into(), Number::from(24)]);
/// ```
pub fn geometric_sequence(a1: &Number, r: &Number, n: usize) -> EvalResult<Vec<Number>> {
    indexed_terms(n, |i| multiply(a1, &power(r, &i)?))
}

/// Collects `n` terms, computing term `i` from its index alone so real
/// inputs do not accumulate rounding error.
fn indexed_terms(n: usize, term: impl Fn(Number) -> EvalResult<Number>) -> EvalResult<Vec<Number>> {
    check_length(n)?;
    (0..n).map(|i| term(Number::Integer(BigInt::from(i)))).collect()
}

/// Tests primality by trial division over `6k ± 1`.
///
/// # Example
/// ```
/// use safecalc::primitives::sequence::is_prime;
///
/// assert!(is_prime(97));
/// assert!(!is_prime(91));
/// assert!(!is_prime(1));
/// ```
#[must_use]
pub const fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the first `n` primes.
///
/// # Errors
/// Fails when `n` exceeds [`MAX_SEQUENCE_LENGTH`].
///
/// # Example
/// ```
/// use safecalc::primitives::sequence::prime_sequence;
///
/// assert_eq!(prime_sequence(6).unwrap(), vec![2, 3, 5, 7, 11, 13]);
/// ```
pub fn prime_sequence(n: usize) -> EvalResult<Vec<u64>> {
    check_length(n)?;
    let mut seq = Vec::with_capacity(n);
    if n == 0 {
        return Ok(seq);
    }
    seq.push(2);
    let mut candidate = 3;
    while seq.len() < n {
        if is_prime(candidate) {
            seq.push(candidate);
        }
        candidate += 2;
    }
    Ok(seq)
}

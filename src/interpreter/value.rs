/// The numeric value produced by every evaluation.
///
/// Integers are kept exact with arbitrary precision; anything that needs a
/// fractional or irrational result becomes a 64-bit real.
pub mod number;

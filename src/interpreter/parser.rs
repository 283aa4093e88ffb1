/// Parser entry points and shared parser state.
///
/// Defines the result alias, the nesting guard and the top-level `parse`
/// functions that turn source text into an [`Expr`](crate::ast::Expr).
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative levels of the
/// grammar.
pub mod binary;

/// Unary, power and primary expression parsing.
///
/// Handles prefix signs, right-associative exponentiation, literals, names,
/// calls and parenthesized groups.
pub mod unary;

/// Parser helper functions.
///
/// Provides reusable routines such as comma-separated argument lists.
pub mod utils;

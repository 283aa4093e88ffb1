//! # safecalc
//!
//! safecalc is a safe arithmetic expression evaluator written in Rust.
//! It parses an expression into a syntax tree and evaluates it against fixed
//! allow-lists of operators, functions and named constants. Anything outside
//! those lists is rejected, so untrusted text can be evaluated without ever
//! executing anything but arithmetic.
//!
//! ```
//! use safecalc::{Context, Number, evaluate, error::ErrorKind};
//!
//! let context = Context::new();
//! assert_eq!(evaluate("2^8 + factorial(5) - sqrt(144)", &context).unwrap(), Number::from(364.0));
//! assert_eq!(evaluate("__import__('os')", &context).unwrap_err().kind(), ErrorKind::Syntax);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::LazyLock;

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator enums that represent
/// an expression as a tree. The AST is built by the parser and walked by the
/// evaluator.
///
/// # Responsibilities
/// - Defines one node kind per accepted construct.
/// - Attaches the byte offset of each node for error reporting.
pub mod ast;
/// Memoization of expensive pure functions.
///
/// Bounded least-recently-used maps for square roots, factorials and
/// trigonometry, with hit and miss counters.
pub mod cache;
/// Read-only tables of named physical and mathematical constants.
pub mod constants;
/// Provides the error types for parsing and evaluation.
///
/// This module defines every error that can be raised while lexing, parsing or
/// evaluating an expression, together with a coarse [`ErrorKind`] taxonomy.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches byte offsets and detailed messages for context.
/// - Implements `Display` and `std::error::Error`.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Defines the numeric value type and the evaluation context.
pub mod interpreter;
/// Checked numeric operations shared by the evaluator and the binary.
pub mod primitives;
/// An evaluator bundled with its context behind a lock.
pub mod session;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `BigInt`, `u64` and `f64` without silent data loss.
/// - Turn non-finite floating results into domain errors.
pub mod util;

pub use error::{ErrorKind, EvalError, ParseError};
pub use interpreter::{
    context::Context,
    evaluator::core::{EvalConfig, EvalResult, Evaluator},
    parser::core::parse,
    value::number::Number,
};
pub use session::{Session, SessionSnapshot};

static STANDARD_EVALUATOR: LazyLock<Evaluator> = LazyLock::new(Evaluator::new);

/// Evaluates `text` with the standard evaluator.
///
/// The standard evaluator allows every built-in operator, function and
/// constant, has the default limits and no cache. `context` supplies the
/// values of `ans` and `mem` and is not modified.
///
/// # Errors
/// Any [`EvalError`].
///
/// # Examples
/// ```
/// use safecalc::{Context, Number, evaluate};
///
/// let mut context = Context::new();
/// let value = evaluate("log(100, 10)", &context).unwrap();
/// assert_eq!(value, Number::from(2.0));
///
/// context.record(value);
/// assert_eq!(evaluate("ans", &context).unwrap(), Number::from(2.0));
///
/// // Unknown names are rejected.
/// assert!(evaluate("x + 1", &context).is_err());
/// ```
pub fn evaluate(text: &str, context: &Context) -> EvalResult<Number> {
    STANDARD_EVALUATOR.evaluate(text, context)
}

/// Errors raised while turning source text into an expression tree.
///
/// Covers unknown characters, misplaced tokens, unbalanced parentheses,
/// out-of-range literals and inputs that nest deeper than allowed.
pub mod parse_error;
/// Errors raised while evaluating an expression.
///
/// Wraps [`ParseError`] for the syntax stage and adds the allow-list,
/// domain and resource failures of the evaluator.
pub mod eval_error;

pub use eval_error::{ErrorKind, EvalError};
pub use parse_error::ParseError;

/// Core evaluation logic.
///
/// Defines the [`Evaluator`](core::Evaluator), its configuration and the tree
/// walk that dispatches every node to the allow-list tables.
pub mod core;

/// Operator evaluation.
///
/// Holds the operator table and applies unary and binary operators.
pub mod operators;

/// Function call evaluation.
///
/// Holds the table of allow-listed functions, their arities and their
/// implementations.
pub mod function;

/// Named constant resolution.
///
/// Holds the constant table, including the context-backed names `ans` and
/// `mem`.
pub mod constants;

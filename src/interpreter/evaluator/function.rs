/// The function table and call evaluation.
///
/// Declares the allow-listed functions with their arities and dispatches
/// calls to them.
pub mod core;
/// Built-in function implementations.
///
/// Adapts the numeric primitives to the calling convention of the function
/// table and routes memoizable functions through the evaluator's cache.
pub mod builtin;

/// The evaluator module walks syntax trees and computes results.
///
/// Every node is resolved through one of three allow-list tables (operators,
/// functions, constants); anything the tables do not contain is rejected.
///
/// # Responsibilities
/// - Evaluates AST nodes against a [`Context`](context::Context).
/// - Enforces nesting limits during the walk.
/// - Reports unknown names, unsupported operators and domain errors.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw text and produces tokens paired with their byte
/// offsets: numbers, names, operators, parentheses and commas. Any other
/// character is a syntax error.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent over the token stream that accepts only
/// arithmetic expressions and function calls, and bounds nesting depth.
pub mod parser;
/// The value module defines the numbers expressions evaluate to.
pub mod value;
/// The context read by `ans` and `mem`.
pub mod context;

use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_additive,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default limit on how deeply parentheses, signs, exponents and call
/// arguments may nest.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Tracks how deeply the parser has recursed.
///
/// Every grammar rule that recurses into a nested sub-expression calls
/// [`Depth::enter`] first, so pathological inputs such as ten thousand opening
/// parentheses are rejected before they can exhaust the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    current: usize,
    limit:   usize,
}

impl Depth {
    /// Starts a fresh depth counter with the given limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { current: 0,
               limit }
    }

    /// Returns the counter one level deeper.
    ///
    /// # Errors
    /// Returns `NestingTooDeep` when the limit has already been reached.
    pub const fn enter(self, position: usize) -> ParseResult<Self> {
        if self.current >= self.limit {
            return Err(ParseError::NestingTooDeep { limit: self.limit,
                                                    position });
        }
        Ok(Self { current: self.current + 1,
                  limit:   self.limit, })
    }
}

/// Parses a complete expression with the default nesting limit.
///
/// # Errors
/// Returns a `ParseError` for invalid characters, grammar violations,
/// trailing input, empty input or excessive nesting.
///
/// # Example
/// ```
/// use safecalc::{ast::Expr, interpreter::parser::core::parse};
///
/// let expr = parse("1 + 2 * 3").unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { .. }));
///
/// assert!(parse("1 +").is_err());
/// assert!(parse("x = 1").is_err());
/// assert!(parse("").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    parse_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parses a complete expression, rejecting nesting deeper than `max_depth`.
///
/// The whole input must form one expression; anything left after it is a
/// `TrailingInput` error.
pub fn parse_with_limit(source: &str, max_depth: usize) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, Depth::new(max_depth))?;

    if let Some((token, position)) = iter.next() {
        return Err(ParseError::TrailingInput { token:    token.to_string(),
                                               position: *position, });
    }

    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing and the target of every
/// nested sub-expression (parentheses and call arguments). It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
/// - `depth`: Nesting depth of the caller.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: Depth) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let position = tokens.peek().map_or(0, |(_, position)| *position);
    parse_additive(tokens, depth.enter(position)?)
}

use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{Depth, ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
        value::number::Number,
    },
};

/// Parses a unary expression.
///
/// Supports the prefix signs `+` and `-`. Signs are right-associative and bind
/// more loosely than exponentiation, so `-2 ** 2` parses as `-(2 ** 2)`.
///
/// If no sign is present, the function delegates to [`parse_power`].
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Current nesting depth; each sign nests one level.
///
/// # Returns
/// An [`Expr::UnaryOp`] or the result of [`parse_power`].
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: Depth) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        _ => return parse_power(tokens, depth),
    };

    let Some((_, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput);
    };
    let expr = parse_unary(tokens, depth.enter(*position)?)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       position: *position })
}

/// Parses exponentiation.
///
/// The exponent is itself a unary expression, which makes the operator
/// right-associative (`2 ** 3 ** 2` is `2 ** 9`) and allows signed exponents
/// such as `2 ** -1`. `^` is accepted as an alias of `**`.
///
/// Grammar: `power := primary (("**" | "^") unary)?`
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `depth`: Current nesting depth; the exponent nests one level.
pub(crate) fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: Depth) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens, depth)?;

    if let Some((Token::DoubleStar | Token::Caret, position)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, depth.enter(*position)?)?;
        return Ok(Expr::BinaryOp { op:       BinaryOperator::Pow,
                                   left:     Box::new(base),
                                   right:    Box::new(exponent),
                                   position: *position, });
    }

    Ok(base)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - integer and real literals
/// - names of constants
/// - function calls
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | NAME
///              | NAME "(" (expression ("," expression)*)? ")"
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: Depth) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), position)) => {
            Ok(Expr::Literal { value:    Number::Integer(n.clone()),
                               position: *position, })
        },
        Some((Token::Real(r), position)) => Ok(Expr::Literal { value:    Number::Real(*r),
                                                               position: *position, }),
        Some((Token::Identifier(name), position)) => {
            parse_name_or_call(tokens, name, *position, depth)
        },
        Some((Token::LParen, position)) => parse_grouping(tokens, *position, depth),
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// Parses the remainder of a name: either a bare constant reference or, when
/// followed by `(`, a function call with its argument list.
fn parse_name_or_call<'a, I>(tokens: &mut Peekable<I>,
                             name: &str,
                             position: usize,
                             depth: Depth)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments =
            parse_comma_separated(tokens, |t| parse_expression(t, depth), &Token::RParen)?;
        return Ok(Expr::Call { name: name.to_string(),
                               arguments,
                               position });
    }

    Ok(Expr::Name { name: name.to_string(),
                    position })
}

/// Parses a parenthesized expression after its opening `(`.
///
/// # Errors
/// Returns `ExpectedClosingParen` pointing at the opening parenthesis when the
/// group is not closed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, open: usize, depth: Depth) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, depth)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { position: open }),
    }
}

use logos::Logos;
use num_bigint::BigInt;

use crate::error::ParseError;

/// Failure raised by a token callback.
///
/// Logos reports characters that start no token with the default variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexError {
    /// No token matches at this position.
    #[default]
    UnexpectedCharacter,
    /// A real literal overflows to infinity.
    LiteralOutOfRange,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines every token the expression grammar accepts; anything
/// else is rejected before parsing starts.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`. Integers have no size limit.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<BigInt>().ok())]
    Integer(BigInt),
    /// Names of constants and functions, such as `pi` or `sqrt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `^`, an alias of `**`.
    #[token("^")]
    Caret,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

fn parse_real(lex: &logos::Lexer<'_, Token>) -> Result<f64, LexError> {
    let value = lex.slice()
                   .parse::<f64>()
                   .map_err(|_| LexError::UnexpectedCharacter)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LexError::LiteralOutOfRange)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Identifier(name) => f.write_str(name),
            Self::DoubleStar => f.write_str("**"),
            Self::Caret => f.write_str("^"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// Splits source text into tokens paired with their byte offsets.
///
/// # Errors
/// - `UnexpectedCharacter` for text that starts no token, such as quotes,
///   brackets, `=` or `%`.
/// - `LiteralOutOfRange` for real literals that overflow, such as `1e999`.
///
/// # Example
/// ```
/// use safecalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ^ x").unwrap();
/// assert_eq!(tokens[1], (Token::Caret, 2));
/// assert_eq!(tokens[2], (Token::Identifier("x".to_string()), 4));
///
/// assert!(tokenize("__import__('os')").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(LexError::LiteralOutOfRange) => {
                return Err(ParseError::LiteralOutOfRange { literal: lexer.slice().to_string(),
                                                           position });
            },
            Err(LexError::UnexpectedCharacter) => {
                return Err(ParseError::UnexpectedCharacter { character: lexer.slice()
                                                                             .to_string(),
                                                             position });
            },
        }
    }

    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while lexing and parsing.
///
/// Positions are byte offsets into the source text, starting at zero.
pub enum ParseError {
    /// A character that does not start any token.
    UnexpectedCharacter {
        /// The offending text.
        character: String,
        /// Byte offset of the character.
        position:  usize,
    },
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken {
        /// Textual form of the token.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// The input ended in the middle of an expression.
    UnexpectedEndOfInput,
    /// A `(` was never closed.
    ExpectedClosingParen {
        /// Byte offset of the opening parenthesis.
        position: usize,
    },
    /// A complete expression was followed by more input.
    TrailingInput {
        /// Textual form of the first extra token.
        token:    String,
        /// Byte offset of the first extra token.
        position: usize,
    },
    /// A numeric literal does not fit a finite real number.
    LiteralOutOfRange {
        /// The literal as written.
        literal:  String,
        /// Byte offset of the literal.
        position: usize,
    },
    /// Parentheses, signs or exponents nest deeper than the configured limit.
    NestingTooDeep {
        /// The configured nesting limit.
        limit:    usize,
        /// Byte offset where the limit was crossed.
        position: usize,
    },
    /// The source text is longer than the configured limit.
    InputTooLong {
        /// Length of the input in bytes.
        length: usize,
        /// The configured limit in bytes.
        limit:  usize,
    },
    /// The input contained no tokens at all.
    EmptyExpression,
}

impl ParseError {
    /// Returns `true` for errors caused by input size rather than bad syntax.
    ///
    /// # Example
    /// ```
    /// use safecalc::error::ParseError;
    ///
    /// assert!(ParseError::NestingTooDeep { limit: 3, position: 4 }.is_resource_limit());
    /// assert!(!ParseError::EmptyExpression.is_resource_limit());
    /// ```
    #[must_use]
    pub const fn is_resource_limit(&self) -> bool {
        matches!(self, Self::NestingTooDeep { .. } | Self::InputTooLong { .. })
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, position } => {
                write!(f, "Error at offset {position}: Unexpected character '{character}'.")
            },
            Self::UnexpectedToken { token, position } => {
                write!(f, "Error at offset {position}: Unexpected token '{token}'.")
            },
            Self::UnexpectedEndOfInput => write!(f, "Error: Unexpected end of input."),
            Self::ExpectedClosingParen { position } => write!(f,
                                                              "Error at offset {position}: Expected ')' to close this parenthesis."),
            Self::TrailingInput { token, position } => write!(f,
                                                              "Error at offset {position}: Unexpected '{token}' after the end of the expression."),
            Self::LiteralOutOfRange { literal, position } => write!(f,
                                                                    "Error at offset {position}: Literal '{literal}' is out of range."),
            Self::NestingTooDeep { limit, position } => write!(f,
                                                               "Error at offset {position}: Expression nests deeper than {limit} levels."),
            Self::InputTooLong { length, limit } => write!(f,
                                                           "Error: Expression is {length} bytes long; the limit is {limit}."),
            Self::EmptyExpression => write!(f, "Error: Empty expression."),
        }
    }
}

impl std::error::Error for ParseError {}

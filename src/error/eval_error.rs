use crate::error::ParseError;

/// Coarse classification of an [`EvalError`].
///
/// Callers that only need to branch on the failure category (for instance to
/// choose an exit code or a retry policy) match on this instead of on the full
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text is not a well-formed expression.
    Syntax,
    /// A name is not in the constant table.
    UnknownIdentifier,
    /// A call names a function that is not in the function table.
    UnknownFunction,
    /// An operator is missing from the operator table.
    UnsupportedOperator,
    /// A function received the wrong number of arguments.
    ArgumentCountMismatch,
    /// A mathematically invalid or unrepresentable operation.
    Domain,
    /// The expression exceeds a resource limit.
    TooComplex,
    /// A tree node the evaluator does not know how to handle.
    UnsupportedConstruct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum EvalError {
    /// The text failed to parse.
    Syntax(ParseError),
    /// A name was used that is not an allowed constant.
    UnknownIdentifier {
        /// The name as written.
        name:     String,
        /// Byte offset of the name.
        position: usize,
    },
    /// A call named a function outside the allow-list.
    UnknownFunction {
        /// The function name as written.
        name:     String,
        /// Byte offset of the call.
        position: usize,
    },
    /// The operator is not present in the active operator table.
    UnsupportedOperator {
        /// Symbol of the operator.
        operator: String,
        /// Byte offset of the operator.
        position: usize,
    },
    /// A function was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The function name.
        function: String,
        /// The accepted argument counts, e.g. `1 or 2`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// Byte offset of the call.
        position: usize,
    },
    /// A mathematically invalid operation, such as division by zero.
    Domain {
        /// Human readable description of the failure.
        message: String,
    },
    /// The expression exceeds a size or depth limit.
    TooComplex {
        /// Which limit was exceeded.
        details: String,
    },
    /// The evaluator met a construct it has no rule for.
    UnsupportedConstruct {
        /// Description of the construct.
        details: String,
    },
}

impl EvalError {
    /// Builds a [`EvalError::Domain`] error from a message.
    ///
    /// # Example
    /// ```
    /// use safecalc::error::{ErrorKind, EvalError};
    ///
    /// let err = EvalError::domain("division by zero");
    /// assert_eq!(err.kind(), ErrorKind::Domain);
    /// assert_eq!(err.to_string(), "Domain error: division by zero.");
    /// ```
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain { message: message.into() }
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::UnknownIdentifier { .. } => ErrorKind::UnknownIdentifier,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::UnsupportedOperator { .. } => ErrorKind::UnsupportedOperator,
            Self::ArgumentCountMismatch { .. } => ErrorKind::ArgumentCountMismatch,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::TooComplex { .. } => ErrorKind::TooComplex,
            Self::UnsupportedConstruct { .. } => ErrorKind::UnsupportedConstruct,
        }
    }
}

/// Size and depth violations found while parsing surface as
/// [`EvalError::TooComplex`]; every other parse failure is a syntax error.
impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        if err.is_resource_limit() {
            Self::TooComplex { details: err.to_string() }
        } else {
            Self::Syntax(err)
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "Syntax error. {err}"),
            Self::UnknownIdentifier { name, position } => {
                write!(f, "Error at offset {position}: Unknown identifier '{name}'.")
            },
            Self::UnknownFunction { name, position } => {
                write!(f, "Error at offset {position}: Unknown function '{name}'.")
            },
            Self::UnsupportedOperator { operator, position } => write!(f,
                                                                       "Error at offset {position}: Operator '{operator}' is not allowed."),
            Self::ArgumentCountMismatch { function,
                                          expected,
                                          found,
                                          position, } => write!(f,
                                                                "Error at offset {position}: '{function}' takes {expected} argument(s), but {found} were given."),
            Self::Domain { message } => write!(f, "Domain error: {message}."),
            Self::TooComplex { details } => write!(f, "Expression too complex. {details}"),
            Self::UnsupportedConstruct { details } => {
                write!(f, "Unsupported expression type: {details}.")
            },
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

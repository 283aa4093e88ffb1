use crate::interpreter::value::number::Number;

/// Binary arithmetic operators.
///
/// The discriminants index the evaluator's operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**` (also written `^`)
    Pow,
}

impl BinaryOperator {
    /// Every binary operator, in table order.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Returns the canonical source symbol of the operator.
    ///
    /// # Example
    /// ```
    /// use safecalc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Pow.symbol(), "**");
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Unary `+`.
    Plus,
    /// Unary `-`.
    Negate,
}

impl UnaryOperator {
    /// Every unary operator, in table order.
    pub const ALL: [Self; 2] = [Self::Plus, Self::Negate];

    /// Returns the source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Negate => "-",
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// The tree is built once by the parser, owned by a single evaluation and
/// never mutated. Every variant records the byte offset of the source text it
/// came from so that errors can point back at it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The constant value.
        value:    Number,
        /// Byte offset in the source text.
        position: usize,
    },
    /// A reference to a named constant such as `pi` or `ans`.
    Name {
        /// The identifier.
        name:     String,
        /// Byte offset in the source text.
        position: usize,
    },
    /// A prefix sign applied to an operand.
    UnaryOp {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        expr:     Box<Self>,
        /// Byte offset of the operator.
        position: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// The operator.
        op:       BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator.
        position: usize,
    },
    /// A call to an allow-listed function.
    Call {
        /// Function name.
        name:      String,
        /// Argument expressions, in source order.
        arguments: Vec<Self>,
        /// Byte offset of the function name.
        position:  usize,
    },
}

impl Expr {
    /// Returns the byte offset this node was parsed from.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Name { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }
}

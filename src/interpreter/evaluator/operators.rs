use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::EvalError,
    interpreter::{
        context::Context,
        evaluator::core::{EvalConfig, EvalResult, Evaluator},
        value::number::Number,
    },
    primitives::{arithmetic, power::power_bounded},
};

/// Implementation of a binary operator.
pub type BinaryFn = fn(&Number, &Number, &EvalConfig) -> EvalResult<Number>;
/// Implementation of a unary operator.
pub type UnaryFn = fn(&Number) -> EvalResult<Number>;

fn add(a: &Number, b: &Number, _: &EvalConfig) -> EvalResult<Number> {
    arithmetic::add(a, b)
}

fn sub(a: &Number, b: &Number, _: &EvalConfig) -> EvalResult<Number> {
    arithmetic::subtract(a, b)
}

fn mul(a: &Number, b: &Number, _: &EvalConfig) -> EvalResult<Number> {
    arithmetic::multiply(a, b)
}

fn div(a: &Number, b: &Number, _: &EvalConfig) -> EvalResult<Number> {
    arithmetic::divide(a, b)
}

fn pow(a: &Number, b: &Number, config: &EvalConfig) -> EvalResult<Number> {
    power_bounded(a, b, config.max_integer_bits)
}

/// The allow-list of operators, indexed by operator kind.
///
/// [`OperatorTable::standard`] allows every operator the grammar can produce.
/// Restricted tables are derived from it by removing entries; an expression
/// that uses a removed operator fails with `UnsupportedOperator` before any
/// of its operands are evaluated.
///
/// # Example
/// ```
/// use safecalc::{
///     Context, Evaluator,
///     ast::BinaryOperator,
///     error::ErrorKind,
///     interpreter::evaluator::operators::OperatorTable,
/// };
///
/// let table = OperatorTable::standard().without_binary(BinaryOperator::Pow);
/// let evaluator = Evaluator::new().with_operators(table);
///
/// let err = evaluator.evaluate("2 ** 3", &Context::new()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnsupportedOperator);
/// assert!(evaluator.evaluate("2 * 3", &Context::new()).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OperatorTable {
    binary: [Option<BinaryFn>; BinaryOperator::ALL.len()],
    unary:  [Option<UnaryFn>; UnaryOperator::ALL.len()],
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperatorTable {
    /// Every operator enabled.
    #[must_use]
    pub fn standard() -> Self {
        Self { binary: [Some(add as BinaryFn),
                        Some(sub as BinaryFn),
                        Some(mul as BinaryFn),
                        Some(div as BinaryFn),
                        Some(pow as BinaryFn)],
               unary:  [Some(arithmetic::identity as UnaryFn),
                        Some(arithmetic::negate as UnaryFn)], }
    }

    /// No operator enabled.
    #[must_use]
    pub const fn empty() -> Self {
        Self { binary: [None; BinaryOperator::ALL.len()],
               unary:  [None; UnaryOperator::ALL.len()], }
    }

    /// Returns a copy of the table without `op`.
    #[must_use]
    pub fn without_binary(mut self, op: BinaryOperator) -> Self {
        self.binary[op as usize] = None;
        self
    }

    /// Returns a copy of the table without `op`.
    #[must_use]
    pub fn without_unary(mut self, op: UnaryOperator) -> Self {
        self.unary[op as usize] = None;
        self
    }

    /// Returns a copy of the table with `op` implemented by `func`.
    #[must_use]
    pub fn with_binary(mut self, op: BinaryOperator, func: BinaryFn) -> Self {
        self.binary[op as usize] = Some(func);
        self
    }

    /// Returns a copy of the table with `op` implemented by `func`.
    #[must_use]
    pub fn with_unary(mut self, op: UnaryOperator, func: UnaryFn) -> Self {
        self.unary[op as usize] = Some(func);
        self
    }

    /// Looks up a binary operator.
    #[must_use]
    pub fn binary(&self, op: BinaryOperator) -> Option<BinaryFn> {
        self.binary[op as usize]
    }

    /// Looks up a unary operator.
    #[must_use]
    pub fn unary(&self, op: UnaryOperator) -> Option<UnaryFn> {
        self.unary[op as usize]
    }
}

impl Evaluator {
    /// Evaluates a unary operation.
    ///
    /// The operator is looked up before the operand is evaluated.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `expr`: The operand.
    /// - `position`: Offset of the operator, for error reporting.
    /// - `depth`: Nesting depth of the operation.
    pub(crate) fn eval_unary_op(&self,
                                op: UnaryOperator,
                                expr: &Expr,
                                position: usize,
                                context: &Context,
                                depth: usize)
                                -> EvalResult<Number> {
        let func = self.operators()
                       .unary(op)
                       .ok_or_else(|| EvalError::UnsupportedOperator { operator: op.to_string(),
                                                                       position })?;
        let value = self.eval_at(expr, context, depth + 1)?;
        func(&value)
    }

    /// Evaluates a binary operation.
    ///
    /// Chains of left-associative operations such as `1 + 2 + 3 + ...` are
    /// walked iteratively along their left spine, so long flat expressions do
    /// not deepen the recursion. Every operator on the spine is looked up
    /// before any operand is evaluated; operands are then evaluated left to
    /// right and combined innermost first.
    pub(crate) fn eval_binary_op(&self,
                                 expr: &Expr,
                                 context: &Context,
                                 depth: usize)
                                 -> EvalResult<Number> {
        let mut spine = Vec::new();
        let mut node = expr;
        while let Expr::BinaryOp { op,
                                   left,
                                   right,
                                   position, } = node
        {
            let func = self.operators().binary(*op).ok_or_else(|| {
                                                       EvalError::UnsupportedOperator { operator: op.to_string(),
                                                                                        position: *position, }
                                                   })?;
            spine.push((func, &**right));
            node = &**left;
        }

        let mut result = self.eval_at(node, context, depth + 1)?;
        for (func, right) in spine.into_iter().rev() {
            let rhs = self.eval_at(right, context, depth + 1)?;
            result = func(&result, &rhs, self.config())?;
        }
        Ok(result)
    }
}

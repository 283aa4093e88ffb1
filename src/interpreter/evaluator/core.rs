use parking_lot::Mutex;

use crate::{
    ast::Expr,
    cache::{CacheStats, MathCache},
    error::{EvalError, ParseError},
    interpreter::{
        context::Context,
        evaluator::{
            constants::ConstantTable, function::core::FunctionTable, operators::OperatorTable,
        },
        parser::core::{DEFAULT_MAX_DEPTH, parse_with_limit},
        value::number::Number,
    },
    primitives::{factorial::DEFAULT_FACTORIAL_LIMIT, power::DEFAULT_MAX_INTEGER_BITS},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default limit on the length of an expression, in bytes.
pub const DEFAULT_MAX_SOURCE_LEN: usize = 10_000;

/// Resource limits applied to every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Deepest allowed nesting of parentheses, signs, exponents and call
    /// arguments.
    pub max_depth:        usize,
    /// Longest accepted expression, in bytes.
    pub max_source_len:   usize,
    /// Largest accepted factorial argument.
    pub factorial_limit:  u64,
    /// Largest exact integer power, in bits.
    pub max_integer_bits: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { max_depth:        DEFAULT_MAX_DEPTH,
               max_source_len:   DEFAULT_MAX_SOURCE_LEN,
               factorial_limit:  DEFAULT_FACTORIAL_LIMIT,
               max_integer_bits: DEFAULT_MAX_INTEGER_BITS, }
    }
}

/// Evaluates expressions against fixed allow-lists.
///
/// An evaluator owns an [`OperatorTable`], a [`FunctionTable`] and a
/// [`ConstantTable`]. Evaluation can only ever invoke entries of those three
/// tables; every other name, operator or construct is an error. The tables are
/// fixed at construction, so a single evaluator can be shared between threads.
///
/// ## Usage
///
/// ```
/// use safecalc::{Context, Evaluator, Number};
///
/// let evaluator = Evaluator::new();
/// let context = Context::new();
///
/// let result = evaluator.evaluate("2^8 + factorial(5) - sqrt(144)", &context).unwrap();
/// assert_eq!(result, Number::from(364.0));
/// ```
#[derive(Debug)]
pub struct Evaluator {
    operators: OperatorTable,
    functions: FunctionTable,
    constants: ConstantTable,
    config:    EvalConfig,
    cache:     Option<Mutex<MathCache>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the standard tables, default limits and no
    /// cache.
    #[must_use]
    pub fn new() -> Self {
        Self { operators: OperatorTable::standard(),
               functions: FunctionTable::standard(),
               constants: ConstantTable::standard(),
               config:    EvalConfig::default(),
               cache:     None, }
    }

    /// Replaces the resource limits.
    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the operator table.
    #[must_use]
    pub fn with_operators(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }

    /// Replaces the function table.
    #[must_use]
    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    /// Replaces the constant table.
    #[must_use]
    pub fn with_constants(mut self, constants: ConstantTable) -> Self {
        self.constants = constants;
        self
    }

    /// Adds the physical, astronomical and conversion constants to the
    /// constant table. Names already present keep their meaning.
    #[must_use]
    pub fn with_physical_constants(mut self) -> Self {
        self.constants = self.constants.with_physical_constants();
        self
    }

    /// Enables memoization of square roots, factorials and trigonometry with
    /// `capacity` entries per function.
    #[must_use]
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(Mutex::new(MathCache::new(capacity)));
        self
    }

    /// Returns the active resource limits.
    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Returns the operator table.
    #[must_use]
    pub const fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Returns the function table.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Returns the constant table.
    #[must_use]
    pub const fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub(crate) fn cache(&self) -> Option<&Mutex<MathCache>> {
        self.cache.as_ref()
    }

    /// Returns cache statistics, or `None` when caching is disabled.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.lock().stats())
    }

    /// Empties the cache, if there is one.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Parses `text` under this evaluator's limits.
    ///
    /// # Errors
    /// - `TooComplex` if the text is too long or nests too deeply.
    /// - `Syntax` for every other parse failure.
    pub fn parse(&self, text: &str) -> EvalResult<Expr> {
        if text.len() > self.config.max_source_len {
            return Err(ParseError::InputTooLong { length: text.len(),
                                                  limit:  self.config.max_source_len, }.into());
        }
        Ok(parse_with_limit(text, self.config.max_depth)?)
    }

    /// Parses and evaluates `text` against `context`.
    ///
    /// The context is only read; recording the result as `ans` is up to the
    /// caller (see [`Session`](crate::Session) for a wrapper that does it).
    ///
    /// # Errors
    /// Any [`EvalError`]. A failure never leaves partial state behind.
    ///
    /// # Example
    /// ```
    /// use safecalc::{Context, Evaluator, error::ErrorKind};
    ///
    /// let evaluator = Evaluator::new();
    /// let err = evaluator.evaluate("1 / 0", &Context::new()).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Domain);
    /// ```
    pub fn evaluate(&self, text: &str, context: &Context) -> EvalResult<Number> {
        let expr = self.parse(text)?;
        self.eval(&expr, context)
    }

    /// Evaluates an already parsed expression.
    ///
    /// # Errors
    /// Any [`EvalError`] other than `Syntax`.
    pub fn eval(&self, expr: &Expr, context: &Context) -> EvalResult<Number> {
        self.eval_at(expr, context, 0)
    }

    /// Evaluates an expression node at the given nesting depth.
    ///
    /// The walk dispatches on the node kind: literals evaluate to themselves,
    /// names go to the constant table, operators to the operator table and
    /// calls to the function table.
    pub(crate) fn eval_at(&self, expr: &Expr, context: &Context, depth: usize) -> EvalResult<Number> {
        if depth > self.config.max_depth {
            return Err(EvalError::TooComplex { details: format!("Expression nests deeper than {} levels.",
                                                                self.config.max_depth) });
        }

        match expr {
            Expr::Literal { value: Number::Real(r),
                            position, } if !r.is_finite() => {
                Err(EvalError::UnsupportedConstruct { details: format!("non-finite literal at offset {position}") })
            },
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Name { name, position } => self.eval_name(name, *position, context),
            Expr::UnaryOp { op,
                            expr,
                            position, } => self.eval_unary_op(*op, expr, *position, context, depth),
            Expr::BinaryOp { .. } => self.eval_binary_op(expr, context, depth),
            Expr::Call { name,
                         arguments,
                         position, } => self.eval_call(name, arguments, *position, context, depth),
        }
    }
}

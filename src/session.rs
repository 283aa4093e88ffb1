use parking_lot::Mutex;

use crate::interpreter::{
    context::Context,
    evaluator::core::{EvalResult, Evaluator},
    value::number::Number,
};

/// An evaluator paired with the context it records into.
///
/// Each operation takes the context lock for its whole duration, so an
/// evaluation (parse, evaluate, record `ans`) and a memory update never
/// interleave, even when the session is shared between threads.
///
/// # Example
/// ```
/// use safecalc::{Number, Session};
///
/// let session = Session::new();
/// assert_eq!(session.evaluate("6 * 7").unwrap(), Number::from(42));
/// assert_eq!(session.evaluate("ans + 1").unwrap(), Number::from(43));
///
/// assert!(session.evaluate("1 / 0").is_err());
/// assert_eq!(session.context().last_result, Some(Number::from(43)));
/// ```
#[derive(Debug, Default)]
pub struct Session {
    evaluator: Evaluator,
    context:   Mutex<Context>,
}

/// A point-in-time view of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// The value of `ans`, if anything has been evaluated.
    pub last_result: Option<Number>,
    /// The memory register.
    pub memory:      Number,
    /// Callable function names.
    pub functions:   Vec<&'static str>,
    /// Referenceable constant names, sorted.
    pub constants:   Vec<&'static str>,
}

impl Session {
    /// A session over the standard evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over a custom evaluator.
    #[must_use]
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self { evaluator,
               context: Mutex::new(Context::new()) }
    }

    /// Evaluates `text` and records the result as `ans` on success.
    ///
    /// # Errors
    /// Any evaluation error; the context is left untouched.
    pub fn evaluate(&self, text: &str) -> EvalResult<Number> {
        let mut context = self.context.lock();
        Self::evaluate_locked(&self.evaluator, &mut context, text)
    }

    /// Evaluates each expression in order, so `ans` in one expression refers
    /// to the result of the previous successful one.
    ///
    /// The context lock is held for the whole batch. A failing expression
    /// does not stop the batch; its error takes its slot in the output.
    ///
    /// # Example
    /// ```
    /// use safecalc::{Number, Session};
    ///
    /// let session = Session::new();
    /// let results = session.evaluate_batch(&["2 ** 10", "nope", "ans / 4"]);
    ///
    /// assert_eq!(results[0].as_ref().unwrap(), &Number::from(1024));
    /// assert!(results[1].is_err());
    /// assert_eq!(results[2].as_ref().unwrap(), &Number::from(256));
    /// ```
    pub fn evaluate_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<EvalResult<Number>> {
        let mut context = self.context.lock();
        texts.iter()
             .map(|text| Self::evaluate_locked(&self.evaluator, &mut context, text.as_ref()))
             .collect()
    }

    /// Evaluates `text` against the current context without recording `ans`.
    ///
    /// # Errors
    /// Any evaluation error.
    pub fn evaluate_unrecorded(&self, text: &str) -> EvalResult<Number> {
        self.evaluator.evaluate(text, &self.context.lock())
    }

    fn evaluate_locked(evaluator: &Evaluator,
                       context: &mut Context,
                       text: &str)
                       -> EvalResult<Number> {
        let value = evaluator.evaluate(text, context)?;
        context.record(value.clone());
        Ok(value)
    }

    /// Overwrites memory with `value`.
    pub fn store_memory(&self, value: Number) {
        self.context.lock().store_memory(value);
    }

    /// Adds `value` to memory.
    ///
    /// # Errors
    /// If the sum is not representable.
    pub fn add_to_memory(&self, value: &Number) -> EvalResult<()> {
        self.context.lock().add_to_memory(value)
    }

    /// Subtracts `value` from memory.
    ///
    /// # Errors
    /// If the difference is not representable.
    pub fn subtract_from_memory(&self, value: &Number) -> EvalResult<()> {
        self.context.lock().subtract_from_memory(value)
    }

    /// Resets memory to zero.
    pub fn clear_memory(&self) {
        self.context.lock().clear_memory();
    }

    /// A copy of the current context.
    #[must_use]
    pub fn context(&self) -> Context {
        self.context.lock().clone()
    }

    /// The evaluator this session uses.
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Captures the context and the names available to expressions.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let context = self.context();
        SessionSnapshot { last_result: context.last_result,
                          memory:      context.memory,
                          functions:   self.evaluator.functions().names(),
                          constants:   self.evaluator.constants().names(), }
    }
}

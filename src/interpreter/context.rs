use crate::{
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    primitives::{add, subtract},
};

/// Mutable state that expressions can read through `ans` and `mem`.
///
/// Evaluation only ever reads a context. Updating it after a successful
/// evaluation is the caller's job.
///
/// # Example
/// ```
/// use safecalc::{Context, Number};
///
/// let mut context = Context::new();
/// assert_eq!(context.answer(), Number::from(0));
///
/// context.record(Number::from(42));
/// context.add_to_memory(&Number::from(5)).unwrap();
/// assert_eq!(context.answer(), Number::from(42));
/// assert_eq!(context.memory, Number::from(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// The most recent successful result, if any.
    pub last_result: Option<Number>,
    /// The memory register.
    pub memory:      Number,
}

impl Context {
    /// An empty context: no previous result, memory zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `ans`: the last result, or zero when there is none.
    #[must_use]
    pub fn answer(&self) -> Number {
        self.last_result.clone().unwrap_or_default()
    }

    /// Records a successful result as `ans`.
    pub fn record(&mut self, value: Number) {
        self.last_result = Some(value);
    }

    /// Overwrites the memory register.
    pub fn store_memory(&mut self, value: Number) {
        self.memory = value;
    }

    /// Adds `value` to the memory register.
    ///
    /// # Errors
    /// If the sum is not representable; memory is left unchanged.
    pub fn add_to_memory(&mut self, value: &Number) -> EvalResult<()> {
        self.memory = add(&self.memory, value)?;
        Ok(())
    }

    /// Subtracts `value` from the memory register.
    ///
    /// # Errors
    /// If the difference is not representable; memory is left unchanged.
    pub fn subtract_from_memory(&mut self, value: &Number) -> EvalResult<()> {
        self.memory = subtract(&self.memory, value)?;
        Ok(())
    }

    /// Resets the memory register to zero.
    pub fn clear_memory(&mut self) {
        self.memory = Number::zero();
    }
}

use std::collections::BTreeMap;

use crate::{
    constants::all_constants,
    error::EvalError,
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Evaluator},
        value::number::Number,
    },
};

/// How a named constant gets its value.
#[derive(Debug, Clone)]
pub enum ConstantValue {
    /// A value fixed when the table is built.
    Fixed(Number),
    /// A value read from the context each time the name is evaluated.
    Accessor(fn(&Context) -> Number),
}

impl ConstantValue {
    /// Produces the value against `context`.
    #[must_use]
    pub fn resolve(&self, context: &Context) -> Number {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Accessor(read) => read(context),
        }
    }
}

fn answer(context: &Context) -> Number {
    context.answer()
}

fn memory(context: &Context) -> Number {
    context.memory.clone()
}

/// The allow-list of names an expression may reference.
///
/// # Example
/// ```
/// use safecalc::{Context, Evaluator, Number};
///
/// let evaluator = Evaluator::new().with_physical_constants();
/// let mut context = Context::new();
/// context.record(Number::from(3));
///
/// assert_eq!(evaluator.evaluate("ans * 2", &context).unwrap(), Number::from(6));
/// assert_eq!(evaluator.evaluate("c", &context).unwrap(), Number::from(299_792_458.0));
/// assert_eq!(evaluator.evaluate("e", &context).unwrap(), Number::from(std::f64::consts::E));
/// ```
#[derive(Debug, Clone)]
pub struct ConstantTable {
    entries: BTreeMap<&'static str, ConstantValue>,
}

impl Default for ConstantTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConstantTable {
    /// `pi`, `e`, `ans` and `mem`.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with("pi", ConstantValue::Fixed(Number::Real(std::f64::consts::PI)))
                     .with("e", ConstantValue::Fixed(Number::Real(std::f64::consts::E)))
                     .with("ans", ConstantValue::Accessor(answer))
                     .with("mem", ConstantValue::Accessor(memory))
    }

    /// A table without any names.
    #[must_use]
    pub const fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Adds every constant of the constants collaborator whose name is not
    /// already taken.
    #[must_use]
    pub fn with_physical_constants(mut self) -> Self {
        for (name, value) in all_constants() {
            self.entries
                .entry(name)
                .or_insert(ConstantValue::Fixed(Number::Real(value)));
        }
        self
    }

    /// Returns a copy of the table with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: ConstantValue) -> Self {
        self.entries.insert(name, value);
        self
    }

    /// Returns a copy of the table without `name`.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.entries.remove(name);
        self
    }

    /// Resolves `name` against `context`.
    #[must_use]
    pub fn resolve(&self, name: &str, context: &Context) -> Option<Number> {
        self.entries.get(name).map(|value| value.resolve(context))
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

impl Evaluator {
    /// Evaluates a name reference.
    ///
    /// # Returns
    /// The constant's value, read live from `context` for accessors, or
    /// `UnknownIdentifier` if the name is not in the constant table.
    pub(crate) fn eval_name(&self,
                            name: &str,
                            position: usize,
                            context: &Context)
                            -> EvalResult<Number> {
        self.constants()
            .resolve(name, context)
            .ok_or_else(|| EvalError::UnknownIdentifier { name: name.to_string(),
                                                          position })
    }
}

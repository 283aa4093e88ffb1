use parking_lot::Mutex;

use crate::{
    ast::Expr,
    cache::MathCache,
    error::EvalError,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalConfig, EvalResult, Evaluator},
            function::builtin,
        },
        value::number::Number,
    },
};

/// What a builtin can see besides its arguments.
#[derive(Debug, Clone, Copy)]
pub struct CallEnv<'a> {
    /// Limits of the calling evaluator.
    pub config: &'a EvalConfig,
    /// The evaluator's cache, when enabled.
    pub cache:  Option<&'a Mutex<MathCache>>,
}

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the call
/// environment. Evaluators check the arity first; a builtin called directly
/// with the wrong count reports `ArgumentCountMismatch` at offset 0.
pub type BuiltinFn = fn(&[Number], &CallEnv<'_>) -> EvalResult<Number>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any of these argument counts.
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use safecalc::interpreter::evaluator::function::core::Arity;
    ///
    /// assert!(Arity::OneOf(&[1, 2]).check(2));
    /// assert!(!Arity::Exact(1).check(2));
    /// ```
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                for (index, count) in counts.iter().enumerate() {
                    if index > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{count}")?;
                }
                Ok(())
            },
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (a table entry),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// One entry of the function allow-list.
        #[derive(Debug)]
        pub struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt"      => { arity: Arity::Exact(1), func: builtin::sqrt },
    "sin"       => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"       => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"       => { arity: Arity::Exact(1), func: builtin::tan },
    "log"       => { arity: Arity::OneOf(&[1, 2]), func: builtin::log },
    "ln"        => { arity: Arity::Exact(1), func: builtin::ln },
    "exp"       => { arity: Arity::Exact(1), func: builtin::exp },
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "fact"      => { arity: Arity::Exact(1), func: builtin::factorial },
    "factorial" => { arity: Arity::Exact(1), func: builtin::factorial },
    "pow"       => { arity: Arity::Exact(2), func: builtin::pow },
    "mod"       => { arity: Arity::Exact(2), func: builtin::modulus },
}

impl BuiltinDef {
    /// The name the function is called by.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The accepted argument counts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Invokes the builtin on already evaluated arguments.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the arity does not match, otherwise whatever
    /// the builtin reports.
    pub fn call(&self, args: &[Number], env: &CallEnv<'_>, position: usize) -> EvalResult<Number> {
        if !self.arity.check(args.len()) {
            return Err(EvalError::ArgumentCountMismatch { function: self.name.to_string(),
                                                          expected: self.arity.to_string(),
                                                          found: args.len(),
                                                          position });
        }
        (self.func)(args, env)
    }
}

/// The allow-list of callable functions.
///
/// # Example
/// ```
/// use safecalc::{
///     Context, Evaluator, error::ErrorKind,
///     interpreter::evaluator::function::core::FunctionTable,
/// };
///
/// let evaluator = Evaluator::new().with_functions(FunctionTable::only(&["sqrt"]));
/// assert!(evaluator.evaluate("sqrt(4)", &Context::new()).is_ok());
///
/// let err = evaluator.evaluate("sin(4)", &Context::new()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnknownFunction);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionTable {
    entries: Vec<&'static BuiltinDef>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FunctionTable {
    /// Every builtin function.
    #[must_use]
    pub fn standard() -> Self {
        Self { entries: BUILTIN_TABLE.iter().collect() }
    }

    /// Only the named builtins; unknown names are ignored.
    #[must_use]
    pub fn only(names: &[&str]) -> Self {
        Self { entries: BUILTIN_TABLE.iter()
                                     .filter(|def| names.contains(&def.name))
                                     .collect(), }
    }

    /// Returns a copy of the table without `name`.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|def| def.name != name);
        self
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static BuiltinDef> {
        self.entries.iter().copied().find(|def| def.name == name)
    }

    /// Names of the functions in this table.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|def| def.name).collect()
    }
}

impl Evaluator {
    /// Evaluates a function call.
    ///
    /// The name is resolved in the function table first, then the arity is
    /// checked, and only then are the arguments evaluated, left to right.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `position`: Offset of the call, for error reporting.
    /// - `depth`: Nesting depth of the call.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity or the function fails.
    pub(crate) fn eval_call(&self,
                            name: &str,
                            arguments: &[Expr],
                            position: usize,
                            context: &Context,
                            depth: usize)
                            -> EvalResult<Number> {
        let builtin =
            self.functions()
                .get(name)
                .ok_or_else(|| EvalError::UnknownFunction { name: name.to_string(),
                                                            position })?;

        if !builtin.arity().check(arguments.len()) {
            return Err(EvalError::ArgumentCountMismatch { function: name.to_string(),
                                                          expected: builtin.arity().to_string(),
                                                          found: arguments.len(),
                                                          position });
        }

        let args = arguments.iter()
                            .map(|arg| self.eval_at(arg, context, depth + 1))
                            .collect::<EvalResult<Vec<_>>>()?;

        let env = CallEnv { config: self.config(),
                            cache:  self.cache(), };
        builtin.call(&args, &env, position)
    }
}

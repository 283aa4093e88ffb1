use std::{
    fmt::Display,
    fs,
    io::{Write, stdin, stdout},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use colored::Colorize;
use safecalc::{
    EvalConfig, EvalResult, Evaluator, Number, Session,
    constants::Category,
    primitives::sequence::{arithmetic_sequence, fibonacci, geometric_sequence, prime_sequence},
};

/// safecalc is a calculator that evaluates arithmetic expressions against a
/// fixed set of operators, functions and constants.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Makes physical, astronomical and conversion constants available by
    /// name.
    #[arg(short, long, global = true)]
    physical_constants: bool,

    /// Memoizes square roots, factorials and trigonometry, keeping this many
    /// entries per function.
    #[arg(long, global = true)]
    cache_size: Option<usize>,

    /// Largest accepted factorial argument.
    #[arg(long, global = true, default_value_t = EvalConfig::default().factorial_limit)]
    factorial_limit: u64,

    /// Deepest accepted nesting of parentheses, signs, powers and calls.
    #[arg(long, global = true, default_value_t = EvalConfig::default().max_depth)]
    max_depth: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates expressions in order; `ans` carries over between them.
    Eval {
        expressions: Vec<String>,

        /// Reads additional expressions from a file, one per line.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Starts an interactive session (the default).
    Repl,
    /// Prints a number sequence.
    Seq {
        #[command(subcommand)]
        kind: SequenceKind,
    },
    /// Lists named constants.
    Constants {
        /// Only list this category.
        #[arg(short, long)]
        category: Option<Category>,
    },
}

#[derive(Subcommand, Debug)]
enum SequenceKind {
    /// The first COUNT Fibonacci numbers.
    Fibonacci { count: usize },
    /// COUNT terms starting at FIRST with a common DIFFERENCE.
    Arithmetic {
        first:      String,
        difference: String,
        count:      usize,
    },
    /// COUNT terms starting at FIRST with a common RATIO.
    Geometric {
        first: String,
        ratio: String,
        count: usize,
    },
    /// The first COUNT primes.
    Primes { count: usize },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let session = Session::with_evaluator(build_evaluator(&args));

    let outcome = match args.command {
        Some(Command::Eval { expressions, file }) => run_eval(&session, expressions, file),
        Some(Command::Repl) | None => repl(&session),
        Some(Command::Seq { kind }) => run_sequence(&session, kind),
        Some(Command::Constants { category }) => {
            list_constants(category);
            Ok(())
        },
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message.red());
            ExitCode::FAILURE
        },
    }
}

fn build_evaluator(args: &Args) -> Evaluator {
    let config = EvalConfig { factorial_limit: args.factorial_limit,
                              max_depth: args.max_depth,
                              ..EvalConfig::default() };
    let mut evaluator = Evaluator::new().with_config(config);
    if args.physical_constants {
        evaluator = evaluator.with_physical_constants();
    }
    if let Some(capacity) = args.cache_size {
        evaluator = evaluator.with_cache(capacity);
    }
    evaluator
}

fn run_eval(session: &Session,
            mut expressions: Vec<String>,
            file: Option<PathBuf>)
            -> Result<(), String> {
    if let Some(path) = file {
        let contents = fs::read_to_string(&path).map_err(|e| {
                                                    format!("Failed to read the input file '{}': {e}",
                                                            path.display())
                                                })?;
        expressions.extend(contents.lines()
                                   .map(str::trim)
                                   .filter(|line| !line.is_empty())
                                   .map(str::to_string));
    }

    let mut failed = 0;
    for (expression, result) in expressions.iter().zip(session.evaluate_batch(&expressions)) {
        match result {
            Ok(value) => println!("{value}"),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}", format!("{expression}:").yellow(), e.to_string().red());
            },
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} expressions failed.", expressions.len()));
    }
    Ok(())
}

fn run_sequence(session: &Session, kind: SequenceKind) -> Result<(), String> {
    let evaluate = |text: &str| session.evaluate(text).map_err(|e| e.to_string());
    match kind {
        SequenceKind::Fibonacci { count } => print_terms(fibonacci(count)),
        SequenceKind::Arithmetic { first,
                                   difference,
                                   count, } => {
            print_terms(arithmetic_sequence(&evaluate(&first)?, &evaluate(&difference)?, count))
        },
        SequenceKind::Geometric { first, ratio, count } => {
            print_terms(geometric_sequence(&evaluate(&first)?, &evaluate(&ratio)?, count))
        },
        SequenceKind::Primes { count } => print_terms(prime_sequence(count)),
    }
}

fn print_terms<T: Display>(terms: EvalResult<Vec<T>>) -> Result<(), String> {
    let terms = terms.map_err(|e| e.to_string())?;
    let line = terms.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    println!("{line}");
    Ok(())
}

fn list_constants(category: Option<Category>) {
    let categories = category.map_or_else(|| Category::ALL.to_vec(), |c| vec![c]);
    for category in categories {
        println!("{}", category.name().bold());
        for (name, value) in category.constants() {
            println!("  {} = {value}", name.cyan());
        }
    }
}

/// A REPL line that manipulates memory or the session instead of being
/// evaluated.
enum ReplCommand<'a> {
    Exit,
    Stats,
    MemoryClear,
    MemoryStore(Option<&'a str>),
    MemoryAdd(Option<&'a str>),
    MemorySubtract(Option<&'a str>),
}

impl<'a> ReplCommand<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let operand = Some(rest.trim()).filter(|s| !s.is_empty());
        match head {
            "exit" | "quit" => Some(Self::Exit),
            "stats" => Some(Self::Stats),
            "mc" => Some(Self::MemoryClear),
            "ms" => Some(Self::MemoryStore(operand)),
            "m+" => Some(Self::MemoryAdd(operand)),
            "m-" => Some(Self::MemorySubtract(operand)),
            _ => None,
        }
    }
}

/// Evaluates the operand of a memory command, or reads `ans` without one.
fn memory_operand(session: &Session, operand: Option<&str>) -> EvalResult<Number> {
    match operand {
        Some(text) => session.evaluate_unrecorded(text),
        None => Ok(session.context().answer()),
    }
}

fn run_repl_command(session: &Session, command: &ReplCommand<'_>) -> EvalResult<()> {
    match command {
        ReplCommand::Exit => {},
        ReplCommand::Stats => match session.evaluator().cache_stats() {
            Some(stats) => println!("{stats}"),
            None => println!("{}", "Caching is disabled; start with --cache-size to enable it.".yellow()),
        },
        ReplCommand::MemoryClear => session.clear_memory(),
        ReplCommand::MemoryStore(operand) => session.store_memory(memory_operand(session, *operand)?),
        ReplCommand::MemoryAdd(operand) => session.add_to_memory(&memory_operand(session, *operand)?)?,
        ReplCommand::MemorySubtract(operand) => {
            session.subtract_from_memory(&memory_operand(session, *operand)?)?;
        },
    }
    if !matches!(command, ReplCommand::Exit | ReplCommand::Stats) {
        println!("{} {}", "mem =".green(), session.context().memory);
    }
    Ok(())
}

fn repl(session: &Session) -> Result<(), String> {
    let mut input = String::new();
    loop {
        print!("{}", "> ".blue());
        stdout().flush().map_err(|e| e.to_string())?;

        input.clear();
        match stdin().read_line(&mut input) {
            Err(e) => return Err(e.to_string()),
            Ok(0) => {
                println!("exit");
                return Ok(());
            },
            Ok(_) => {},
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = match ReplCommand::parse(line) {
            Some(ReplCommand::Exit) => return Ok(()),
            Some(command) => run_repl_command(session, &command),
            None => session.evaluate(line).map(|value| println!("{value}")),
        };
        if let Err(e) = outcome {
            println!("{}", e.to_string().red());
        }
    }
}

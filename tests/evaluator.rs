use std::fs::{self};

use safecalc::{
    Context, ErrorKind, EvalConfig, EvalError, Evaluator, Number, Session,
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::evaluator::{
        constants::{ConstantTable, ConstantValue},
        function::{builtin, core::CallEnv, core::FunctionTable},
        operators::OperatorTable,
    },
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            let session =
                Session::with_evaluator(Evaluator::new().with_physical_constants());
            for line in code.lines().filter(|l| !l.trim().is_empty()) {
                if let Err(e) = check_example_line(&session, line) {
                    panic!("Example {} in {:?} failed:\n{}\n{}", i + 1, path, code, e);
                }
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

/// Checks one `expression => expected` line, where `expected` is either the
/// displayed result or `error Kind`.
fn check_example_line(session: &Session, line: &str) -> Result<(), String> {
    let (expression, expected) =
        line.rsplit_once("=>")
            .ok_or_else(|| format!("Line '{line}' has no '=>'"))?;
    let expected = expected.trim();

    match (session.evaluate(expression), expected.strip_prefix("error ")) {
        (Ok(value), None) if value.to_string() == expected => Ok(()),
        (Err(e), Some(kind)) if format!("{:?}", e.kind()) == kind => Ok(()),
        (result, _) => Err(format!("'{}' gave {result:?}, expected {expected}", expression.trim())),
    }
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```safecalc") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn eval(src: &str) -> Result<Number, EvalError> {
    Evaluator::new().evaluate(src, &Context::new())
}

fn assert_value(src: &str, expected: impl Into<Number>) {
    match eval(src) {
        Ok(value) => assert_eq!(value, expected.into(), "Expression: {src}"),
        Err(e) => panic!("Expression '{src}' failed: {e}"),
    }
}

fn assert_close(src: &str, expected: f64) {
    match eval(src) {
        Ok(Number::Real(value)) => {
            assert!((value - expected).abs() <= 1e-12 * expected.abs().max(1.0),
                    "Expression '{src}' gave {value}, expected {expected}");
        },
        other => panic!("Expression '{src}' gave {other:?}, expected a real"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match eval(src) {
        Ok(value) => panic!("Expression '{src}' succeeded with {value} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "Expression '{src}' failed with {e}"),
    }
}

#[test]
fn reference_scenarios() {
    assert_value("2^8 + factorial(5) - sqrt(144)", 364.0);
    assert_failure("1/0", ErrorKind::Domain);
    assert_failure("fact(-1)", ErrorKind::Domain);
    assert_value("sin(90)", 1.0);
    assert_failure("__import__('os')", ErrorKind::Syntax);
    assert_value("log(100,10)", 2.0);
}

#[test]
fn integer_arithmetic_is_exact() {
    assert_value("1 + 2", 3);
    assert_value("7 * 9", 63);
    assert_value("8 - 15", -7);
    assert_value("10 / 2", 5);
    assert_value("7 / 2", 3.5);
    assert_value("2 ** 64", Number::Integer("18446744073709551616".parse().unwrap()));
    assert_value("99999999999999999999 + 1",
                 Number::Integer("100000000000000000000".parse().unwrap()));
    assert_value("fact(25)", Number::Integer("15511210043330985984000000".parse().unwrap()));
}

#[test]
fn real_arithmetic() {
    assert_value("1.5 + 1", 2.5);
    assert_value(".5 * 4", 2.0);
    assert_value("2.", 2.0);
    assert_value("1e3", 1000.0);
    assert_value("2.5e-1", 0.25);
    assert_close("0.1 + 0.2", 0.3);
    assert_close("sqrt(2) * sqrt(2)", 2.0);
}

#[test]
fn precedence_and_associativity() {
    assert_value("1 + 2 * 3", 7);
    assert_value("(1 + 2) * 3", 9);
    assert_value("10 - 4 - 3", 3);
    assert_value("64 / 4 / 2", 8);
    assert_value("2 ** 3 ** 2", 512);
    assert_value("2 ^ 3 ^ 2", 512);
    assert_value("-2 ** 2", -4);
    assert_value("(-2) ** 2", 4);
    assert_value("2 ** -1", 0.5);
    assert_value("-+-3", 3);
    assert_value("2 * -3", -6);
}

#[test]
fn functions() {
    assert_value("sqrt(16)", 4.0);
    assert_value("cos(0)", 1.0);
    assert_value("sin(-270)", 1.0);
    assert_close("tan(45)", 1.0);
    assert_close("cos(60)", 0.5);
    assert_value("log(100)", 2.0);
    assert_value("log(8, 2)", 3.0);
    assert_close("log(81, 3)", 4.0);
    assert_value("ln(1)", 0.0);
    assert_close("ln(e)", 1.0);
    assert_value("exp(0)", 1.0);
    assert_value("abs(-5)", 5);
    assert_value("abs(-5.5)", 5.5);
    assert_value("fact(0)", 1);
    assert_value("factorial(5)", 120);
    assert_value("fact(5.0)", 120);
    assert_value("pow(3, 4)", 81);
    assert_value("pow(4, 0.5)", 2.0);
    assert_value("mod(10, 3)", 1);
    assert_value("mod(-10, 3)", 2);
    assert_value("mod(10, -3)", -2);
    assert_value("sqrt(sqrt(16))", 2.0);
    assert_value("abs(-(2 ** 3))", 8);
}

#[test]
fn huge_integers_still_have_logarithms() {
    assert_close("ln(10 ** 400)", 400.0 * std::f64::consts::LN_10);
    assert_close("log(10 ** 400)", 400.0);
    assert_failure("sqrt(10 ** 400)", ErrorKind::Domain);
}

#[test]
fn domain_errors() {
    assert_failure("1 / 0", ErrorKind::Domain);
    assert_failure("1 / 0.0", ErrorKind::Domain);
    assert_failure("mod(5, 0)", ErrorKind::Domain);
    assert_failure("sqrt(-4)", ErrorKind::Domain);
    assert_failure("log(0)", ErrorKind::Domain);
    assert_failure("log(-1)", ErrorKind::Domain);
    assert_failure("log(10, 1)", ErrorKind::Domain);
    assert_failure("log(10, -2)", ErrorKind::Domain);
    assert_failure("ln(0)", ErrorKind::Domain);
    assert_failure("tan(90)", ErrorKind::Domain);
    assert_failure("tan(270)", ErrorKind::Domain);
    assert_failure("fact(1.5)", ErrorKind::Domain);
    assert_failure("fact(10001)", ErrorKind::Domain);
    assert_failure("0 ** -1", ErrorKind::Domain);
    assert_failure("(-8) ** (1/3)", ErrorKind::Domain);
    assert_failure("10.0 ** 400", ErrorKind::Domain);
    assert_failure("exp(1000)", ErrorKind::Domain);
    assert_failure("2 ** 100000000", ErrorKind::Domain);
}

#[test]
fn rejected_syntax() {
    for src in ["",
                "   ",
                "1 +",
                "* 2",
                "(1 + 2",
                "1 + 2)",
                "1 2",
                "sqrt(1,)",
                "sqrt(1",
                "x = 1",
                "1 == 1",
                "1 < 2",
                "1 and 2",
                "'abc'",
                "\"abc\"",
                "a[0]",
                "a.b",
                "7 % 2",
                "lambda: 1",
                "[x for x in y]",
                "1e999",
                "1; 2",
                "2 ** ** 3"]
    {
        assert_failure(src, ErrorKind::Syntax);
    }
}

#[test]
fn unknown_names_and_functions() {
    assert_failure("x", ErrorKind::UnknownIdentifier);
    assert_failure("pi + tau", ErrorKind::UnknownIdentifier);
    assert_failure("c", ErrorKind::UnknownIdentifier);
    assert_failure("open(1)", ErrorKind::UnknownFunction);
    assert_failure("eval(1)", ErrorKind::UnknownFunction);
    assert_failure("pi(1)", ErrorKind::UnknownFunction);
    assert_failure("sqrt", ErrorKind::UnknownIdentifier);
}

#[test]
fn arity_is_checked() {
    assert_failure("sqrt()", ErrorKind::ArgumentCountMismatch);
    assert_failure("sqrt(1, 2)", ErrorKind::ArgumentCountMismatch);
    assert_failure("log(1, 2, 3)", ErrorKind::ArgumentCountMismatch);
    assert_failure("pow(2)", ErrorKind::ArgumentCountMismatch);

    let err = eval("log()").unwrap_err();
    assert_eq!(err,
               EvalError::ArgumentCountMismatch { function: "log".to_string(),
                                                  expected: "1 or 2".to_string(),
                                                  found:    0,
                                                  position: 0, });
}

#[test]
fn arguments_are_not_evaluated_for_unknown_functions() {
    assert_failure("nope(1 / 0)", ErrorKind::UnknownFunction);
    assert_failure("sqrt(1 / 0, 1)", ErrorKind::ArgumentCountMismatch);
}

#[test]
fn error_positions() {
    assert_eq!(eval("1 + foo").unwrap_err(),
               EvalError::UnknownIdentifier { name:     "foo".to_string(),
                                              position: 4, });
    assert_eq!(eval("2 * bar(1)").unwrap_err(),
               EvalError::UnknownFunction { name:     "bar".to_string(),
                                            position: 4, });

    let message = eval("1 + $").unwrap_err().to_string();
    assert!(message.contains("offset 4"), "{message}");
}

#[test]
fn ans_and_mem_read_the_context() {
    let evaluator = Evaluator::new();
    let mut context = Context::new();

    assert_eq!(evaluator.evaluate("ans", &context).unwrap(), Number::from(0));
    assert_eq!(evaluator.evaluate("mem", &context).unwrap(), Number::from(0));

    context.record(Number::from(10));
    context.store_memory(Number::from(2.5));
    assert_eq!(evaluator.evaluate("ans * mem", &context).unwrap(), Number::from(25.0));

    let first = evaluator.evaluate("ans", &context).unwrap();
    context.record(first.clone());
    assert_eq!(evaluator.evaluate("ans", &context).unwrap(), first);
}

#[test]
fn evaluation_does_not_modify_the_context() {
    let evaluator = Evaluator::new();
    let context = Context { last_result: Some(Number::from(3)),
                            memory:      Number::from(4), };
    let before = context.clone();

    evaluator.evaluate("ans + mem", &context).unwrap();
    evaluator.evaluate("1 / 0", &context).unwrap_err();

    assert_eq!(context, before);
}

#[test]
fn evaluation_is_deterministic() {
    let context = Context { last_result: Some(Number::from(1.25)),
                            memory:      Number::from(-3), };
    let evaluator = Evaluator::new();
    for src in ["sin(ans * 30) + mem", "2 ** 200 / 3", "log(ans, 2) - fact(12)"] {
        assert_eq!(evaluator.evaluate(src, &context), evaluator.evaluate(src, &context.clone()));
    }
}

#[test]
fn restricted_operator_table() {
    let evaluator =
        Evaluator::new().with_operators(OperatorTable::standard().without_binary(BinaryOperator::Pow)
                                                                 .without_unary(UnaryOperator::Negate));
    let context = Context::new();

    assert_eq!(evaluator.evaluate("2 ** 3", &context).unwrap_err().kind(),
               ErrorKind::UnsupportedOperator);
    assert_eq!(evaluator.evaluate("-1", &context).unwrap_err().kind(),
               ErrorKind::UnsupportedOperator);
    assert_eq!(evaluator.evaluate("+1 * 3", &context).unwrap(), Number::from(3));
    assert_eq!(evaluator.evaluate("pow(2, 3)", &context).unwrap(), Number::from(8));

    // The operator is rejected before its operands are evaluated.
    assert_eq!(evaluator.evaluate("(1 / 0) ** 2", &context).unwrap_err().kind(),
               ErrorKind::UnsupportedOperator);

    let nothing = Evaluator::new().with_operators(OperatorTable::empty());
    assert_eq!(nothing.evaluate("1 + 1", &context).unwrap_err().kind(),
               ErrorKind::UnsupportedOperator);
    assert_eq!(nothing.evaluate("42", &context).unwrap(), Number::from(42));
}

#[test]
fn restricted_function_and_constant_tables() {
    let context = Context::new();

    let evaluator = Evaluator::new().with_functions(FunctionTable::standard().without("fact"));
    assert_eq!(evaluator.evaluate("fact(3)", &context).unwrap_err().kind(),
               ErrorKind::UnknownFunction);
    assert_eq!(evaluator.evaluate("factorial(3)", &context).unwrap(), Number::from(6));
    assert!(!evaluator.functions().names().contains(&"fact"));

    let evaluator =
        Evaluator::new().with_constants(ConstantTable::standard().without("ans")
                                                                 .with("answer",
                                                                       ConstantValue::Fixed(Number::from(42))));
    assert_eq!(evaluator.evaluate("ans", &context).unwrap_err().kind(),
               ErrorKind::UnknownIdentifier);
    assert_eq!(evaluator.evaluate("answer", &context).unwrap(), Number::from(42));
}

#[test]
fn physical_constants_do_not_shadow_builtins() {
    let evaluator = Evaluator::new().with_physical_constants();
    let context = Context::new();

    assert_eq!(evaluator.evaluate("e", &context).unwrap(), Number::from(std::f64::consts::E));
    assert_eq!(evaluator.evaluate("pi", &context).unwrap(), Number::from(std::f64::consts::PI));
    assert_eq!(evaluator.evaluate("c", &context).unwrap(), Number::from(299_792_458.0));
    assert!(evaluator.constants().contains("g"));
}

#[test]
fn resource_limits() {
    let deep_parens = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    assert_failure(&deep_parens, ErrorKind::TooComplex);

    let deep_signs = format!("{}1", "-".repeat(1000));
    assert_failure(&deep_signs, ErrorKind::TooComplex);

    let deep_calls = format!("{}1{}", "abs(".repeat(1000), ")".repeat(1000));
    assert_failure(&deep_calls, ErrorKind::TooComplex);

    let too_long = "1".repeat(10_001);
    assert_failure(&too_long, ErrorKind::TooComplex);

    let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_value(&shallow, 1);

    let long_chain = vec!["1"; 2000].join(" + ");
    assert_value(&long_chain, 2000);
}

#[test]
fn custom_limits() {
    let config = EvalConfig { max_depth: 5,
                              factorial_limit: 10,
                              max_source_len: 20,
                              ..EvalConfig::default() };
    let evaluator = Evaluator::new().with_config(config);
    let context = Context::new();

    assert!(evaluator.evaluate("((1))", &context).is_ok());
    assert_eq!(evaluator.evaluate("((((((1))))))", &context).unwrap_err().kind(),
               ErrorKind::TooComplex);
    assert_eq!(evaluator.evaluate("fact(10)", &context).unwrap(), Number::from(3_628_800));
    assert_eq!(evaluator.evaluate("fact(11)", &context).unwrap_err().kind(),
               ErrorKind::Domain);
    assert_eq!(evaluator.evaluate("1 + 1 + 1 + 1 + 1 + 1 + 1", &context).unwrap_err().kind(),
               ErrorKind::TooComplex);
}

#[test]
fn hand_built_trees_are_evaluated_safely() {
    let evaluator = Evaluator::new();
    let context = Context::new();

    let non_finite = Expr::Literal { value:    Number::Real(f64::INFINITY),
                                     position: 0, };
    assert_eq!(evaluator.eval(&non_finite, &context).unwrap_err().kind(),
               ErrorKind::UnsupportedConstruct);

    let mut deep = Expr::Literal { value:    Number::from(1),
                                   position: 0, };
    for _ in 0..500 {
        deep = Expr::UnaryOp { op:       UnaryOperator::Negate,
                               expr:     Box::new(deep),
                               position: 0, };
    }
    assert_eq!(evaluator.eval(&deep, &context).unwrap_err().kind(),
               ErrorKind::TooComplex);
}

#[test]
fn cached_and_uncached_evaluators_agree() {
    let plain = Evaluator::new();
    let cached = Evaluator::new().with_cache(16);
    let context = Context::new();

    for src in ["sqrt(2)",
                "sqrt(2) + sqrt(2)",
                "fact(30) / fact(28)",
                "fact(5)",
                "sin(30) + cos(30) + tan(30)",
                "sqrt(-1)",
                "tan(90)",
                "fact(-3)"]
    {
        assert_eq!(plain.evaluate(src, &context), cached.evaluate(src, &context), "{src}");
        assert_eq!(plain.evaluate(src, &context), cached.evaluate(src, &context), "{src}");
    }

    let stats = cached.cache_stats().unwrap();
    assert!(stats.hits() > 0);
    assert!(plain.cache_stats().is_none());

    cached.clear_cache();
    assert_eq!(cached.cache_stats().unwrap().hits(), 0);
}

#[test]
fn inexact_division_of_huge_integers() {
    assert_close("fact(200) / fact(201)", 1.0 / 201.0);
    assert_close("10 ** 400 / (3 * 10 ** 399)", 10.0 / 3.0);
    assert_close("fact(171) / 10 ** 300", 1.241_018_070_217_667_8e9);
    assert_close("-(10 ** 400) / (7 * 10 ** 399)", -10.0 / 7.0);
    assert_failure("10 ** 400 / 3", ErrorKind::Domain);
}

#[test]
fn negative_zero_survives_a_warm_cache() {
    let plain = Evaluator::new();
    let cached = Evaluator::new().with_cache(16);
    let context = Context::new();

    for warm in ["sin(0)", "sqrt(0)", "tan(0)"] {
        cached.evaluate(warm, &context).unwrap();
    }
    for src in ["sin(-0.0)", "sqrt(-0.0)", "tan(-0.0)", "sin(0)", "sqrt(0)"] {
        let expected = plain.evaluate(src, &context).unwrap().to_string();
        assert_eq!(cached.evaluate(src, &context).unwrap().to_string(), expected, "{src}");
    }
    assert_eq!(cached.evaluate("sin(-0.0)", &context).unwrap().to_string(), "-0");
}

#[test]
fn builtins_called_directly_check_their_arguments() {
    let config = EvalConfig::default();
    let env = CallEnv { config: &config,
                        cache:  None, };
    let two = [Number::from(2), Number::from(3)];

    assert_eq!(builtin::sqrt(&[], &env).unwrap_err(),
               EvalError::ArgumentCountMismatch { function: "sqrt".to_string(),
                                                  expected: "1".to_string(),
                                                  found:    0,
                                                  position: 0, });
    assert_eq!(builtin::log(&[], &env).unwrap_err().kind(), ErrorKind::ArgumentCountMismatch);
    assert_eq!(builtin::sin(&two, &env).unwrap_err().kind(), ErrorKind::ArgumentCountMismatch);
    assert_eq!(builtin::factorial(&[], &env).unwrap_err().kind(), ErrorKind::ArgumentCountMismatch);
    assert_eq!(builtin::pow(&two[..1], &env).unwrap_err().kind(), ErrorKind::ArgumentCountMismatch);
    assert_eq!(builtin::modulus(&[], &env).unwrap_err().kind(), ErrorKind::ArgumentCountMismatch);

    assert_eq!(builtin::pow(&two, &env).unwrap(), Number::from(8));
    assert_eq!(builtin::log(&[Number::from(8), Number::from(2)], &env).unwrap(), Number::from(3.0));
}

//! Property-based tests for the evaluator and its primitives.

use num_bigint::BigInt;
use proptest::prelude::*;
use safecalc::{
    Context, Evaluator, Number,
    cache::MathCache,
    primitives::{
        factorial::factorial_u64,
        power::{real_power, reference_power},
        roots::real_sqrt,
        trig::TrigFunction,
    },
};

// Strategy for generating small integers
fn small_int() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

// Strategy for generating non-zero integers
fn non_zero_int() -> impl Strategy<Value = i64> {
    prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
}

fn angle() -> impl Strategy<Value = f64> {
    prop_oneof![(-720i64..=720i64).prop_map(|d| d as f64), -1.0e6f64..1.0e6f64]
}

fn trig_function() -> impl Strategy<Value = TrigFunction> {
    prop_oneof![Just(TrigFunction::Sin), Just(TrigFunction::Cos), Just(TrigFunction::Tan)]
}

fn eval(src: &str) -> Result<Number, safecalc::EvalError> {
    Evaluator::new().evaluate(src, &Context::new())
}

proptest! {
    #[test]
    fn integer_ring_operations_are_exact(a in small_int(), b in small_int()) {
        let (x, y) = (BigInt::from(a), BigInt::from(b));
        prop_assert_eq!(eval(&format!("({a}) + ({b})")).unwrap(), Number::Integer(&x + &y));
        prop_assert_eq!(eval(&format!("({a}) - ({b})")).unwrap(), Number::Integer(&x - &y));
        prop_assert_eq!(eval(&format!("({a}) * ({b})")).unwrap(), Number::Integer(&x * &y));
    }

    #[test]
    fn exact_division_stays_integral(a in small_int(), b in non_zero_int()) {
        let product = BigInt::from(a) * BigInt::from(b);
        prop_assert_eq!(eval(&format!("({product}) / ({b})")).unwrap(), Number::from(a));
    }

    #[test]
    fn modulus_takes_the_sign_of_the_divisor(a in small_int(), b in non_zero_int()) {
        let Number::Integer(r) = eval(&format!("mod({a}, {b})")).unwrap() else {
            return Err(TestCaseError::fail("expected an integer remainder"));
        };
        prop_assert!(r.clone() * BigInt::from(b.signum()) >= BigInt::from(0));
        prop_assert!(r.clone() * BigInt::from(b.signum()) < BigInt::from(b.abs()));
        prop_assert_eq!((BigInt::from(a) - r) % BigInt::from(b), BigInt::from(0));
    }

    #[test]
    fn fast_power_paths_agree_with_reference(base in -1.0e6f64..1.0e6f64,
                                             exponent in prop_oneof![Just(2.0), Just(1.0), Just(0.5), Just(-0.5)]) {
        match (real_power(base, exponent), reference_power(base, exponent)) {
            (Ok(fast), Ok(reference)) => {
                prop_assert!((fast - reference).abs() <= 1e-12 * reference.abs(),
                             "{}^{}: {} vs {}", base, exponent, fast, reference);
            },
            (Err(fast), Err(reference)) => {
                prop_assert_eq!(fast, reference);
            },
            (fast, reference) => {
                return Err(TestCaseError::fail(format!("{base}^{exponent}: {fast:?} vs {reference:?}")));
            },
        }
    }

    #[test]
    fn cache_agrees_with_direct_computation(values in prop::collection::vec(-100.0f64..1.0e6, 1..50),
                                            angles in prop::collection::vec((trig_function(), angle()), 1..50),
                                            factorials in prop::collection::vec(0u64..200, 1..50)) {
        let mut cache = MathCache::new(4);
        for _ in 0..2 {
            for value in &values {
                prop_assert_eq!(cache.sqrt(*value), real_sqrt(*value));
            }
            for (function, degrees) in &angles {
                prop_assert_eq!(cache.trig(*function, *degrees), function.apply_degrees(*degrees));
            }
            for n in &factorials {
                prop_assert_eq!(cache.factorial(*n), factorial_u64(*n));
            }
        }
    }

    #[test]
    fn cached_evaluator_agrees_with_plain(x in -1.0e3f64..1.0e3, n in 0i64..60) {
        let plain = Evaluator::new();
        let cached = Evaluator::new().with_cache(8);
        let context = Context::new();
        for src in [format!("sqrt({x:?})"),
                    format!("sin({x:?}) + cos({x:?})"),
                    format!("tan({x:?})"),
                    format!("fact({n}) / fact({n})")] {
            prop_assert_eq!(plain.evaluate(&src, &context), cached.evaluate(&src, &context));
            prop_assert_eq!(plain.evaluate(&src, &context), cached.evaluate(&src, &context));
        }
    }

    #[test]
    fn evaluation_is_deterministic(ans in small_int(), mem in -1.0e3f64..1.0e3, op in "[-+*/]") {
        let evaluator = Evaluator::new();
        let context = Context { last_result: Some(Number::from(ans)),
                                memory:      Number::from(mem), };
        let src = format!("ans {op} mem {op} sqrt(abs(ans))");
        prop_assert_eq!(evaluator.evaluate(&src, &context), evaluator.evaluate(&src, &context.clone()));
    }

    #[test]
    fn ans_is_idempotent(value in small_int()) {
        let evaluator = Evaluator::new();
        let mut context = Context::new();
        context.record(Number::from(value));

        let first = evaluator.evaluate("ans", &context).unwrap();
        context.record(first.clone());
        prop_assert_eq!(evaluator.evaluate("ans", &context).unwrap(), first);
    }

    #[test]
    fn arbitrary_text_never_panics(src in "[0-9a-z+*/()^.,_ -]{0,40}") {
        let _ = eval(&src);
    }

    #[test]
    fn arbitrary_unicode_never_panics(src in any::<String>()) {
        let _ = eval(&src);
    }
}

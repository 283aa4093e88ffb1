use std::thread;

use safecalc::{ErrorKind, Evaluator, Number, Session};

#[test]
fn results_are_recorded_only_on_success() {
    let session = Session::new();

    assert_eq!(session.evaluate("2 + 3").unwrap(), Number::from(5));
    assert_eq!(session.context().last_result, Some(Number::from(5)));

    assert_eq!(session.evaluate("sqrt(-1)").unwrap_err().kind(), ErrorKind::Domain);
    assert_eq!(session.evaluate("1 +").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(session.context().last_result, Some(Number::from(5)));

    assert_eq!(session.evaluate("ans * ans").unwrap(), Number::from(25));
}

#[test]
fn memory_operations() {
    let session = Session::new();

    session.store_memory(Number::from(10));
    assert_eq!(session.evaluate("mem").unwrap(), Number::from(10));

    session.add_to_memory(&Number::from(5)).unwrap();
    session.subtract_from_memory(&Number::from(0.5)).unwrap();
    assert_eq!(session.evaluate("mem").unwrap(), Number::from(14.5));

    session.clear_memory();
    assert_eq!(session.evaluate("mem").unwrap(), Number::from(0));
}

#[test]
fn memory_operands_do_not_record_ans() {
    let session = Session::new();
    session.evaluate("40 + 2").unwrap();

    let operand = session.evaluate_unrecorded("ans / 2 + 4").unwrap();
    session.store_memory(operand);
    assert_eq!(session.context().memory, Number::from(25));
    assert_eq!(session.context().last_result, Some(Number::from(42)));

    assert_eq!(session.evaluate_unrecorded("nope").unwrap_err().kind(),
               ErrorKind::UnknownIdentifier);
    assert_eq!(session.evaluate("ans + mem").unwrap(), Number::from(67));
}

#[test]
fn memory_overflow_leaves_memory_unchanged() {
    let session = Session::new();
    session.store_memory(Number::from(f64::MAX));

    assert_eq!(session.add_to_memory(&Number::from(f64::MAX)).unwrap_err().kind(),
               ErrorKind::Domain);
    assert_eq!(session.context().memory, Number::from(f64::MAX));
}

#[test]
fn batches_chain_through_ans() {
    let session = Session::new();
    let results = session.evaluate_batch(&["10", "ans * 2", "ans + undefined", "ans + 1"]);

    assert_eq!(results[0], Ok(Number::from(10)));
    assert_eq!(results[1], Ok(Number::from(20)));
    assert_eq!(results[2].as_ref().unwrap_err().kind(), ErrorKind::UnknownIdentifier);
    assert_eq!(results[3], Ok(Number::from(21)));
}

#[test]
fn snapshot_lists_available_names() {
    let session = Session::with_evaluator(Evaluator::new().with_physical_constants());
    session.evaluate("7").unwrap();
    session.store_memory(Number::from(3));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.last_result, Some(Number::from(7)));
    assert_eq!(snapshot.memory, Number::from(3));
    assert!(snapshot.functions.contains(&"sqrt"));
    assert!(snapshot.functions.contains(&"factorial"));
    for name in ["ans", "mem", "pi", "e", "c", "g"] {
        assert!(snapshot.constants.contains(&name), "{name} missing");
    }
}

#[test]
fn shared_sessions_do_not_interleave() {
    let session = Session::with_evaluator(Evaluator::new().with_cache(64));

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..250 {
                    session.evaluate("sqrt(16) + fact(10) - sin(90)").unwrap();
                    session.add_to_memory(&Number::from(1)).unwrap();
                }
            });
        }
    });

    assert_eq!(session.context().memory, Number::from(1000));
    assert_eq!(session.context().last_result, Some(Number::from(3_628_803.0)));

    let stats = session.evaluator().cache_stats().unwrap();
    assert_eq!(stats.sqrt.hits + stats.sqrt.misses, 1000);
    assert_eq!(stats.sqrt.misses, 1);
}

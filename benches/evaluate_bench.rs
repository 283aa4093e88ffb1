//! Benchmarks for parsing and evaluating expressions.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use safecalc::{Context, Evaluator, parse};

const EXPRESSIONS: &[(&str, &str)] = &[("arithmetic", "1 + 2 * 3 - 4 / 5"),
                                       ("functions", "2^8 + factorial(5) - sqrt(144)"),
                                       ("trig", "sin(30) + cos(60) + tan(45)"),
                                       ("big_integer", "2 ** 4096 / 2 ** 4000")];

/// Builds a flat sum with `terms` terms.
fn flat_sum(terms: usize) -> String {
    vec!["1.5"; terms].join(" + ")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for terms in [10, 100, 1000] {
        let src = flat_sum(terms);
        group.bench_with_input(BenchmarkId::new("flat_sum", terms), &src, |b, src| {
                 b.iter(|| black_box(parse(src)))
             });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let context = Context::new();
    let plain = Evaluator::new();
    let cached = Evaluator::new().with_cache(1000);

    for (name, src) in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::new("uncached", name), src, |b, src| {
                 b.iter(|| black_box(plain.evaluate(src, &context)))
             });
        group.bench_with_input(BenchmarkId::new("cached", name), src, |b, src| {
                 b.iter(|| black_box(cached.evaluate(src, &context)))
             });
    }

    group.finish();
}

fn bench_factorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorial");
    let context = Context::new();
    let plain = Evaluator::new();
    let cached = Evaluator::new().with_cache(1000);

    for n in [20, 500, 5000] {
        let src = format!("fact({n})");
        group.bench_with_input(BenchmarkId::new("uncached", n), &src, |b, src| {
                 b.iter(|| black_box(plain.evaluate(src, &context)))
             });
        group.bench_with_input(BenchmarkId::new("cached", n), &src, |b, src| {
                 b.iter(|| black_box(cached.evaluate(src, &context)))
             });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_factorial);
criterion_main!(benches);

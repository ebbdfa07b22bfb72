//! Performance benchmarks for the NASL parser.
//!
//! - Fixtures: each script under `test_scripts/`, strict and lenient
//! - Size-based: a plugin body repeated to grow the input
//! - Recovery: a script that needs resynchronisation after every error

use bumpalo::Bump;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use nasl::{ParseOptions, parse, parse_lenient, parse_with};
use std::hint::black_box;

const PLUGIN: &str = include_str!("../test_scripts/plugin_description.nasl");
const FUNCTIONS: &str = include_str!("../test_scripts/functions.nasl");
const CONTROL_FLOW: &str = include_str!("../test_scripts/control_flow.nasl");
const OPERATORS: &str = include_str!("../test_scripts/operators.nasl");
const RECOVERABLE: &str = include_str!("../test_scripts/recoverable.nasl");

/// Benchmark each fixture in both parsing modes
fn fixture_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/fixtures");

    for (name, source) in [
        ("plugin_description", PLUGIN),
        ("functions", FUNCTIONS),
        ("control_flow", CONTROL_FLOW),
        ("operators", OPERATORS),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("{name}/strict"), |b| {
            b.iter(|| {
                let arena = Bump::new();
                let script = parse(black_box(source), &arena).unwrap();
                black_box(script.instructions().len())
            });
        });
        group.bench_function(format!("{name}/lenient"), |b| {
            b.iter(|| {
                let arena = Bump::new();
                let (script, _) = parse_lenient(black_box(source), &arena).unwrap();
                black_box(script.instructions().len())
            });
        });
    }

    group.finish();
}

/// Benchmark parsing as the input grows
fn size_based_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/file_sizes");

    let unit = format!("{FUNCTIONS}\n{CONTROL_FLOW}\n{OPERATORS}\n");
    for copies in [1usize, 10, 100] {
        let source = unit.repeat(copies);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("x{copies}"), |b| {
            b.iter(|| {
                let arena = Bump::new();
                let script = parse(black_box(&source), &arena).unwrap();
                black_box(script.instructions().len())
            });
        });
    }

    group.finish();
}

/// Benchmark error recovery with and without an error limit
fn recovery_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/recovery");

    let source = RECOVERABLE.repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("unlimited", |b| {
        let options = ParseOptions::recovering().with_max_errors(0);
        b.iter(|| {
            let arena = Bump::new();
            let (script, errors) = parse_with(black_box(&source), &arena, &options).unwrap();
            black_box((script.instructions().len(), errors.len()))
        });
    });

    group.bench_function("limit_10", |b| {
        let options = ParseOptions::recovering().with_max_errors(10);
        b.iter(|| {
            let arena = Bump::new();
            let (script, errors) = parse_with(black_box(&source), &arena, &options).unwrap();
            black_box((script.instructions().len(), errors.len()))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    fixture_benchmarks,
    size_based_benchmarks,
    recovery_benchmarks
);

criterion_main!(benches);

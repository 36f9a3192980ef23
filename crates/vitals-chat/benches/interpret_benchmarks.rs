//! Benchmarks for query interpretation.
//!
//! Interpretation runs on every message before any store call, so it should
//! stay well under a millisecond per query.

use std::time::Duration;

use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};
use vitals_chat::parser::{classify_intent, QueryInterpreter};
use vitals_core::types::WeekStart;

const QUERIES: &[&str] = &[
    "How many steps today?",
    "what's my heart rate this week",
    "How did I sleep last night",
    "calories burned yesterday",
    "how active was I last month",
    "tell me something nice",
    "Did I walk much this month?",
    "average bpm last week",
];

fn bench_interpret(c: &mut Criterion) {
    let interpreter = QueryInterpreter::new(WeekStart::Monday);
    let tz = FixedOffset::west_opt(7 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2026, 10, 14, 15, 30, 0).unwrap();

    let mut group = c.benchmark_group("interpret");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("classify_only", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let intent = classify_intent(QUERIES[idx % QUERIES.len()]);
            idx += 1;
            intent
        });
    });

    group.bench_function("intent_and_range", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let result = interpreter.interpret(QUERIES[idx % QUERIES.len()], &now);
            idx += 1;
            result
        });
    });

    group.bench_function("batch_100", |b| {
        b.iter(|| {
            let mut results = Vec::with_capacity(100);
            for i in 0..100 {
                results.push(interpreter.interpret(QUERIES[i % QUERIES.len()], &now));
            }
            results
        });
    });

    group.finish();
}

criterion_group!(benches, bench_interpret);
criterion_main!(benches);

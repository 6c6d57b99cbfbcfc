/// Trace emission benchmarks
///
/// Measures the cost of the level check, filter matching and redaction on
/// an in-memory sink.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use devops_fun::trace::{Severity, Tracer};
use devops_fun::sanitize;
use std::io;
use std::time::Duration;

const PARTS: [&str; 4] = ["Failed to block user", "42.", "Status:", "404"];

/// Benchmark: lines rejected by the level check never build a message
fn bench_level_rejected(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_rejected");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(1));

    let tracer = Tracer::new().with_filter("Status: 5\\d\\d");
    group.bench_function("dbg_at_level_0", |b| {
        b.iter(|| {
            let written = tracer
                .log_to(&mut io::sink(), Severity::Dbg, black_box(&PARTS))
                .unwrap();
            black_box(written);
        });
    });

    group.finish();
}

/// Benchmark: emitted lines with and without a filter
fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(1));

    for (name, pattern) in [("no_filter", ""), ("regex_filter", "Status: 5\\d\\d")] {
        let tracer = Tracer::new().with_filter(pattern);
        group.bench_with_input(BenchmarkId::from_parameter(name), &tracer, |b, tracer| {
            b.iter(|| {
                let written = tracer
                    .log_to(&mut io::sink(), Severity::Err, black_box(&PARTS))
                    .unwrap();
                black_box(written);
            });
        });
    }

    group.finish();
}

/// Benchmark: redaction with growing term lists
fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    group.measurement_time(Duration::from_secs(5));

    let line = "curl -H 'PRIVATE-TOKEN: glpat-abc123' https://gitlab.example.com/api/v4/users?page=2";
    for count in [1usize, 4, 16].iter() {
        let terms: Vec<String> = (0..*count).map(|i| format!("glpat-abc12{}", i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &terms, |b, terms| {
            b.iter(|| black_box(sanitize(black_box(line), terms)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_level_rejected, bench_emit, bench_sanitize);
criterion_main!(benches);

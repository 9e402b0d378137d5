//! Benchmarks for option extraction.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use giztoy_opts::{Opt, extract, must_extract};

giztoy_opts::option! {
    struct WithAddr(String);
    struct WithTopic(String);
    struct WithKeepAlive(u16);
    struct WithCleanSession(bool);
    struct WithUnknown(u8);
}

giztoy_opts::options! {
    #[derive(Default)]
    struct ConnectOptions {
        addr: String => "WithAddr",
        topics: Vec<String> => "WithTopic",
        keep_alive: u16 => "WithKeepAlive",
        clean_session: bool => "WithCleanSession",
        client_id: String,
    }
}

/// Generate topic options for benchmarking
fn generate_topics(count: usize) -> Vec<WithTopic> {
    (0..count)
        .map(|i| WithTopic(format!("device/gear-{:03}/state", i)))
        .collect()
}

fn bench_scalars(c: &mut Criterion) {
    let addr = WithAddr("tcp://127.0.0.1:1883".to_string());
    let options: [&dyn Opt; 3] = [&addr, &WithKeepAlive(60), &WithCleanSession(true)];

    c.bench_function("extract_scalars", |b| {
        b.iter(|| {
            let mut opts = ConnectOptions::default();
            must_extract(&mut opts, black_box(&options)).unwrap();
            black_box(opts)
        });
    });
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_append");

    for size in [10, 100, 1000].iter() {
        let topics = generate_topics(*size);
        let options: Vec<&dyn Opt> = topics.iter().map(|t| t as &dyn Opt).collect();

        group.bench_with_input(BenchmarkId::new("topics", size), size, |b, _| {
            b.iter(|| {
                let mut opts = ConnectOptions::default();
                extract(&mut opts, black_box(&options)).unwrap();
                black_box(opts)
            });
        });
    }

    group.finish();
}

fn bench_skip_unknown(c: &mut Criterion) {
    let unknown: Vec<WithUnknown> = (0..100).map(WithUnknown).collect();
    let options: Vec<&dyn Opt> = unknown.iter().map(|u| u as &dyn Opt).collect();

    c.bench_function("extract_skip_unknown", |b| {
        b.iter(|| {
            let mut opts = ConnectOptions::default();
            extract(&mut opts, black_box(&options)).unwrap();
            black_box(opts)
        });
    });
}

criterion_group!(benches, bench_scalars, bench_append, bench_skip_unknown);
criterion_main!(benches);

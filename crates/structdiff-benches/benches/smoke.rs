use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use structdiff_benches::{available_corpora, Trade};
use structdiff_core::{Comparer, DiffOptions, Inspect, Number, Value};

fn trade_id(value: &Value) -> Option<u64> {
    match value {
        Value::Record(record) => match record.get("id") {
            Some(Value::Number(Number::U64(id))) => Some(*id),
            _ => None,
        },
        _ => None,
    }
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    let comparer = Comparer::new();
    let options = DiffOptions::default();
    for corpus in available_corpora() {
        let dataset = corpus.load();
        group.throughput(Throughput::Elements(corpus.trades() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name()),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    let diffs = dataset.diff(&comparer, &options).expect("diff success");
                    black_box(diffs);
                });
            },
        );
    }
    group.finish();
}

fn bench_materialized(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff-materialized");
    let comparer = Comparer::new();
    let options = DiffOptions::default();
    for corpus in available_corpora() {
        let (before, after) = corpus.load().materialize();
        group.throughput(Throughput::Elements(corpus.trades() as u64));
        group.bench_function(corpus.name(), |b| {
            b.iter(|| {
                let diffs = comparer.diff_values(&before, &after, &options).expect("diff success");
                black_box(diffs);
            });
        });
    }
    group.finish();
}

fn bench_full_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("full-diff");
    let comparer = Comparer::new();
    let options = DiffOptions::default();
    for corpus in available_corpora() {
        let dataset = corpus.load();
        group.throughput(Throughput::Elements(corpus.trades() as u64));
        group.bench_function(corpus.name(), |b| {
            b.iter(|| {
                let diffs = comparer
                    .full_diff_with(dataset.before(), dataset.after(), &options)
                    .expect("diff success");
                black_box(diffs);
            });
        });
    }
    group.finish();
}

fn bench_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff-ordered");
    let mut comparer = Comparer::new();
    comparer.register_comparator(Trade::type_ref(), |left, right| trade_id(left).cmp(&trade_id(right)));
    let options = DiffOptions::default();
    for corpus in available_corpora() {
        let dataset = corpus.load();
        group.throughput(Throughput::Elements(corpus.trades() as u64));
        group.bench_function(corpus.name(), |b| {
            b.iter(|| {
                let diffs = dataset.diff(&comparer, &options).expect("diff success");
                black_box(diffs);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff, bench_materialized, bench_full_diff, bench_ordered);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rotation_parser::parser::convert;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let expressions = [
        "3 + 4".to_string(),
        "12 * 5 + 7".to_string(),
        "3 + 4 - 5 + 6 - 7".to_string(),
        "199 - 243 * 6 & 3 | 4 ^ 2".to_string(),
        "1 + 2 - 3 * 4 / 5 & 6 | 7 ^ 8 + 9 - 10 * 11".to_string(),
    ];
    for expression in expressions {
        group.throughput(Throughput::Elements(expression.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(&expression),
            &expression,
            |bencher, expression| {
                bencher.iter(|| convert("bench", expression));
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

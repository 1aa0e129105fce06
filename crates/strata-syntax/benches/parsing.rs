use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use strata_syntax::{outline, parse, parse_nodes};
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    for size in [10, 100, 1000] {
        let content = common::generate_markup_content(size);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("cst", size), &content, |b, content| {
            b.iter(|| {
                let tree = parse(std::hint::black_box(content));
                std::hint::black_box(tree);
            });
        });
    }

    group.finish();
}

fn bench_lower_and_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    group.sample_size(10);

    let content = common::generate_nested_headings(200, 6);
    group.bench_function("parse_nodes_outline", |b| {
        b.iter(|| {
            let nodes = parse_nodes(std::hint::black_box(&content));
            let entries = outline(&nodes);
            std::hint::black_box(entries);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_lower_and_outline);
criterion_main!(benches);

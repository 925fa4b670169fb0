use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use yamazumi::{ProcessNode, compute_geometry, line_balance};

fn nodes(n: usize) -> Vec<ProcessNode> {
    (0..n)
        .map(|i| ProcessNode::new(format!("p{i}"), format!("Step {i}"), ((i * 37) % 23) as f64))
        .collect()
}

fn bench_compute_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_geometry");
    for n in [8usize, 64, 1024] {
        let input = nodes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| {
                let g = compute_geometry(black_box(input), black_box(12.0));
                black_box(line_balance(&g))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_geometry);
criterion_main!(benches);

//! Throughput of MetricSet::add_eval over a full registry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use streameval::{MetricSet, RegistryMode, ScoresView};

fn scores(n_outputs: usize, n_instances: usize) -> Array2<f32> {
    Array2::from_shape_fn((n_outputs, n_instances), |(o, i)| {
        ((o * 31 + i * 17) % 100) as f32 / 100.0
    })
}

fn bench_add_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_set/add_eval");

    for n_instances in [1_000usize, 100_000] {
        group.throughput(Throughput::Elements(n_instances as u64));

        let single = scores(1, n_instances);
        let labels: Vec<f32> = (0..n_instances).map(|i| (i % 2) as f32).collect();
        let mut regression =
            MetricSet::from_names(["rmse", "r2", "error"], RegistryMode::Strict).unwrap();
        group.bench_with_input(BenchmarkId::new("single_output", n_instances), &n_instances, |b, _| {
            b.iter(|| {
                regression
                    .add_eval(ScoresView::from_array(black_box(single.view())), black_box(&labels))
                    .unwrap()
            })
        });

        let multi = scores(10, n_instances);
        let classes: Vec<f32> = (0..n_instances).map(|i| (i % 10) as f32).collect();
        let mut classification = MetricSet::from_names(["error"], RegistryMode::Strict).unwrap();
        group.bench_with_input(BenchmarkId::new("ten_classes", n_instances), &n_instances, |b, _| {
            b.iter(|| {
                classification
                    .add_eval(ScoresView::from_array(black_box(multi.view())), black_box(&classes))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_eval);
criterion_main!(benches);

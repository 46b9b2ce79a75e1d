mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use disc_scatter::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const EXTENTS: [f32; 4] = [256.0, 512.0, 1024.0, 2048.0];

fn scatter_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter/icons");

    for &extent in &EXTENTS {
        let options = ScatterOptions::new()
            .with_bounds(Bounds::new(0.0, 0.0, extent, extent))
            .with_sizes(vec![8.0, 12.0, 24.0])
            .with_min_dist(10.0)
            .with_max_tries(30)
            .with_is_circle(false);

        let mut rng_est = StdRng::seed_from_u64(0xA11CE_u64 ^ (extent as u64));
        let expected = scatter(&options, &mut rng_est).placed_count();
        group.throughput(common::elements_throughput(expected));

        let mut rng = StdRng::seed_from_u64(0xA11CE_u64 ^ (extent as u64) ^ 0xE57);

        group.bench_with_input(BenchmarkId::from_parameter(extent), &extent, |b, _| {
            b.iter(|| {
                let report = scatter(&options, &mut rng);
                black_box(report.samples.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = scatter_benches
}
criterion_main!(benches);

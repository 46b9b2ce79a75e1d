use disc_scatter::prelude::*;
use disc_scatter_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    init_tracing();

    let cases = [
        (
            "complete",
            ScatterOptions::new()
                .with_bounds(Bounds::new(0.0, 0.0, 300.0, 200.0))
                .with_size(8.0)
                .with_min_dist(12.0)
                .with_max_tries(30),
        ),
        (
            "defaults",
            ScatterOptions::new().with_bounds(Bounds::new(0.0, 0.0, 300.0, 200.0)),
        ),
        (
            "invalid",
            ScatterOptions::new()
                .with_bounds(Bounds::new(0.0, 0.0, 300.0, 200.0))
                .with_sizes(vec![6.0, -1.0])
                .with_min_dist(f32::NAN)
                .with_max_tries(0),
        ),
        (
            "too-small",
            ScatterOptions::new()
                .with_bounds(Bounds::new(0.0, 0.0, 15.0, 15.0))
                .with_size(40.0)
                .with_min_dist(4.0)
                .with_max_tries(30),
        ),
    ];

    for (name, options) in cases {
        let mut rng = StdRng::seed_from_u64(1);
        let report = scatter(&options, &mut rng);

        println!("{name}: {} samples", report.placed_count());
        for d in &report.diagnostics {
            println!("  {d}");
        }
    }
}

use disc_scatter::prelude::*;
use disc_scatter_examples::{init_tracing, render_samples_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Bounds::new(0.0, 0.0, 800.0, 600.0);
    let sizes = vec![12.0, 20.0, 32.0];

    let options = ScatterOptions::new()
        .with_bounds(bounds)
        .with_sizes(sizes.clone())
        .with_min_dist(8.0)
        .with_max_tries(30)
        .with_footprint(Footprint::Square);

    let mut rng = StdRng::seed_from_u64(42);
    let report = scatter(&options, &mut rng);

    for (size_index, size) in sizes.iter().enumerate() {
        let count = report
            .placed()
            .filter(|s| s.size_index == size_index)
            .count();
        println!("size {size:>4}: {count} icons");
    }

    let config = RenderConfig::new((800, 600), bounds);
    render_samples_to_png(
        report.placed(),
        &sizes,
        Footprint::Square,
        &config,
        "icons-mixed-sizes.png",
    )?;
    Ok(())
}

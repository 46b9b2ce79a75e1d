use disc_scatter::prelude::*;
use disc_scatter_examples::{init_tracing, render_samples_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Bounds::new(0.0, 0.0, 500.0, 500.0);
    let sizes = [10.0, 18.0];
    let config = RenderConfig::new((1000, 1000), bounds).with_exclusion(true);

    for footprint in [Footprint::Circle, Footprint::Square] {
        let sampling = PoissonDiscSampling::new(6.0, 30).with_footprint(footprint);

        let mut rng = StdRng::seed_from_u64(7);
        let grid = sampling.try_generate(&bounds, &sizes, &mut rng)?;

        println!(
            "{footprint:?}: {} samples in a {}x{} grid (cell {:.2}, neighbour range {})",
            grid.len(),
            grid.cols(),
            grid.rows(),
            grid.cell_size(),
            grid.neighbor_range()
        );

        let out = format!("circles-vs-squares-{}.png", format!("{footprint:?}").to_lowercase());
        render_samples_to_png(grid.samples(), &sizes, footprint, &config, out)?;
    }

    Ok(())
}

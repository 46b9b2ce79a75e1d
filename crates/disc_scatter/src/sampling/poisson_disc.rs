//! Size-aware Poisson-disc sampling (Bridson's algorithm on a uniform grid).
use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Footprint, Sample};
use crate::sampling::grid::SampleGrid;
use crate::sampling::{rand01, rand_index};

pub const DEFAULT_MIN_DIST: f32 = 20.0;
pub const DEFAULT_MAX_TRIES: usize = 30;

/// Poisson-disc sampling of items with heterogeneous sizes.
///
/// Every pair of placed samples keeps at least `min_dist` between their exclusion
/// circles, and every sample lies fully inside the bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonDiscSampling {
    /// Minimum gap between the exclusion circles of two samples.
    pub min_dist: f32,
    /// Candidates drawn around an active sample per iteration.
    pub max_tries: usize,
    /// Shape used to derive each sample's exclusion radius from its size.
    pub footprint: Footprint,
    /// Optional cap on outer iterations. `None` runs until the active list is empty.
    pub max_iterations: Option<usize>,
}

impl Default for PoissonDiscSampling {
    fn default() -> Self {
        Self {
            min_dist: DEFAULT_MIN_DIST,
            max_tries: DEFAULT_MAX_TRIES,
            footprint: Footprint::Square,
            max_iterations: None,
        }
    }
}

impl PoissonDiscSampling {
    /// Create a sampler with the given gap and retry budget and square footprints.
    pub fn new(min_dist: f32, max_tries: usize) -> Self {
        Self {
            min_dist,
            max_tries,
            ..Default::default()
        }
    }

    /// Sets the item footprint.
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Caps the number of outer iterations.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Runs the sampler and returns the filled grid.
    ///
    /// Degenerate bounds yield an empty grid without drawing any randomness.
    /// Fails with [`Error::Unplaceable`] when the first item does not fit inside
    /// `bounds`, and with [`Error::InvalidConfig`] for an empty size list or a grid
    /// too large to allocate.
    pub fn try_generate(
        &self,
        bounds: &Bounds,
        sizes: &[f32],
        rng: &mut dyn Rng,
    ) -> Result<SampleGrid> {
        if sizes.is_empty() {
            return Err(Error::InvalidConfig("size list must not be empty".into()));
        }
        if bounds.is_degenerate() {
            return Ok(SampleGrid::empty());
        }

        PoissonDiscSampler::new(self, *bounds, sizes)?.run(rng)
    }

    /// Runs the sampler and returns the grid cells, `None` marking empty cells.
    ///
    /// Any failure of [`PoissonDiscSampling::try_generate`] yields an empty sequence.
    pub fn generate(
        &self,
        bounds: &Bounds,
        sizes: &[f32],
        rng: &mut dyn Rng,
    ) -> Vec<Option<Sample>> {
        self.try_generate(bounds, sizes, rng)
            .map(SampleGrid::into_cells)
            .unwrap_or_default()
    }
}

/// One-shot sampling with flag-style parameters. See [`PoissonDiscSampling::generate`].
pub fn sample(
    bounds: &Bounds,
    sizes: &[f32],
    min_dist: f32,
    max_tries: usize,
    is_circle: bool,
    rng: &mut dyn Rng,
) -> Vec<Option<Sample>> {
    PoissonDiscSampling::new(min_dist, max_tries)
        .with_footprint(Footprint::from_is_circle(is_circle))
        .generate(bounds, sizes, rng)
}

struct PoissonDiscSampler<'a> {
    bounds: Bounds,
    sizes: &'a [f32],
    min_dist: f32,
    max_tries: usize,
    footprint: Footprint,
    max_iterations: Option<usize>,
    grid: SampleGrid,
    /// Cell indices of samples that may still spawn neighbours.
    active: Vec<usize>,
}

impl<'a> PoissonDiscSampler<'a> {
    fn new(config: &PoissonDiscSampling, bounds: Bounds, sizes: &'a [f32]) -> Result<Self> {
        debug_assert!(!sizes.is_empty());
        debug_assert!(config.min_dist >= 0.0);

        let (min_size, max_size) = sizes
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        let min_radius = config.footprint.radius_for(min_size);
        let max_radius = config.footprint.radius_for(max_size);

        // Two samples are at least `min_dist + 2 * min_radius` apart, which is the cell diagonal.
        let cell_size = (config.min_dist + 2.0 * min_radius) / SQRT_2;
        let reach = (config.min_dist + 2.0 * max_radius) / cell_size;
        let neighbor_range = if reach.is_finite() {
            reach.ceil() as usize
        } else {
            0
        };

        Ok(Self {
            bounds,
            sizes,
            min_dist: config.min_dist,
            max_tries: config.max_tries,
            footprint: config.footprint,
            max_iterations: config.max_iterations,
            grid: SampleGrid::new(&bounds, cell_size, neighbor_range)?,
            active: Vec::new(),
        })
    }

    fn in_bounds(&self, sample: &Sample) -> bool {
        self.grid.cell_of(sample.position).is_some()
            && self.bounds.contains_disc(sample.position, sample.radius)
    }

    fn initial_sample(&self, rng: &mut dyn Rng) -> Sample {
        let size = self.sizes[0];
        let span = self.bounds.extent - Vec2::splat(2.0 * size);
        let position = Vec2::new(
            self.bounds.x() + size + rand01(rng) * span.x,
            self.bounds.y() + size + rand01(rng) * span.y,
        );
        Sample::new(position, self.footprint.radius_for(size), 0)
    }

    /// Candidate in the annulus one to two gaps away from `seed`.
    fn candidate_around(&self, seed: &Sample, rng: &mut dyn Rng) -> Sample {
        let size_index = rand_index(rng, self.sizes.len());
        let size = self.sizes[size_index];
        let radius = self.footprint.radius_for(size);

        let angle = rand01(rng) * TAU;
        let inner = self.min_dist + seed.radius + size;
        let distance = inner + rand01(rng) * self.min_dist;

        let position = seed.position + Vec2::from_angle(angle) * distance;
        Sample::new(position, radius, size_index)
    }

    fn place(&mut self, sample: Sample) -> bool {
        match self.grid.insert(sample) {
            Some(index) => {
                self.active.push(index);
                true
            }
            None => false,
        }
    }

    fn run(mut self, rng: &mut dyn Rng) -> Result<SampleGrid> {
        let first = self.initial_sample(rng);
        if !self.in_bounds(&first) || !self.place(first) {
            return Err(Error::Unplaceable {
                size: self.sizes[0],
                width: self.bounds.width(),
                height: self.bounds.height(),
            });
        }

        let mut iterations = 0usize;
        while !self.active.is_empty() {
            if self.max_iterations.is_some_and(|limit| iterations >= limit) {
                self.grid.set_truncated(true);
                break;
            }
            iterations += 1;

            let slot = rand_index(rng, self.active.len());
            let Some(seed) = self.grid.get(self.active[slot]).copied() else {
                self.active.swap_remove(slot);
                continue;
            };

            // Keep drawing after a hit: one seed may spawn several children per pass.
            let mut spawned = false;
            for _ in 0..self.max_tries {
                let candidate = self.candidate_around(&seed, rng);
                if self.in_bounds(&candidate)
                    && self.grid.is_clear(&candidate, self.min_dist)
                    && self.place(candidate)
                {
                    spawned = true;
                }
            }

            if !spawned {
                self.active.swap_remove(slot);
            }
        }

        Ok(self.grid)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const EPS: f32 = 1e-3;

    fn placed(cells: &[Option<Sample>]) -> Vec<Sample> {
        cells.iter().flatten().copied().collect()
    }

    fn assert_spacing(samples: &[Sample], min_dist: f32) {
        for i in 0..samples.len() {
            for j in (i + 1)..samples.len() {
                let (a, b) = (&samples[i], &samples[j]);
                let required = min_dist + a.radius + b.radius;
                assert!(
                    a.distance_to(b) >= required - EPS,
                    "samples {:?} and {:?} are {} apart, need {}",
                    a,
                    b,
                    a.distance_to(b),
                    required
                );
            }
        }
    }

    fn assert_inside(samples: &[Sample], bounds: &Bounds) {
        for s in samples {
            assert!(s.x() - s.radius >= bounds.x() - EPS);
            assert!(s.x() + s.radius <= bounds.x() + bounds.width() + EPS);
            assert!(s.y() - s.radius >= bounds.y() - EPS);
            assert!(s.y() + s.radius <= bounds.y() + bounds.height() + EPS);
        }
    }

    #[test]
    fn square_scenario_respects_spacing() {
        let mut rng = StdRng::seed_from_u64(123);
        let bounds = Bounds::new(0.0, 0.0, 500.0, 500.0);
        let cells = sample(&bounds, &[5.0], 20.0, 30, false, &mut rng);

        assert!(!cells.is_empty());
        let samples = placed(&cells);
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| s.radius > 0.0));
        assert_spacing(&samples, 20.0);
        assert_inside(&samples, &bounds);
    }

    #[test]
    fn mixed_circles_in_offset_bounds_stay_inside_and_apart() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(-120.0, 40.0, 300.0, 200.0);
        let sizes = [4.0, 9.0, 16.0];
        let sampling = PoissonDiscSampling::new(6.0, 30).with_footprint(Footprint::Circle);
        let grid = sampling
            .try_generate(&bounds, &sizes, &mut rng)
            .expect("first item fits");

        let samples: Vec<Sample> = grid.samples().copied().collect();
        assert!(samples.len() > 10);
        assert_spacing(&samples, 6.0);
        assert_inside(&samples, &bounds);

        for s in &samples {
            assert!(s.size_index < sizes.len());
            assert_eq!(s.radius, Footprint::Circle.radius_for(sizes[s.size_index]));
        }
    }

    #[test]
    fn each_sample_sits_in_its_own_cell() {
        let mut rng = StdRng::seed_from_u64(99);
        let bounds = Bounds::new(0.0, 0.0, 400.0, 300.0);
        let grid = PoissonDiscSampling::new(3.0, 30)
            .try_generate(&bounds, &[2.0, 6.0, 12.0], &mut rng)
            .expect("first item fits");

        let cell = grid.cell_size();
        for (index, slot) in grid.cells().iter().enumerate() {
            if let Some(s) = slot {
                let col = (s.x() / cell).floor() as usize;
                let row = (s.y() / cell).floor() as usize;
                assert_eq!(col + row * grid.cols(), index);
            }
        }
        assert_eq!(grid.len(), grid.samples().count());
    }

    #[test]
    fn degenerate_bounds_yield_empty_sequence() {
        let mut rng = StdRng::seed_from_u64(1);
        let zero = Bounds::new(0.0, 0.0, 0.0, 0.0);
        assert!(sample(&zero, &[10.0], 20.0, 30, false, &mut rng).is_empty());

        let negative = Bounds::new(0.0, 0.0, -10.0, 50.0);
        let grid = PoissonDiscSampling::default()
            .try_generate(&negative, &[10.0], &mut rng)
            .expect("degenerate bounds are not an error");
        assert!(grid.is_empty());
        assert!(grid.cells().is_empty());
    }

    #[test]
    fn exact_fit_places_single_centered_sample() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(0.0, 0.0, 4.0, 4.0);
        let cells = sample(&bounds, &[2.0], 0.0, 30, true, &mut rng);

        let samples = placed(&cells);
        assert_eq!(samples.len(), 1);
        assert!((samples[0].x() - 2.0).abs() < EPS);
        assert!((samples[0].y() - 2.0).abs() < EPS);
        assert_eq!(samples[0].radius, 2.0);
    }

    #[test]
    fn exact_fit_with_default_gap_places_single_sample() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = PoissonDiscSampling::new(DEFAULT_MIN_DIST, 30)
            .with_footprint(Footprint::Circle)
            .try_generate(&Bounds::new(0.0, 0.0, 4.0, 4.0), &[2.0], &mut rng)
            .expect("item fits exactly");

        assert_eq!(grid.len(), 1);
        let s = grid.samples().next().expect("one sample");
        assert!((s.x() - 2.0).abs() < EPS);
        assert!((s.y() - 2.0).abs() < EPS);
    }

    #[test]
    fn roomy_bounds_never_fail_and_reach_far_edges() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cells = sample(&bounds, &[5.0], 20.0, 30, true, &mut rng);
            let samples = placed(&cells);
            assert!(!samples.is_empty(), "seed {seed} produced no samples");
            assert_spacing(&samples, 20.0);
            assert_inside(&samples, &bounds);

            for s in &samples {
                max_x = max_x.max(s.x());
                max_y = max_y.max(s.y());
            }
        }

        // Centers may legally reach 95; a whole-cell grid would stop near 84.8.
        assert!(max_x > 88.0, "max x {max_x}");
        assert!(max_y > 88.0, "max y {max_y}");
    }

    #[test]
    fn huge_grid_is_a_config_error() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = PoissonDiscSampling::new(0.0, 30)
            .with_footprint(Footprint::Circle)
            .try_generate(&Bounds::new(0.0, 0.0, 1.0e12, 1.0e12), &[1.0e-4], &mut rng)
            .expect_err("grid cannot be allocated");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn oversized_item_is_unplaceable() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(0.0, 0.0, 15.0, 15.0);
        let sampling = PoissonDiscSampling::new(1.0, 30).with_footprint(Footprint::Circle);

        let err = sampling
            .try_generate(&bounds, &[10.0], &mut rng)
            .expect_err("item larger than bounds");
        assert!(matches!(err, Error::Unplaceable { size, .. } if size == 10.0));

        assert!(sampling.generate(&bounds, &[10.0], &mut rng).is_empty());
    }

    #[test]
    fn empty_size_list_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = PoissonDiscSampling::default()
            .try_generate(&Bounds::new(0.0, 0.0, 10.0, 10.0), &[], &mut rng)
            .expect_err("no sizes");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn determinism_for_same_seed() {
        let bounds = Bounds::new(0.0, 0.0, 200.0, 200.0);
        let sampling = PoissonDiscSampling::new(5.0, 20);

        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = sampling.generate(&bounds, &[3.0, 5.0], &mut rng_a);
        let b = sampling.generate(&bounds, &[3.0, 5.0], &mut rng_b);
        assert_eq!(a, b);

        let mut rng_c = StdRng::seed_from_u64(456);
        let c = sampling.generate(&bounds, &[3.0, 5.0], &mut rng_c);
        assert_ne!(a, c);
    }

    #[test]
    fn iteration_cap_truncates_run() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(0.0, 0.0, 500.0, 500.0);
        let grid = PoissonDiscSampling::new(10.0, 30)
            .with_max_iterations(Some(1))
            .try_generate(&bounds, &[4.0], &mut rng)
            .expect("first item fits");

        assert!(grid.truncated());
        assert!(grid.len() > 1 && grid.len() <= 1 + 30);
    }

    #[test]
    fn uncapped_run_is_not_truncated() {
        let mut rng = StdRng::seed_from_u64(12);
        let grid = PoissonDiscSampling::new(10.0, 30)
            .try_generate(&Bounds::new(0.0, 0.0, 100.0, 100.0), &[4.0], &mut rng)
            .expect("first item fits");
        assert!(!grid.truncated());
        assert!(grid.len() > 1);
    }

    #[test]
    fn single_seed_can_spawn_several_children() {
        // A lone seed with a wide budget fills its annulus in one pass.
        let mut rng = StdRng::seed_from_u64(21);
        let grid = PoissonDiscSampling::new(2.0, 200)
            .with_footprint(Footprint::Circle)
            .with_max_iterations(Some(1))
            .try_generate(&Bounds::new(0.0, 0.0, 400.0, 400.0), &[1.0], &mut rng)
            .expect("first item fits");
        assert!(grid.len() > 2);
    }
}

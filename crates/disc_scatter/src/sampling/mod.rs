//! Size-aware Poisson-disc sampling over a rectangular region.
//!
//! [`poisson_disc`] holds the sampler itself; [`grid`] is the uniform spatial grid
//! it uses for neighbour lookups and returns as its result. Randomness is always
//! injected as a [`Rng`], so a seeded generator makes every run reproducible.
use rand::Rng;

pub mod grid;
pub mod poisson_disc;

pub use grid::SampleGrid;
pub use poisson_disc::{sample, PoissonDiscSampling};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform index into a collection of `len` elements.
///
/// `rand01` can round up to exactly 1.0, so the result is clamped to the last index.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

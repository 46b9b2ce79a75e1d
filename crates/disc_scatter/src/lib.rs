#![forbid(unsafe_code)]
//! disc_scatter: spread non-overlapping circles and squares of mixed sizes across a rectangle.
//!
//! Modules:
//! - geometry: bounds, item footprints and placed samples
//! - sampling: size-aware Poisson-disc sampler and the spatial grid it fills
//! - scatter: option resolution with diagnostics and the one-call entry point
//!
//! For examples, see the `disc_scatter_examples` crate.
pub mod error;
pub mod geometry;
pub mod sampling;
pub mod scatter;

/// Convenient re-exports for common types. Import with `use disc_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Bounds, Footprint, Sample};
    pub use crate::sampling::{sample, PoissonDiscSampling, SampleGrid};
    pub use crate::scatter::diagnostics::{Diagnostic, Diagnostics, Level};
    pub use crate::scatter::options::{Resolved, ScatterOptions};
    pub use crate::scatter::{scatter, ScatterReport};
}

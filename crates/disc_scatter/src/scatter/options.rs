//! Caller-facing scatter options and their resolution into sampler parameters.
use crate::geometry::{Bounds, Footprint};
use crate::sampling::poisson_disc::{DEFAULT_MAX_TRIES, DEFAULT_MIN_DIST};
use crate::sampling::PoissonDiscSampling;
use crate::scatter::diagnostics::Diagnostics;

/// Item size used when neither `sizes` nor `size` is usable.
pub const DEFAULT_SIZE: f32 = 10.0;

/// Loosely specified scatter options. Every field may be left unset.
///
/// [`ScatterOptions::resolve`] turns them into sampler parameters, defaulting
/// whatever is missing or invalid and reporting it as a diagnostic.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ScatterOptions {
    /// Placement region.
    pub bounds: Option<Bounds>,
    /// Sizes of the placeable items. Takes precedence over `size`.
    pub sizes: Option<Vec<f32>>,
    /// Shorthand for a single item size.
    pub size: Option<f32>,
    /// Minimum gap between items.
    pub min_dist: Option<f32>,
    /// Retry budget per active sample.
    pub max_tries: Option<usize>,
    /// Item shape. Defaults to squares without a diagnostic.
    pub footprint: Option<Footprint>,
    /// Optional outer-iteration cap.
    pub max_iterations: Option<usize>,
}

/// Fully resolved parameters ready for the sampler.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub bounds: Bounds,
    pub sizes: Vec<f32>,
    pub sampling: PoissonDiscSampling,
    pub diagnostics: Diagnostics,
}

impl ScatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<f32>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = Some(min_dist);
        self
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = Some(max_tries);
        self
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = Some(footprint);
        self
    }

    /// Sets the footprint from an `is_circle` flag.
    pub fn with_is_circle(self, is_circle: bool) -> Self {
        self.with_footprint(Footprint::from_is_circle(is_circle))
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Resolve into sampler parameters.
    ///
    /// Absent values fall back to their defaults with a warning; present but invalid
    /// values fall back with an error. Bounds with zero or negative extent are kept
    /// as given: they are valid input that simply produces no samples.
    pub fn resolve(&self) -> Resolved {
        let mut diagnostics = Diagnostics::new();

        let bounds = match self.bounds {
            None => {
                diagnostics.warn("bounds", "no bounds given; using an empty region");
                Bounds::empty()
            }
            Some(bounds) if !bounds.is_finite() => {
                diagnostics.error(
                    "bounds",
                    format!("bounds {bounds:?} are not finite; using an empty region"),
                );
                Bounds::empty()
            }
            Some(bounds) => bounds,
        };

        let sizes = self.resolve_sizes(&mut diagnostics);

        let min_dist = match self.min_dist {
            None => {
                diagnostics.warn(
                    "min_dist",
                    format!("no min_dist given; using {DEFAULT_MIN_DIST}"),
                );
                DEFAULT_MIN_DIST
            }
            Some(v) if !v.is_finite() || v < 0.0 => {
                diagnostics.error(
                    "min_dist",
                    format!("min_dist {v} must be finite and >= 0; using {DEFAULT_MIN_DIST}"),
                );
                DEFAULT_MIN_DIST
            }
            Some(v) => v,
        };

        let max_tries = match self.max_tries {
            None => {
                diagnostics.warn(
                    "max_tries",
                    format!("no max_tries given; using {DEFAULT_MAX_TRIES}"),
                );
                DEFAULT_MAX_TRIES
            }
            Some(0) => {
                diagnostics.error(
                    "max_tries",
                    format!("max_tries must be >= 1; using {DEFAULT_MAX_TRIES}"),
                );
                DEFAULT_MAX_TRIES
            }
            Some(v) => v,
        };

        let sampling = PoissonDiscSampling::new(min_dist, max_tries)
            .with_footprint(self.footprint.unwrap_or_default())
            .with_max_iterations(self.max_iterations);

        Resolved {
            bounds,
            sizes,
            sampling,
            diagnostics,
        }
    }

    fn resolve_sizes(&self, diagnostics: &mut Diagnostics) -> Vec<f32> {
        let valid = |s: f32| s.is_finite() && s > 0.0;

        if let Some(sizes) = &self.sizes {
            if self.size.is_some() {
                diagnostics.warn("size", "both sizes and size given; ignoring size");
            }
            if sizes.is_empty() {
                diagnostics.error(
                    "sizes",
                    format!("size list is empty; using [{DEFAULT_SIZE}]"),
                );
                return vec![DEFAULT_SIZE];
            }
            if let Some(bad) = sizes.iter().copied().find(|&s| !valid(s)) {
                diagnostics.error(
                    "sizes",
                    format!("size {bad} must be finite and > 0; using [{DEFAULT_SIZE}]"),
                );
                return vec![DEFAULT_SIZE];
            }
            return sizes.clone();
        }

        match self.size {
            Some(size) if valid(size) => vec![size],
            Some(size) => {
                diagnostics.error(
                    "size",
                    format!("size {size} must be finite and > 0; using {DEFAULT_SIZE}"),
                );
                vec![DEFAULT_SIZE]
            }
            None => {
                diagnostics.warn("size", format!("no size given; using {DEFAULT_SIZE}"));
                vec![DEFAULT_SIZE]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scatter::diagnostics::Level;

    fn complete() -> ScatterOptions {
        ScatterOptions::new()
            .with_bounds(Bounds::new(0.0, 0.0, 100.0, 50.0))
            .with_sizes(vec![4.0, 8.0])
            .with_min_dist(5.0)
            .with_max_tries(12)
            .with_is_circle(true)
    }

    #[test]
    fn complete_options_resolve_without_diagnostics() {
        let resolved = complete().resolve();
        assert!(resolved.diagnostics.is_empty());
        assert_eq!(resolved.bounds, Bounds::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(resolved.sizes, vec![4.0, 8.0]);
        assert_eq!(resolved.sampling.min_dist, 5.0);
        assert_eq!(resolved.sampling.max_tries, 12);
        assert_eq!(resolved.sampling.footprint, Footprint::Circle);
        assert_eq!(resolved.sampling.max_iterations, None);
    }

    #[test]
    fn absent_values_default_with_warnings() {
        let resolved = ScatterOptions::new().resolve();
        assert_eq!(resolved.sampling.min_dist, DEFAULT_MIN_DIST);
        assert_eq!(resolved.sampling.max_tries, DEFAULT_MAX_TRIES);
        assert_eq!(resolved.sampling.footprint, Footprint::Square);
        assert_eq!(resolved.sizes, vec![DEFAULT_SIZE]);
        assert!(resolved.bounds.is_degenerate());

        assert!(!resolved.diagnostics.has_errors());
        let fields: Vec<&str> = resolved.diagnostics.iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["bounds", "size", "min_dist", "max_tries"]);
    }

    #[test]
    fn invalid_values_default_with_errors() {
        let resolved = complete()
            .with_min_dist(-1.0)
            .with_max_tries(0)
            .with_sizes(vec![3.0, 0.0])
            .resolve();

        assert_eq!(resolved.sampling.min_dist, DEFAULT_MIN_DIST);
        assert_eq!(resolved.sampling.max_tries, DEFAULT_MAX_TRIES);
        assert_eq!(resolved.sizes, vec![DEFAULT_SIZE]);
        assert_eq!(resolved.diagnostics.len(), 3);
        assert!(resolved.diagnostics.iter().all(|d| d.level == Level::Error));
    }

    #[test]
    fn nan_min_dist_and_bounds_are_errors() {
        let resolved = complete()
            .with_min_dist(f32::NAN)
            .with_bounds(Bounds::new(0.0, f32::INFINITY, 10.0, 10.0))
            .resolve();
        assert_eq!(resolved.diagnostics.for_field("min_dist").count(), 1);
        assert_eq!(resolved.diagnostics.for_field("bounds").count(), 1);
        assert_eq!(resolved.bounds, Bounds::empty());
    }

    #[test]
    fn empty_size_list_is_an_error() {
        let resolved = complete().with_sizes(Vec::new()).resolve();
        assert_eq!(resolved.sizes, vec![DEFAULT_SIZE]);
        assert!(resolved.diagnostics.has_errors());
    }

    #[test]
    fn single_size_shorthand() {
        let mut options = complete();
        options.sizes = None;
        let resolved = options.clone().with_size(7.5).resolve();
        assert_eq!(resolved.sizes, vec![7.5]);
        assert!(resolved.diagnostics.is_empty());

        let resolved = options.with_size(-2.0).resolve();
        assert_eq!(resolved.sizes, vec![DEFAULT_SIZE]);
        assert_eq!(resolved.diagnostics.for_field("size").count(), 1);
        assert!(resolved.diagnostics.has_errors());
    }

    #[test]
    fn sizes_take_precedence_over_size() {
        let resolved = complete().with_size(99.0).resolve();
        assert_eq!(resolved.sizes, vec![4.0, 8.0]);
        let d: Vec<_> = resolved.diagnostics.for_field("size").collect();
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].level, Level::Warning);
    }

    #[test]
    fn degenerate_bounds_pass_through_silently() {
        let resolved = complete()
            .with_bounds(Bounds::new(0.0, 0.0, 0.0, 0.0))
            .resolve();
        assert!(resolved.diagnostics.is_empty());
        assert!(resolved.bounds.is_degenerate());
    }

    #[test]
    fn iteration_cap_is_forwarded() {
        let resolved = complete().with_max_iterations(3).resolve();
        assert_eq!(resolved.sampling.max_iterations, Some(3));
    }
}

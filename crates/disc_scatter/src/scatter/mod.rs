//! High-level entry point: resolve loose options, run the sampler, report diagnostics.
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::geometry::Sample;
use crate::scatter::diagnostics::{Diagnostics, Level};
use crate::scatter::options::{Resolved, ScatterOptions};

pub mod diagnostics;
pub mod options;

/// Outcome of [`scatter`].
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ScatterReport {
    /// Grid cells in `col + row * cols` order; `None` marks an empty cell.
    pub samples: Vec<Option<Sample>>,
    /// Everything that was defaulted or went wrong.
    pub diagnostics: Diagnostics,
    /// True if the run stopped at the iteration cap.
    pub truncated: bool,
}

impl ScatterReport {
    /// Iterate over placed samples, skipping empty cells.
    pub fn placed(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter().flatten()
    }

    pub fn placed_count(&self) -> usize {
        self.placed().count()
    }
}

/// Resolve `options` and scatter samples with randomness from `rng`.
///
/// Never fails: invalid options are defaulted and an unplaceable first item yields an
/// empty result. Both are recorded in [`ScatterReport::diagnostics`] and logged.
pub fn scatter(options: &ScatterOptions, rng: &mut dyn Rng) -> ScatterReport {
    let Resolved {
        bounds,
        sizes,
        sampling,
        mut diagnostics,
    } = options.resolve();

    debug!(
        ?bounds,
        ?sizes,
        min_dist = sampling.min_dist,
        max_tries = sampling.max_tries,
        "Scattering samples"
    );

    let report = match sampling.try_generate(&bounds, &sizes, rng) {
        Ok(grid) => ScatterReport {
            truncated: grid.truncated(),
            samples: grid.into_cells(),
            diagnostics: Diagnostics::new(),
        },
        Err(err @ Error::Unplaceable { .. }) => {
            diagnostics.error("bounds", err.to_string());
            ScatterReport::default()
        }
        Err(err) => {
            diagnostics.error("options", err.to_string());
            ScatterReport::default()
        }
    };

    for d in &diagnostics {
        match d.level {
            Level::Warning => warn!(field = d.field, "{}", d.message),
            Level::Error => error!(field = d.field, "{}", d.message),
        }
    }

    let report = ScatterReport {
        diagnostics,
        ..report
    };

    if report.truncated {
        warn!("Iteration cap reached; layout may be incomplete");
    }
    info!(
        "Placed {} samples in {} cells.",
        report.placed_count(),
        report.samples.len()
    );

    report
}

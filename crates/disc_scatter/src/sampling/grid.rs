//! Uniform spatial grid holding at most one sample per cell.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Sample};

/// Dense grid of optional samples, indexed by `col + row * cols`.
///
/// The grid is both the neighbour-lookup structure used while sampling and the
/// result handed back to callers: unfilled cells stay `None`. Cells are measured
/// from the bounds origin. The last column and row may extend past the bounds;
/// callers check the rectangle itself separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    neighbor_range: usize,
    cells: Vec<Option<Sample>>,
    len: usize,
    truncated: bool,
}

impl SampleGrid {
    /// Create an empty grid covering `bounds`.
    ///
    /// `neighbor_range` is the number of cells scanned outward on each axis by
    /// [`SampleGrid::is_clear`]. Fails when the cell count does not fit in memory.
    pub fn new(bounds: &Bounds, cell_size: f32, neighbor_range: usize) -> Result<Self> {
        let valid = cell_size.is_finite() && cell_size > 0.0 && !bounds.is_degenerate();
        let (cols, rows) = if valid {
            (
                (bounds.width() / cell_size).ceil() as usize,
                (bounds.height() / cell_size).ceil() as usize,
            )
        } else {
            (0, 0)
        };

        let count = cols
            .checked_mul(rows)
            .filter(|&n| {
                n.checked_mul(size_of::<Option<Sample>>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "grid of {cols}x{rows} cells (cell size {cell_size}) is too large"
                ))
            })?;

        Ok(Self {
            origin: bounds.origin,
            cell_size,
            cols,
            rows,
            neighbor_range,
            cells: vec![None; count],
            len: 0,
            truncated: false,
        })
    }

    /// A grid with no cells.
    pub fn empty() -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: 0.0,
            cols: 0,
            rows: 0,
            neighbor_range: 0,
            cells: Vec::new(),
            len: 0,
            truncated: false,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn neighbor_range(&self) -> usize {
        self.neighbor_range
    }

    /// True if sampling stopped at an iteration cap rather than running dry.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn set_truncated(&mut self, truncated: bool) {
        self.truncated = truncated;
    }

    /// Column and row of the cell containing `position`, or `None` outside the grid.
    pub fn cell_of(&self, position: Vec2) -> Option<(usize, usize)> {
        if self.cells.is_empty() {
            return None;
        }

        let local = (position - self.origin) / self.cell_size;
        if !local.is_finite() || local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let col = local.x.floor() as usize;
        let row = local.y.floor() as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    #[inline]
    pub fn index_of(&self, col: usize, row: usize) -> usize {
        col + row * self.cols
    }

    /// Sample stored at a flat cell index.
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Store `sample` in its cell and return the cell index.
    ///
    /// Returns `None` (leaving the grid untouched) when the position is outside the
    /// grid or the cell is already taken.
    pub fn insert(&mut self, sample: Sample) -> Option<usize> {
        let (col, row) = self.cell_of(sample.position)?;
        let index = self.index_of(col, row);
        let slot = &mut self.cells[index];
        if slot.is_some() {
            return None;
        }
        *slot = Some(sample);
        self.len += 1;
        Some(index)
    }

    /// Neighbour test: `candidate` keeps at least `min_dist` of clearance to every
    /// sample within `neighbor_range` cells of its own cell.
    ///
    /// Candidates outside the grid are never clear.
    pub fn is_clear(&self, candidate: &Sample, min_dist: f32) -> bool {
        let Some((col, row)) = self.cell_of(candidate.position) else {
            return false;
        };

        let range = self.neighbor_range;
        let col_start = col.saturating_sub(range);
        let col_end = col.saturating_add(range).saturating_add(1).min(self.cols);
        let row_start = row.saturating_sub(range);
        let row_end = row.saturating_add(range).saturating_add(1).min(self.rows);

        for r in row_start..row_end {
            for c in col_start..col_end {
                if let Some(existing) = &self.cells[self.index_of(c, r)] {
                    let required = min_dist + candidate.radius + existing.radius;
                    let d2 = candidate.position.distance_squared(existing.position);
                    if d2 < required * required {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Iterate over placed samples in cell order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.cells.iter().flatten()
    }

    /// Number of placed samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cells(&self) -> &[Option<Sample>] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Option<Sample>> {
        self.cells
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::empty()
    }
}

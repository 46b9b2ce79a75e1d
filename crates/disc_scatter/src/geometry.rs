//! Placement region, item footprints and placed samples.
use glam::Vec2;
use mint::{Point2, Vector2};

/// Axis-aligned placement region given by its minimum corner and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Minimum corner (x, y) of the region.
    pub origin: Vec2,
    /// Width and height of the region.
    pub extent: Vec2,
}

impl Bounds {
    /// Create bounds from origin and extent components.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            extent: Vec2::new(width, height),
        }
    }

    /// Bounds anchored at (0, 0) with the given extent.
    pub fn from_extent(extent: Vector2<f32>) -> Self {
        Self {
            origin: Vec2::ZERO,
            extent: Vec2::from(extent),
        }
    }

    /// An empty region at the origin.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.extent.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.extent.y
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.extent
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.extent.is_finite()
    }

    /// True when nothing can be placed: zero, negative or non-finite extent.
    pub fn is_degenerate(&self) -> bool {
        !self.extent.is_finite() || self.extent.x <= 0.0 || self.extent.y <= 0.0
    }

    /// Returns whether a disc of `radius` around `center` lies fully inside the region.
    /// Edges are inclusive.
    pub fn contains_disc(&self, center: Vec2, radius: f32) -> bool {
        let min = self.min();
        let max = self.max();
        center.x - radius >= min.x
            && center.x + radius <= max.x
            && center.y - radius >= min.y
            && center.y + radius <= max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shape of a placed item, which determines its exclusion radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Footprint {
    /// `size` is the circle radius.
    Circle,
    /// `size` is the side length; the exclusion circle encloses the whole square.
    #[default]
    Square,
}

impl Footprint {
    /// Maps the `is_circle` flag onto a footprint.
    pub fn from_is_circle(is_circle: bool) -> Self {
        if is_circle {
            Footprint::Circle
        } else {
            Footprint::Square
        }
    }

    pub fn is_circle(self) -> bool {
        matches!(self, Footprint::Circle)
    }

    /// Effective exclusion radius for an item of `size`.
    #[inline]
    pub fn radius_for(self, size: f32) -> f32 {
        match self {
            Footprint::Circle => size,
            Footprint::Square => (2.0 * size * size).sqrt() / 2.0,
        }
    }
}

/// A placed item: center, exclusion radius, and the index of the size it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub position: Vec2,
    pub radius: f32,
    pub size_index: usize,
}

impl Sample {
    pub fn new(position: Vec2, radius: f32, size_index: usize) -> Self {
        Self {
            position,
            radius,
            size_index,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Center-to-center distance.
    #[inline]
    pub fn distance_to(&self, other: &Sample) -> f32 {
        self.position.distance(other.position)
    }

    /// Gap between the two exclusion circles (negative when they overlap).
    #[inline]
    pub fn clearance_to(&self, other: &Sample) -> f32 {
        self.distance_to(other) - self.radius - other.radius
    }
}

impl From<Sample> for Point2<f32> {
    fn from(sample: Sample) -> Self {
        Point2 {
            x: sample.position.x,
            y: sample.position.y,
        }
    }
}

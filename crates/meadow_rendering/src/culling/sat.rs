//! Separating-axis overlap test between grid cells and a convex footprint.
//!
//! Two convex polygons are disjoint iff their projections onto some edge
//! normal of either polygon are disjoint. A grid cell's edge normals are the
//! world axes, which the caller's bounding-box prefilter already covers, so
//! only the footprint's own normals are tested here.

use meadow_shared::Vec2;

/// Axis-aligned cell `[x0, x1] × [z0, z1]` in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    /// Minimum X.
    pub x0: f64,
    /// Maximum X.
    pub x1: f64,
    /// Minimum Z.
    pub z0: f64,
    /// Maximum Z.
    pub z1: f64,
}

impl CellBounds {
    /// Bounds of logical cell `(ix, iz)` for a given cell size.
    #[inline]
    #[must_use]
    pub fn for_cell(ix: i32, iz: i32, cell_size: f64) -> Self {
        let x0 = f64::from(ix) * cell_size;
        let z0 = f64::from(iz) * cell_size;
        Self {
            x0,
            x1: x0 + cell_size,
            z0,
            z1: z0 + cell_size,
        }
    }

    /// The four corners, counter-clockwise from `(x0, z0)`.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x0, self.z0),
            Vec2::new(self.x1, self.z0),
            Vec2::new(self.x1, self.z1),
            Vec2::new(self.x0, self.z1),
        ]
    }

    /// True if this cell lies entirely outside the box `[min, max]`.
    /// Touching edges do not count as outside.
    #[inline]
    #[must_use]
    pub fn outside_box(&self, min: Vec2, max: Vec2) -> bool {
        self.x1 < min.x || self.z1 < min.z || self.x0 > max.x || self.z0 > max.z
    }
}

/// Closed interval `[min, max]` of projections onto one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interval {
    /// Smallest projection.
    pub min: f64,
    /// Largest projection.
    pub max: f64,
}

impl Interval {
    /// True when the two intervals share no point.
    #[inline]
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.max < other.min || self.min > other.max
    }
}

/// Projects points onto `axis` and returns the covered interval.
#[must_use]
pub fn project_points(points: &[Vec2], axis: Vec2) -> Interval {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        let d = p.dot(axis);
        if d < min {
            min = d;
        }
        if d > max {
            max = d;
        }
    }
    Interval { min, max }
}

/// One candidate separating axis with the footprint already projected on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeparatingAxis {
    /// Unit axis direction.
    pub axis: Vec2,
    /// Footprint's projection onto `axis`.
    pub footprint: Interval,
}

impl SeparatingAxis {
    /// Projects `polygon` onto `axis` once, for reuse across many cells.
    #[must_use]
    pub fn new(axis: Vec2, polygon: &[Vec2]) -> Self {
        Self {
            axis,
            footprint: project_points(polygon, axis),
        }
    }

    /// True if this axis separates `cell` from the footprint.
    #[inline]
    #[must_use]
    pub fn separates(&self, cell: &CellBounds) -> bool {
        project_points(&cell.corners(), self.axis).is_disjoint(&self.footprint)
    }
}

/// True when no axis separates `cell` from the footprint the axes were
/// built for.
#[inline]
#[must_use]
pub fn cell_intersects(cell: &CellBounds, axes: &[SeparatingAxis]) -> bool {
    axes.iter().all(|axis| !axis.separates(cell))
}

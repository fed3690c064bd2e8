//! Ground footprint of the view frustum.
//!
//! A trapezoid whose near edge sits `z_offset` in front of the camera and
//! whose far edge sits `z_extent` further out:
//!
//! ```text
//!        f0 ────────────── f1        far edge, width = far_scale
//!          \              /
//!           \            /
//!            n0 ────── n1            near edge, width = near_scale
//!
//!                 ▲ camera (z_offset behind the near edge)
//! ```
//!
//! The template is rotated by the camera heading and translated to the
//! camera position every tick.

use std::f64::consts::TAU;

use meadow_shared::{signed_area_x2, Vec2, MIN_FOOTPRINT_AREA_RATIO};

use crate::camera::CameraPose;
use crate::config::GridConfig;

use super::sat::{cell_intersects, CellBounds, SeparatingAxis};

/// Logical cell index containing world coordinate `pos`.
#[allow(clippy::cast_possible_truncation)]
#[inline]
#[must_use]
pub fn cell_index(pos: f64, cell_size: f64) -> i32 {
    // Saturates at the i32 range for absurdly distant cameras.
    (pos / cell_size).floor() as i32
}

/// Inclusive rectangle of logical cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// First X index.
    pub min_x: i32,
    /// Last X index (inclusive).
    pub max_x: i32,
    /// First Z index.
    pub min_z: i32,
    /// Last Z index (inclusive).
    pub max_z: i32,
}

impl CellRange {
    /// Number of cells in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        let span = |lo: i32, hi: i32| u64::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(0);
        span(self.min_x, self.max_x) * span(self.min_z, self.max_z)
    }

    /// True when the range holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `(x, z)` lies inside the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }

    /// Iterates `(x, z)` with X in the outer loop.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..=self.max_x).flat_map(move |x| (min_z..=max_z).map(move |z| (x, z)))
    }
}

/// The posed trapezoid plus everything the overlap test needs.
#[derive(Debug, Clone)]
pub struct Footprint {
    /// Unposed corners `[n0, n1, f0, f1]` relative to the camera.
    template: [Vec2; 4],
    /// Near-left corner.
    n0: Vec2,
    /// Near-right corner.
    n1: Vec2,
    /// Far-left corner.
    f0: Vec2,
    /// Far-right corner.
    f1: Vec2,
    /// Bounding box minimum.
    min: Vec2,
    /// Bounding box maximum.
    max: Vec2,
    /// Near normal (both signs) and the two side normals.
    axes: [SeparatingAxis; 4],
    /// Area at or below which the footprint counts as empty.
    min_area: f64,
    /// True when the posed trapezoid has no area or no usable normals.
    degenerate: bool,
}

impl Footprint {
    /// Builds the template and poses it at the origin with heading 0.
    #[must_use]
    pub fn new(near_scale: f64, far_scale: f64, z_extent: f64, z_offset: f64) -> Self {
        let amount_offset = (far_scale - near_scale) / 2.0;
        let far_z = z_extent + z_offset;
        let scale = near_scale.max(far_scale).max(z_extent);

        let template = [
            Vec2::new(-far_scale / 2.0 + amount_offset, z_offset),
            Vec2::new(far_scale / 2.0 - amount_offset, z_offset),
            Vec2::new(-far_scale / 2.0, far_z),
            Vec2::new(far_scale / 2.0, far_z),
        ];

        let mut footprint = Self {
            template,
            n0: Vec2::ZERO,
            n1: Vec2::ZERO,
            f0: Vec2::ZERO,
            f1: Vec2::ZERO,
            min: Vec2::ZERO,
            max: Vec2::ZERO,
            axes: [SeparatingAxis::default(); 4],
            min_area: MIN_FOOTPRINT_AREA_RATIO * scale * scale,
            degenerate: true,
        };
        footprint.set_pose(CameraPose::default());
        footprint
    }

    /// Builds the footprint described by a grid config.
    #[must_use]
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.near_scale, config.far_scale, config.z_extent, config.z_offset)
    }

    /// Rotates the template by `pose.heading`, translates it to the pose
    /// position and recomputes bounds and normals.
    ///
    /// Headings that differ by whole turns pose identically.
    pub fn set_pose(&mut self, pose: CameraPose) {
        // sin(TAU) is not exactly 0; unreduced, the near edge would dip
        // into the row behind the camera.
        let (sin, cos) = pose.heading.rem_euclid(TAU).sin_cos();
        let origin = pose.position();
        let [n0, n1, f0, f1] = self.template.map(|local| origin + local.rotated(cos, sin));

        self.n0 = n0;
        self.n1 = n1;
        self.f0 = f0;
        self.f1 = f1;
        self.min = n0.min(n1).min(f0).min(f1);
        self.max = n0.max(n1).max(f0).max(f1);

        self.degenerate = !self.rebuild_axes();
    }

    /// Recomputes the separating axes. Returns `false` when the footprint is
    /// degenerate and must not match any cell.
    fn rebuild_axes(&mut self) -> bool {
        let polygon = self.polygon();
        if !polygon.iter().all(|p| p.is_finite()) {
            return false;
        }
        if signed_area_x2(&polygon).abs() / 2.0 <= self.min_area {
            return false;
        }

        // A zero-width near edge (triangle) borrows the parallel far edge.
        let near_dir = (self.n1 - self.n0)
            .normalized()
            .or_else(|| (self.f1 - self.f0).normalized());
        let side0 = (self.n0 - self.f0).normalized();
        let side1 = (self.f1 - self.n1).normalized();

        let (Some(near), Some(side0), Some(side1)) = (near_dir, side0, side1) else {
            return false;
        };

        let near = near.perp();
        self.axes = [
            SeparatingAxis::new(near, &polygon),
            SeparatingAxis::new(-near, &polygon),
            SeparatingAxis::new(side0.perp(), &polygon),
            SeparatingAxis::new(side1.perp(), &polygon),
        ];
        true
    }

    /// Corners in winding order: `[n0, n1, f1, f0]`.
    #[inline]
    #[must_use]
    pub const fn polygon(&self) -> [Vec2; 4] {
        [self.n0, self.n1, self.f1, self.f0]
    }

    /// Near-left corner.
    #[inline]
    #[must_use]
    pub const fn near_left(&self) -> Vec2 {
        self.n0
    }

    /// Near-right corner.
    #[inline]
    #[must_use]
    pub const fn near_right(&self) -> Vec2 {
        self.n1
    }

    /// Far-left corner.
    #[inline]
    #[must_use]
    pub const fn far_left(&self) -> Vec2 {
        self.f0
    }

    /// Far-right corner.
    #[inline]
    #[must_use]
    pub const fn far_right(&self) -> Vec2 {
        self.f1
    }

    /// Axis-aligned bounding box as `(min, max)`.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// The four separating axes: near normal, its negation, and the two
    /// side normals. Meaningless while the footprint is degenerate.
    #[inline]
    #[must_use]
    pub const fn axes(&self) -> &[SeparatingAxis; 4] {
        &self.axes
    }

    /// True when the posed trapezoid has (near) zero area, non-finite
    /// corners, or an edge whose normal cannot be formed.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// True if the cell overlaps (or touches) the footprint.
    ///
    /// The bounding-box check doubles as the SAT test on the world axes, so
    /// together with the footprint's own normals every edge normal of both
    /// shapes is covered.
    #[must_use]
    pub fn intersects_cell(&self, cell: &CellBounds) -> bool {
        if self.degenerate || cell.outside_box(self.min, self.max) {
            return false;
        }
        cell_intersects(cell, &self.axes)
    }

    /// Cells whose squares can overlap the bounding box, or `None` while the
    /// footprint is degenerate.
    #[must_use]
    pub fn candidate_range(&self, cell_size: f64) -> Option<CellRange> {
        if self.degenerate {
            return None;
        }
        Some(CellRange {
            min_x: cell_index(self.min.x, cell_size),
            max_x: cell_index(self.max.x, cell_size),
            min_z: cell_index(self.min.z, cell_size),
            max_z: cell_index(self.max.z, cell_size),
        })
    }
}

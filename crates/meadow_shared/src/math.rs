//! Ground-plane math shared by the grid, the tooling and the renderer.
//!
//! Everything here lives on the XZ plane: `x` is world X, `z` is world Z.
//! Height is the terrain's business and never shows up in these types.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as zero-length.
const DEGENERATE_LENGTH_SQUARED: f64 = 1e-24;

/// 2D vector on the ground plane - corners, normals, directions
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Z component
    pub z: f64,
}

impl Vec2 {
    /// Creates a new Vec2
    #[inline]
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Dot product
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.z * other.z
    }

    /// Length squared (avoids sqrt)
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Returns `None` for zero-length or non-finite input instead of
    /// producing NaN components.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len_sq = self.length_squared();
        if !len_sq.is_finite() || len_sq <= DEGENERATE_LENGTH_SQUARED {
            return None;
        }
        let inv = 1.0 / len_sq.sqrt();
        Some(self * inv)
    }

    /// Turns the vector by -90 degrees: `(x, z) -> (z, -x)`.
    #[inline]
    #[must_use]
    pub const fn perp(self) -> Self {
        Self::new(self.z, -self.x)
    }

    /// Rotates by the angle whose cosine and sine are given.
    ///
    /// Callers rotating many points by the same angle compute `cos`/`sin`
    /// once and pass them in.
    #[inline]
    #[must_use]
    pub fn rotated(self, cos: f64, sin: f64) -> Self {
        Self::new(self.x * cos - self.z * sin, self.z * cos + self.x * sin)
    }

    /// True when both components are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Component-wise minimum
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.z.max(other.z))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.z)
    }
}

/// Twice the signed area of a polygon given in winding order (shoelace).
#[must_use]
pub fn signed_area_x2(points: &[Vec2]) -> f64 {
    let n = points.len();
    let mut acc = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += a.x * b.z - b.x * a.z;
    }
    acc
}

//! Camera pose on the ground plane, as fed to the grid each tick.

use meadow_shared::{Vec2, MOTION_EPSILON};

/// Camera position and heading projected onto the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    /// World X.
    pub x: f64,
    /// World Z.
    pub z: f64,
    /// Heading in radians. 0 looks down +Z, pi/2 looks down -X.
    pub heading: f64,
}

impl CameraPose {
    /// Creates a pose.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, z: f64, heading: f64) -> Self {
        Self { x, z, heading }
    }

    /// Builds a pose whose footprint extends along `(dir_x, dir_z)`.
    ///
    /// `dir` is the camera's view direction flattened onto the ground plane;
    /// it does not need to be normalised.
    #[must_use]
    pub fn from_view_direction(x: f64, z: f64, dir_x: f64, dir_z: f64) -> Self {
        Self::new(x, z, (-dir_x).atan2(dir_z))
    }

    /// Position as a vector.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// True when all three components are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite() && self.heading.is_finite()
    }

    /// True when the heading differs from `previous` by at least
    /// [`MOTION_EPSILON`]. NaN compares as turned.
    #[must_use]
    pub fn turned_since(&self, previous: &Self) -> bool {
        !((self.heading - previous.heading).abs() < MOTION_EPSILON)
    }

    /// True when x or z differs from `previous` by at least
    /// [`MOTION_EPSILON`]. NaN compares as moved.
    #[must_use]
    pub fn moved_since(&self, previous: &Self) -> bool {
        !((self.x - previous.x).abs() < MOTION_EPSILON
            && (self.z - previous.z).abs() < MOTION_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_from_view_direction() {
        let pose = CameraPose::from_view_direction(0.0, 0.0, 0.0, 1.0);
        assert!(pose.heading.abs() < 1e-12);

        let pose = CameraPose::from_view_direction(3.0, 4.0, -2.0, 0.0);
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(pose.position(), Vec2::new(3.0, 4.0));

        let pose = CameraPose::from_view_direction(0.0, 0.0, 0.0, -1.0);
        assert!((pose.heading.abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_motion_detection() {
        let a = CameraPose::new(1.0, 1.0, 0.5);

        assert!(!a.turned_since(&a));
        assert!(!a.moved_since(&a));

        let nudged = CameraPose::new(1.0 + MOTION_EPSILON / 2.0, 1.0, 0.5);
        assert!(!nudged.moved_since(&a));

        let moved = CameraPose::new(1.0, 1.5, 0.5);
        assert!(moved.moved_since(&a));
        assert!(!moved.turned_since(&a));

        let turned = CameraPose::new(1.0, 1.0, 0.6);
        assert!(turned.turned_since(&a));
    }

    #[test]
    fn test_nan_counts_as_motion() {
        let a = CameraPose::new(0.0, 0.0, 0.0);
        let unknown = CameraPose::new(f64::NAN, f64::NAN, f64::NAN);
        assert!(a.turned_since(&unknown));
        assert!(a.moved_since(&unknown));
        assert!(!unknown.is_finite());
    }
}

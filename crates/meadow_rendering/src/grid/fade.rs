//! Alpha fade rules.
//!
//! Bound cells rise toward 1 each tick, released cells decay toward 0.
//! While the camera is moving both rates snap to 1 so the image never lags
//! behind the footprint.

use meadow_shared::FADE_EPSILON;

use crate::camera::CameraPose;

/// Per-tick alpha steps after motion snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeRates {
    /// Added to the alpha of every kept cell.
    pub rise: f64,
    /// Subtracted from the alpha of every decaying slot.
    pub decay: f64,
}

impl FadeRates {
    /// Rates for one tick. Factors are clamped into `[0, 1]`; NaN counts as 1.
    #[must_use]
    pub fn for_tick(rise_factor: f64, decay_factor: f64, moving: bool) -> Self {
        if moving {
            return Self { rise: 1.0, decay: 1.0 };
        }
        Self {
            rise: clamp_factor(rise_factor),
            decay: clamp_factor(decay_factor),
        }
    }
}

fn clamp_factor(factor: f64) -> f64 {
    if factor.is_nan() {
        1.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

/// True when the camera counts as moving between `previous` and `current`.
///
/// The first tick (no previous pose) always counts as moving. Translation
/// only counts when `snap_on_translation` is set.
#[must_use]
pub fn is_moving(
    previous: Option<&CameraPose>,
    current: &CameraPose,
    snap_on_translation: bool,
) -> bool {
    match previous {
        None => true,
        Some(prev) => {
            current.turned_since(prev) || (snap_on_translation && current.moved_since(prev))
        }
    }
}

/// Raises a kept cell's alpha, saturating at 1.
#[inline]
#[must_use]
pub fn rise(alpha: f64, rate: f64) -> f64 {
    if alpha >= 1.0 {
        return 1.0;
    }
    let next = alpha + rate;
    if next >= 1.0 - FADE_EPSILON {
        1.0
    } else {
        next
    }
}

/// Outcome of one decay step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// Still visible at the new alpha.
    Fading(f64),
    /// Reached 0; the slot goes inactive.
    Finished,
}

/// Lowers a released slot's alpha.
#[inline]
#[must_use]
pub fn decay(alpha: f64, rate: f64) -> Decay {
    let next = alpha - rate;
    if next <= FADE_EPSILON {
        Decay::Finished
    } else {
        Decay::Fading(next)
    }
}

//! # Grid Tuning Constants
//!
//! Defaults baked into every frustum grid unless a config overrides them.

// =============================================================================
// ALPHA FADE
// =============================================================================

/// Per-tick alpha increase for a cell that is (still) wanted.
pub const DEFAULT_ALPHA_RISE_FACTOR: f64 = 0.1;

/// Per-tick alpha decrease for a cell that is no longer wanted.
pub const DEFAULT_ALPHA_DECAY_FACTOR: f64 = 0.01;

/// Alpha a slot starts at when it is bound to a new cell.
///
/// Non-zero so the first frame of a new cell is not fully transparent.
pub const SEED_ALPHA: f64 = 0.01;

/// Alphas within this distance of 0 or 1 snap to the bound.
///
/// Repeated subtraction of a decimal factor never lands exactly on 0.
pub const FADE_EPSILON: f64 = 1e-9;

// =============================================================================
// MOTION DETECTION
// =============================================================================

/// Heading change (radians) or translation (world units) at or above which
/// the camera counts as moving for the tick.
pub const MOTION_EPSILON: f64 = 1e-4;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Footprints whose area is at most this fraction of `grid_scale²` are
/// treated as empty.
pub const MIN_FOOTPRINT_AREA_RATIO: f64 = 1e-12;

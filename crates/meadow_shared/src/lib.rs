//! # MEADOW Shared
//!
//! Common ground-plane types used by the grid, tooling and renderer.
//!
//! ## RULE
//!
//! This crate must NEVER depend on a GPU or windowing crate.
//! Render-side types live in `meadow_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_ALPHA_DECAY_FACTOR, DEFAULT_ALPHA_RISE_FACTOR, FADE_EPSILON, MIN_FOOTPRINT_AREA_RATIO,
    MOTION_EPSILON, SEED_ALPHA,
};
pub use math::{signed_area_x2, Vec2};

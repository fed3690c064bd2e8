//! # Grid Error Types
//!
//! Everything that can go wrong building a frustum grid. Ticks never fail.

use thiserror::Error;

/// Errors raised while validating or loading a grid configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// `grid_dim` was zero or above [`MAX_GRID_DIM`](crate::config::MAX_GRID_DIM).
    #[error("grid dimension must be in 1..=4096, got {0}")]
    InvalidDimension(u32),

    /// A scale or offset was negative or not finite.
    #[error("invalid {name}: {value} (must be finite and non-negative)")]
    InvalidScale {
        /// Which field was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// `z_offset` was NaN or infinite. Negative offsets are allowed.
    #[error("invalid z_offset: {0} (must be finite)")]
    NonFiniteOffset(f64),

    /// `max(near_scale, far_scale, z_extent)` was zero, so cells have no size.
    #[error("footprint has zero extent: near_scale, far_scale and z_extent are all 0")]
    EmptyFootprint,

    /// An alpha factor was outside `(0, 1]`.
    #[error("invalid {name}: {value} (must be in (0, 1])")]
    InvalidAlphaFactor {
        /// Which factor was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A TOML config could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(String),
}

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;

//! # Grid Configuration
//!
//! Footprint shape, slot capacity and fade tuning for a [`FrustumGrid`].
//!
//! Configs come from code presets, from camera parameters via
//! [`GridConfig::from_perspective`], or from a TOML file loaded once at
//! startup:
//!
//! ```toml
//! near_scale = 20.0
//! far_scale = 800.0
//! z_extent = 800.0
//! z_offset = 0.0
//! grid_dim = 32
//! alpha_rise_factor = 0.1
//! alpha_decay_factor = 0.01
//! slot_reuse = "immediate"
//! snap_on_translation = true
//! ```
//!
//! [`FrustumGrid`]: crate::FrustumGrid

use serde::{Deserialize, Serialize};

use meadow_shared::{DEFAULT_ALPHA_DECAY_FACTOR, DEFAULT_ALPHA_RISE_FACTOR};

use crate::error::{GridError, GridResult};

/// Largest accepted `grid_dim`. Keeps `grid_dim²` well inside `u32`.
pub const MAX_GRID_DIM: u32 = 4096;

/// When a released slot may be handed to a different cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotReuse {
    /// The slot is free the moment its cell stops intersecting.
    ///
    /// If it is claimed before its alpha reaches 0, the old cell's fade-out
    /// is cut short: the record is overwritten by the new cell.
    #[default]
    Immediate,
    /// The slot is only freed once its alpha has decayed to 0.
    ///
    /// Fade-outs always complete, at the cost of fewer usable slots while
    /// the camera moves quickly.
    AfterFade,
}

/// Frustum grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// World width of the trapezoid's near edge.
    pub near_scale: f64,
    /// World width of the trapezoid's far edge.
    pub far_scale: f64,
    /// World depth from the near edge to the far edge.
    pub z_extent: f64,
    /// Forward distance from the camera to the near edge. May be negative.
    pub z_offset: f64,
    /// Cells per axis of slot capacity (`grid_dim²` slots).
    pub grid_dim: u32,
    /// Per-tick alpha increase for wanted cells, in `(0, 1]`.
    pub alpha_rise_factor: f64,
    /// Per-tick alpha decrease for released cells, in `(0, 1]`.
    pub alpha_decay_factor: f64,
    /// When released slots become reusable.
    pub slot_reuse: SlotReuse,
    /// Whether a camera translation (not only a turn) snaps fades to 1.
    pub snap_on_translation: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(20.0, 800.0, 800.0, 32, 0.0)
    }
}

/// Camera parameters a footprint can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveParams {
    /// Vertical field of view in radians.
    pub field_of_view: f64,
    /// Viewport width / height.
    pub aspect_ratio: f64,
    /// Forward distance from the camera to the near edge.
    pub z_offset: f64,
    /// Depth of the covered area.
    pub z_extent: f64,
    /// Cells per axis of slot capacity.
    pub grid_dim: u32,
}

impl GridConfig {
    /// Creates a config with default fade tuning.
    #[must_use]
    pub fn new(
        near_scale: f64,
        far_scale: f64,
        z_extent: f64,
        grid_dim: u32,
        z_offset: f64,
    ) -> Self {
        Self {
            near_scale,
            far_scale,
            z_extent,
            z_offset,
            grid_dim,
            alpha_rise_factor: DEFAULT_ALPHA_RISE_FACTOR,
            alpha_decay_factor: DEFAULT_ALPHA_DECAY_FACTOR,
            slot_reuse: SlotReuse::Immediate,
            snap_on_translation: true,
        }
    }

    /// Derives near/far widths from a perspective camera.
    ///
    /// Widths are measured at `z_offset` and `z_offset + z_extent` in front
    /// of the camera, each padded by one aspect ratio of depth so blades at
    /// the screen edge are not clipped.
    #[must_use]
    pub fn from_perspective(params: &PerspectiveParams) -> Self {
        let half_tan = (params.field_of_view / 2.0).tan();
        let spread = half_tan * params.aspect_ratio * 2.0;
        let near_scale = spread * (params.z_offset + params.aspect_ratio);
        let far_scale = spread * (params.z_offset + params.z_extent + params.aspect_ratio);

        Self::new(near_scale, far_scale, params.z_extent, params.grid_dim, params.z_offset)
    }

    /// Parses and validates a TOML config.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// [`GridError::ConfigParse`] for malformed TOML or unknown keys, or any
    /// validation error from [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> GridResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GridError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets both fade factors.
    #[must_use]
    pub fn with_alpha_factors(mut self, rise: f64, decay: f64) -> Self {
        self.alpha_rise_factor = rise;
        self.alpha_decay_factor = decay;
        self
    }

    /// Sets the slot reuse policy.
    #[must_use]
    pub fn with_slot_reuse(mut self, slot_reuse: SlotReuse) -> Self {
        self.slot_reuse = slot_reuse;
        self
    }

    /// Sets whether translation alone snaps fades.
    #[must_use]
    pub fn with_snap_on_translation(mut self, snap: bool) -> Self {
        self.snap_on_translation = snap;
        self
    }

    /// `max(near_scale, far_scale, z_extent)`.
    #[inline]
    #[must_use]
    pub fn grid_scale(&self) -> f64 {
        self.near_scale.max(self.far_scale).max(self.z_extent)
    }

    /// World size of one cell: `grid_scale / grid_dim`.
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.grid_scale() / f64::from(self.grid_dim)
    }

    /// Number of slots: `grid_dim²`, saturating at `u32::MAX` for
    /// dimensions [`validate`](Self::validate) would reject.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.grid_dim.saturating_mul(self.grid_dim)
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// The first offending field, as a [`GridError`].
    pub fn validate(&self) -> GridResult<()> {
        if self.grid_dim == 0 || self.grid_dim > MAX_GRID_DIM {
            return Err(GridError::InvalidDimension(self.grid_dim));
        }

        for (name, value) in [
            ("near_scale", self.near_scale),
            ("far_scale", self.far_scale),
            ("z_extent", self.z_extent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidScale { name, value });
            }
        }

        if !self.z_offset.is_finite() {
            return Err(GridError::NonFiniteOffset(self.z_offset));
        }

        if self.grid_scale() <= 0.0 {
            return Err(GridError::EmptyFootprint);
        }

        validate_alpha_factor("alpha_rise_factor", self.alpha_rise_factor)?;
        validate_alpha_factor("alpha_decay_factor", self.alpha_decay_factor)?;

        Ok(())
    }
}

fn validate_alpha_factor(name: &'static str, value: f64) -> GridResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GridError::InvalidAlphaFactor { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_scale(), 800.0);
        assert_eq!(config.cell_size(), 25.0);
        assert_eq!(config.capacity(), 1024);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = GridConfig::new(2.0, 4.0, 4.0, 0, 0.0);
        assert_eq!(config.validate(), Err(GridError::InvalidDimension(0)));
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let config = GridConfig::new(2.0, 4.0, 4.0, MAX_GRID_DIM + 1, 0.0);
        assert_eq!(config.validate(), Err(GridError::InvalidDimension(MAX_GRID_DIM + 1)));
    }

    #[test]
    fn test_capacity_of_unvalidated_dimension_saturates() {
        let config = GridConfig::new(1.0, 2.0, 2.0, 70_000, 0.0);
        assert_eq!(config.capacity(), u32::MAX);
        assert!(config.validate().is_err());

        let largest = GridConfig::new(1.0, 2.0, 2.0, MAX_GRID_DIM, 0.0);
        assert_eq!(largest.capacity(), MAX_GRID_DIM * MAX_GRID_DIM);
    }

    #[test]
    fn test_negative_scale_rejected() {
        let config = GridConfig::new(-1.0, 4.0, 4.0, 4, 0.0);
        assert_eq!(
            config.validate(),
            Err(GridError::InvalidScale { name: "near_scale", value: -1.0 })
        );
    }

    #[test]
    fn test_nan_extent_rejected() {
        let config = GridConfig::new(1.0, 4.0, f64::NAN, 4, 0.0);
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidScale { name: "z_extent", .. })
        ));
    }

    #[test]
    fn test_negative_offset_allowed() {
        let config = GridConfig::new(1.0, 4.0, 4.0, 4, -2.0);
        assert!(config.validate().is_ok());

        let config = GridConfig::new(1.0, 4.0, 4.0, 4, f64::INFINITY);
        assert!(matches!(config.validate(), Err(GridError::NonFiniteOffset(_))));
    }

    #[test]
    fn test_all_zero_scales_rejected() {
        let config = GridConfig::new(0.0, 0.0, 0.0, 4, 0.0);
        assert_eq!(config.validate(), Err(GridError::EmptyFootprint));
    }

    #[test]
    fn test_alpha_factor_bounds() {
        let base = GridConfig::new(1.0, 2.0, 2.0, 2, 0.0);

        assert!(base.clone().with_alpha_factors(1.0, 1.0).validate().is_ok());
        assert!(matches!(
            base.clone().with_alpha_factors(0.0, 0.5).validate(),
            Err(GridError::InvalidAlphaFactor { name: "alpha_rise_factor", .. })
        ));
        assert!(matches!(
            base.with_alpha_factors(0.5, 1.5).validate(),
            Err(GridError::InvalidAlphaFactor { name: "alpha_decay_factor", .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let config = GridConfig::from_toml_str(
            r#"
            near_scale = 2.0
            far_scale = 4.0
            z_extent = 4.0
            grid_dim = 4
            alpha_decay_factor = 0.25
            slot_reuse = "after_fade"
            snap_on_translation = false
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_dim, 4);
        assert_eq!(config.z_offset, 0.0);
        assert_eq!(config.alpha_rise_factor, DEFAULT_ALPHA_RISE_FACTOR);
        assert_eq!(config.alpha_decay_factor, 0.25);
        assert_eq!(config.slot_reuse, SlotReuse::AfterFade);
        assert!(!config.snap_on_translation);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_input() {
        assert!(matches!(
            GridConfig::from_toml_str("grid_dimension = 4"),
            Err(GridError::ConfigParse(_))
        ));
        assert!(matches!(
            GridConfig::from_toml_str("grid_dim = 0"),
            Err(GridError::InvalidDimension(0))
        ));
    }

    #[test]
    fn test_from_perspective() {
        let params = PerspectiveParams {
            field_of_view: std::f64::consts::FRAC_PI_2,
            aspect_ratio: 1.0,
            z_offset: 1.0,
            z_extent: 10.0,
            grid_dim: 16,
        };
        let config = GridConfig::from_perspective(&params);

        // tan(45deg) = 1: near = 2 * (1 + 1), far = 2 * (1 + 10 + 1)
        assert!((config.near_scale - 4.0).abs() < 1e-9);
        assert!((config.far_scale - 24.0).abs() < 1e-9);
        assert_eq!(config.z_extent, 10.0);
        assert_eq!(config.grid_dim, 16);
        assert!(config.validate().is_ok());
    }
}

//! The frustum grid: slot allocation and fades driven by the camera.

mod cell_coord;
mod fade;
mod frustum_grid;
mod stats;

pub use cell_coord::CellCoord;
pub use fade::{decay, is_moving, rise, Decay, FadeRates};
pub use frustum_grid::FrustumGrid;
pub use stats::GridStats;

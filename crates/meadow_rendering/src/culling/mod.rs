//! Ground-plane culling for the frustum grid.
//!
//! Builds the camera's trapezoid footprint and tests grid cells against it
//! with the separating axis theorem.

mod footprint;
pub mod sat;

pub use footprint::{cell_index, CellRange, Footprint};
pub use sat::{cell_intersects, project_points, CellBounds, Interval, SeparatingAxis};

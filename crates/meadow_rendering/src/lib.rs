//! # MEADOW Rendering - Frustum Grid
//!
//! Decides, every tick, which world cells near the camera get one of a
//! fixed number of instancing slots, and how opaque each slot should be.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PER TICK                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  CameraPose → Footprint (trapezoid) → Candidate cell range   │
//! │                                  ↓                           │
//! │            SAT overlap → bind / keep / release slots         │
//! │                                  ↓                           │
//! │     Alpha rise & decay → CellRecord buffer → GPU texture     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - No allocations in [`FrustumGrid::update`]
//! - A cell is bound to at most one slot, a slot to at most one cell
//! - Slot capacity is fixed at construction: `grid_dim²`

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod camera;
pub mod config;
pub mod culling;
pub mod debug;
pub mod error;
pub mod grid;
pub mod instancing;

pub use camera::CameraPose;
pub use config::{GridConfig, PerspectiveParams, SlotReuse};
pub use culling::{CellBounds, CellRange, Footprint};
pub use error::{GridError, GridResult};
pub use grid::{CellCoord, FrustumGrid, GridStats};
pub use instancing::CellRecord;

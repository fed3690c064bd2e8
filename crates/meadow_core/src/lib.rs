//! # MEADOW Core
//!
//! Engine plumbing shared by the frustum grid and its consumers:
//! - Fixed-capacity slot pools with a deterministic pick policy
//! - Double-buffered record exchange for simulation/render thread splits
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the tick path** - All memory is pre-allocated
//! 2. **No locks held across a tick** - Readers only ever touch published data

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;
pub mod sync;

pub use memory::SlotPool;
pub use sync::{FrameReadGuard, PublishGuard, RecordExchange};

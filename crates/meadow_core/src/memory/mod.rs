//! # Memory Management
//!
//! Pre-allocated slot pools for the per-tick path.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once when a grid is built. During ticks:
//! - No heap allocations
//! - Predictable, flat latency

mod slot_pool;

pub use slot_pool::SlotPool;

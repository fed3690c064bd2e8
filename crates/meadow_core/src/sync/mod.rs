//! # Synchronization for Split Simulation / Render Threads
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Simulation):  WRITE slot records every tick
//! Thread 2 (Render):      READ slot records every frame
//!
//! Without synchronization: torn ticks (half old, half new records)
//! With one Mutex:          render stalls while the tick runs
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! The simulation fills the back buffer, then flips it to the front.
//! The renderer only ever locks the front buffer for reading.

mod record_exchange;

pub use record_exchange::{FrameReadGuard, PublishGuard, RecordExchange};

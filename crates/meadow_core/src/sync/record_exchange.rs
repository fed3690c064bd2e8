//! Double-buffered record exchange between a simulation thread and a
//! render thread.
//!
//! ```text
//! Tick N:
//!   Simulation fills BACK buffer ──► flip ──► becomes FRONT
//!   Render reads FRONT (tick N-1) while BACK is being written
//! ```
//!
//! A reader always sees one complete published tick, never a mix of two.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One side of the double buffer.
#[derive(Debug)]
struct Frame<T> {
    /// Publish counter value this frame was written under. 0 = never written.
    generation: u64,
    /// The records themselves.
    records: Vec<T>,
}

/// Double buffer of record slices.
///
/// ## Usage
///
/// ```rust
/// use meadow_core::RecordExchange;
///
/// let exchange: RecordExchange<u32> = RecordExchange::with_capacity(4);
///
/// // Simulation thread
/// exchange.publish_from(&[1, 2, 3, 4]);
///
/// // Render thread
/// let frame = exchange.read();
/// assert_eq!(frame.generation(), 1);
/// assert_eq!(&*frame, &[1, 2, 3, 4]);
/// ```
///
/// ## Thread Safety
///
/// - One writer at a time (the tick owner). A second concurrent writer
///   serialises on the back buffer's lock.
/// - Any number of readers.
#[derive(Debug)]
pub struct RecordExchange<T> {
    /// The two frames.
    buffers: [RwLock<Frame<T>>; 2],
    /// Index of the frame readers should use.
    front: AtomicUsize,
    /// Number of completed publishes.
    generation: AtomicU64,
}

impl<T> RecordExchange<T> {
    /// Creates an exchange whose buffers are pre-sized for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffers: [
                RwLock::new(Frame {
                    generation: 0,
                    records: Vec::with_capacity(capacity),
                }),
                RwLock::new(Frame {
                    generation: 0,
                    records: Vec::with_capacity(capacity),
                }),
            ],
            front: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the number of completed publishes.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Begins writing the back buffer.
    ///
    /// The guard dereferences to the back buffer's `Vec`, which still holds
    /// whatever was published two flips ago. Dropping the guard publishes it.
    #[must_use]
    pub fn begin_write(&self) -> PublishGuard<'_, T> {
        let back = self.front.load(Ordering::Acquire) ^ 1;
        PublishGuard {
            exchange: self,
            back,
            frame: Some(self.buffers[back].write()),
        }
    }

    /// Reads the most recently published frame.
    ///
    /// Blocks only if the writer is mid-way through overwriting this very
    /// buffer, which needs two publishes to race one read.
    #[must_use]
    pub fn read(&self) -> FrameReadGuard<'_, T> {
        let front = self.front.load(Ordering::Acquire);
        FrameReadGuard {
            frame: self.buffers[front].read(),
        }
    }
}

impl<T: Copy> RecordExchange<T> {
    /// Copies `records` into the back buffer and publishes it.
    ///
    /// Allocation-free once the buffers have grown to `records.len()`.
    pub fn publish_from(&self, records: &[T]) {
        let mut guard = self.begin_write();
        guard.clear();
        guard.extend_from_slice(records);
    }
}

/// Write access to the back buffer. Publishes on drop.
pub struct PublishGuard<'a, T> {
    exchange: &'a RecordExchange<T>,
    back: usize,
    frame: Option<RwLockWriteGuard<'a, Frame<T>>>,
}

impl<T> Deref for PublishGuard<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        match &self.frame {
            Some(frame) => &frame.records,
            None => unreachable!("frame is only taken in drop"),
        }
    }
}

impl<T> DerefMut for PublishGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.frame {
            Some(frame) => &mut frame.records,
            None => unreachable!("frame is only taken in drop"),
        }
    }
}

impl<T> Drop for PublishGuard<'_, T> {
    fn drop(&mut self) {
        let generation = self.exchange.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(mut frame) = self.frame.take() {
            frame.generation = generation;
        }
        // Lock released above; flip only after the frame is fully written.
        self.exchange.front.store(self.back, Ordering::Release);
    }
}

/// Read access to the front buffer.
pub struct FrameReadGuard<'a, T> {
    frame: RwLockReadGuard<'a, Frame<T>>,
}

impl<T> FrameReadGuard<'_, T> {
    /// Publish counter this frame was written under. 0 if nothing has been
    /// published yet.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.frame.generation
    }
}

impl<T> Deref for FrameReadGuard<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.frame.records
    }
}

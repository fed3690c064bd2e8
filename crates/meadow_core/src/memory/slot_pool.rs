//! # Slot Pool
//!
//! Fixed-capacity allocator of slot indices for instance records.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A pool of `capacity` reusable slot indices.
///
/// The pool only hands out indices; the caller owns whatever storage the
/// index points into (a record buffer, an instance buffer, a texture row).
///
/// # Pick policy
///
/// [`acquire`](Self::acquire) always returns the **lowest** free index.
/// Callers must not rely on this for correctness, but it keeps runs
/// reproducible and makes debug dumps readable.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. One pool per grid.
///
/// # Example
///
/// ```rust
/// use meadow_core::SlotPool;
///
/// let mut pool = SlotPool::new(4);
/// let a = pool.acquire().unwrap();
/// let b = pool.acquire().unwrap();
/// assert_eq!((a, b), (0, 1));
///
/// assert!(pool.release(a));
/// assert_eq!(pool.acquire(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct SlotPool {
    /// Free indices, smallest on top.
    free_heap: BinaryHeap<Reverse<u32>>,
    /// `true` when the slot is currently free. Guards against double release.
    is_free: Box<[bool]>,
    /// Number of slots currently handed out.
    in_use: u32,
    /// Total capacity.
    capacity: u32,
}

impl SlotPool {
    /// Creates a pool with every slot free.
    ///
    /// All memory is pre-allocated upfront.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let mut free_heap = BinaryHeap::with_capacity(capacity as usize);
        free_heap.extend((0..capacity).map(Reverse));

        Self {
            free_heap,
            is_free: vec![true; capacity as usize].into_boxed_slice(),
            in_use: 0,
            capacity,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub const fn available_count(&self) -> u32 {
        self.capacity - self.in_use
    }

    /// Returns true if `slot` is in range and currently free.
    #[inline]
    #[must_use]
    pub fn is_free(&self, slot: u32) -> bool {
        self.is_free.get(slot as usize).copied().unwrap_or(false)
    }

    /// Takes the lowest free slot.
    ///
    /// **O(log n)**, no heap allocation.
    ///
    /// # Returns
    ///
    /// The slot index, or `None` if the pool is exhausted.
    pub fn acquire(&mut self) -> Option<u32> {
        let Reverse(slot) = self.free_heap.pop()?;
        self.is_free[slot as usize] = false;
        self.in_use += 1;
        Some(slot)
    }

    /// Returns a slot to the pool.
    ///
    /// # Returns
    ///
    /// `false` if the slot is out of range or already free; the pool is
    /// left untouched in that case.
    pub fn release(&mut self, slot: u32) -> bool {
        match self.is_free.get_mut(slot as usize) {
            Some(free) if !*free => {
                *free = true;
                self.free_heap.push(Reverse(slot));
                self.in_use -= 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_acquire_release() {
        let mut pool = SlotPool::new(10);

        let s = pool.acquire().unwrap();
        assert_eq!(s, 0);
        assert_eq!(pool.available_count(), 9);
        assert!(!pool.is_free(s));

        assert!(pool.release(s));
        assert_eq!(pool.available_count(), 10);
        assert!(pool.is_free(s));
    }

    #[test]
    fn test_pool_full() {
        let mut pool = SlotPool::new(2);

        let _ = pool.acquire().unwrap();
        let _ = pool.acquire().unwrap();
        assert_eq!(pool.available_count(), 0);
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn test_pool_lowest_index_first() {
        let mut pool = SlotPool::new(5);
        for expected in 0..5 {
            assert_eq!(pool.acquire(), Some(expected));
        }

        pool.release(3);
        pool.release(1);
        assert_eq!(pool.acquire(), Some(1));
        assert_eq!(pool.acquire(), Some(3));
    }

    #[test]
    fn test_double_release_is_ignored() {
        let mut pool = SlotPool::new(3);
        let s = pool.acquire().unwrap();

        assert!(pool.release(s));
        assert!(!pool.release(s));
        assert!(!pool.release(99));
        assert_eq!(pool.available_count(), 3);

        // Only one copy of the slot came back.
        assert_eq!(pool.acquire(), Some(0));
        assert_eq!(pool.acquire(), Some(1));
        assert_eq!(pool.acquire(), Some(2));
        assert!(pool.acquire().is_none());
    }
}

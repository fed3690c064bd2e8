//! Per-tick grid statistics.

/// What the last [`update`](super::FrustumGrid::update) did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Ticks processed so far, including this one.
    pub tick: u64,
    /// Cells in the candidate range.
    pub candidates: u64,
    /// Candidates that overlap the footprint.
    pub intersecting: u32,
    /// Cells newly bound to a slot.
    pub allocated: u32,
    /// Cells that kept their slot.
    pub retained: u32,
    /// Cells that lost their slot.
    pub released: u32,
    /// Intersecting cells left without a slot because the pool was empty.
    pub dropped: u32,
    /// Slots whose fade-out finished.
    pub faded_out: u32,
    /// Bound cells after the tick.
    pub bound: u32,
    /// Free slots after the tick.
    pub available: u32,
    /// Slots still fading out after the tick.
    pub decaying: u32,
    /// Whether the tick counted as camera motion.
    pub moving: bool,
}

impl GridStats {
    /// Fraction of intersecting cells that got a slot.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage(&self) -> f32 {
        if self.intersecting == 0 {
            1.0
        } else {
            (self.intersecting - self.dropped) as f32 / self.intersecting as f32
        }
    }

    /// True when every intersecting cell got a slot.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

//! # Frustum Grid
//!
//! Maps the world cells under the camera's ground footprint onto a fixed
//! pool of `grid_dim²` slots.
//!
//! ## Tick
//!
//! 1. Pose the footprint and decide whether the camera moved (fade snap).
//! 2. Scan every cell in the footprint's bounding box:
//!    - intersecting and bound: keep the slot, raise its alpha
//!    - intersecting and unbound: take the lowest free slot, or drop the cell
//!    - bound but no longer intersecting: release the slot
//! 3. Release slots whose cells left the candidate range entirely.
//! 4. Decay every released slot; at alpha 0 it goes inactive.
//!
//! Storage is sized at construction. A tick never allocates.

use std::collections::HashMap;

use meadow_core::{RecordExchange, SlotPool};
use meadow_shared::SEED_ALPHA;

use crate::camera::CameraPose;
use crate::config::{GridConfig, SlotReuse};
use crate::culling::{CellRange, Footprint};
use crate::error::GridResult;
use crate::instancing::CellRecord;

use super::cell_coord::CellCoord;
use super::fade::{self, Decay, FadeRates};
use super::stats::GridStats;

/// Book-keeping for one slot.
#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    /// Cell currently bound to this slot.
    cell: Option<CellCoord>,
    /// Fade alpha at full precision. The record holds the `f32` copy.
    alpha: f64,
    /// Claimed by an intersecting cell this tick.
    used: bool,
    /// Claimed by an intersecting cell last tick.
    used_last: bool,
    /// Released and still fading out.
    decaying: bool,
}

/// Camera-driven slot allocator for instanced ground cover.
///
/// # Example
///
/// ```rust
/// use meadow_rendering::FrustumGrid;
///
/// let mut grid = FrustumGrid::new(2.0, 4.0, 4.0, 4, 0.0).unwrap();
/// grid.update(0.0, 0.0, 0.0);
///
/// assert_eq!(grid.bound_count(), 16);
/// assert_eq!(grid.as_floats().len(), 16 * 4);
/// ```
#[derive(Debug)]
pub struct FrustumGrid {
    /// Per-tick alpha increase while the camera is still. Clamped to `[0, 1]`
    /// when applied.
    pub alpha_rise_factor: f64,
    /// Per-tick alpha decrease while the camera is still. Clamped to `[0, 1]`
    /// when applied.
    pub alpha_decay_factor: f64,
    config: GridConfig,
    cell_size: f64,
    footprint: Footprint,
    pool: SlotPool,
    cell_to_slot: HashMap<CellCoord, u32>,
    slots: Box<[Slot]>,
    records: Box<[CellRecord]>,
    last_pose: Option<CameraPose>,
    range: Option<CellRange>,
    stats: GridStats,
}

impl FrustumGrid {
    /// Creates a grid with default fade tuning.
    ///
    /// # Errors
    ///
    /// Any [`GridError`](crate::GridError) from [`GridConfig::validate`].
    pub fn new(
        near_scale: f64,
        far_scale: f64,
        z_extent: f64,
        grid_dim: u32,
        z_offset: f64,
    ) -> GridResult<Self> {
        Self::with_config(GridConfig::new(
            near_scale, far_scale, z_extent, grid_dim, z_offset,
        ))
    }

    /// Creates a grid from a full config.
    ///
    /// # Errors
    ///
    /// Any [`GridError`](crate::GridError) from [`GridConfig::validate`].
    pub fn with_config(config: GridConfig) -> GridResult<Self> {
        config.validate()?;

        let capacity = config.capacity();
        let cell_size = config.cell_size();

        tracing::info!(
            "Frustum grid: {}x{} slots, cell size {:.3}, near {} far {} depth {} offset {}",
            config.grid_dim,
            config.grid_dim,
            cell_size,
            config.near_scale,
            config.far_scale,
            config.z_extent,
            config.z_offset
        );

        Ok(Self {
            alpha_rise_factor: config.alpha_rise_factor,
            alpha_decay_factor: config.alpha_decay_factor,
            cell_size,
            footprint: Footprint::from_config(&config),
            pool: SlotPool::new(capacity),
            cell_to_slot: HashMap::with_capacity(capacity as usize),
            slots: vec![Slot::default(); capacity as usize].into_boxed_slice(),
            records: vec![CellRecord::default(); capacity as usize].into_boxed_slice(),
            last_pose: None,
            range: None,
            stats: GridStats::default(),
            config,
        })
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advances one tick with the camera at `(x, z)` and heading `theta`.
    pub fn update(&mut self, x: f64, z: f64, theta: f64) {
        self.update_pose(CameraPose::new(x, z, theta));
    }

    /// Advances one tick with the given camera pose.
    ///
    /// A non-finite pose yields an empty footprint: every bound cell is
    /// released and starts fading out.
    pub fn update_pose(&mut self, pose: CameraPose) {
        if !pose.is_finite() {
            tracing::warn!(
                "Non-finite camera pose ({}, {}, {}); releasing all cells",
                pose.x,
                pose.z,
                pose.heading
            );
        }

        let moving = fade::is_moving(
            self.last_pose.as_ref(),
            &pose,
            self.config.snap_on_translation,
        );
        self.last_pose = Some(pose);
        let rates = FadeRates::for_tick(self.alpha_rise_factor, self.alpha_decay_factor, moving);

        let mut stats = GridStats {
            tick: self.stats.tick + 1,
            moving,
            ..GridStats::default()
        };

        self.footprint.set_pose(pose);
        for slot in self.slots.iter_mut() {
            slot.used = false;
        }

        self.range = self.footprint.candidate_range(self.cell_size);
        if let Some(range) = self.range {
            stats.candidates = range.len();
            for (ix, iz) in range.iter() {
                self.reconcile_cell(CellCoord::new(ix, iz), rates.rise, &mut stats);
            }
        }

        self.release_stale(&mut stats);
        self.advance_fades(rates.decay, &mut stats);

        for slot in self.slots.iter_mut() {
            slot.used_last = slot.used;
        }

        self.finish_stats(&mut stats);
        if stats.dropped > 0 {
            tracing::debug!(
                "Tick {}: {} intersecting cells dropped (pool of {} exhausted)",
                stats.tick,
                stats.dropped,
                self.pool.capacity()
            );
        }
        tracing::trace!(
            "Tick {}: {} candidates, {} intersecting, +{} ={} -{}, {} decaying",
            stats.tick,
            stats.candidates,
            stats.intersecting,
            stats.allocated,
            stats.retained,
            stats.released,
            stats.decaying
        );
        self.stats = stats;
    }

    /// Step 2 for a single candidate cell.
    fn reconcile_cell(&mut self, cell: CellCoord, rise: f64, stats: &mut GridStats) {
        let intersects = self.footprint.intersects_cell(&cell.bounds(self.cell_size));
        let bound = self.cell_to_slot.get(&cell).copied();

        match (intersects, bound) {
            (true, Some(slot)) => {
                let i = slot as usize;
                let state = &mut self.slots[i];
                state.used = true;
                state.alpha = fade::rise(state.alpha, rise);
                self.records[i].alpha = narrow(state.alpha);
                stats.retained += 1;
            }
            (true, None) => {
                if let Some(slot) = self.pool.acquire() {
                    self.bind(cell, slot);
                    stats.allocated += 1;
                } else {
                    stats.dropped += 1;
                }
            }
            (false, Some(slot)) => {
                self.release(slot);
                stats.released += 1;
            }
            (false, None) => {}
        }

        if intersects {
            stats.intersecting += 1;
        }
    }

    /// Binds a freshly acquired slot, cutting short any fade-out it had.
    fn bind(&mut self, cell: CellCoord, slot: u32) {
        let i = slot as usize;
        self.slots[i] = Slot {
            cell: Some(cell),
            alpha: SEED_ALPHA,
            used: true,
            used_last: self.slots[i].used_last,
            decaying: false,
        };
        self.records[i] = CellRecord::bound(cell.x, cell.z, SEED_ALPHA);
        self.cell_to_slot.insert(cell, slot);
    }

    /// Unbinds a slot and starts its fade-out. The record keeps its cell and
    /// stays active until the fade finishes.
    fn release(&mut self, slot: u32) {
        let state = &mut self.slots[slot as usize];
        if let Some(cell) = state.cell.take() {
            self.cell_to_slot.remove(&cell);
        }
        state.used = false;
        state.decaying = true;

        if self.config.slot_reuse == SlotReuse::Immediate {
            self.pool.release(slot);
        }
    }

    /// Step 3: slots used last tick whose cells were not visited this tick.
    fn release_stale(&mut self, stats: &mut GridStats) {
        for slot in 0..self.pool.capacity() {
            let state = &self.slots[slot as usize];
            if state.used_last && !state.used && state.cell.is_some() {
                self.release(slot);
                stats.released += 1;
            }
        }
    }

    /// Step 4: decay every released slot.
    fn advance_fades(&mut self, rate: f64, stats: &mut GridStats) {
        for (i, state) in self.slots.iter_mut().enumerate() {
            if !state.decaying {
                continue;
            }
            match fade::decay(state.alpha, rate) {
                Decay::Fading(alpha) => {
                    state.alpha = alpha;
                    self.records[i].alpha = narrow(alpha);
                }
                Decay::Finished => {
                    state.alpha = 0.0;
                    state.decaying = false;
                    self.records[i].alpha = 0.0;
                    self.records[i].active = 0.0;
                    stats.faded_out += 1;

                    if self.config.slot_reuse == SlotReuse::AfterFade {
                        #[allow(clippy::cast_possible_truncation)]
                        self.pool.release(i as u32);
                    }
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn finish_stats(&self, stats: &mut GridStats) {
        stats.bound = self.cell_to_slot.len() as u32;
        stats.available = self.pool.available_count();
        stats.decaying = self.slots.iter().filter(|s| s.decaying).count() as u32;
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// World size of one cell.
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of slots: `grid_dim²`.
    #[inline]
    #[must_use]
    pub fn num_cells(&self) -> u32 {
        self.pool.capacity()
    }

    /// `max(near_scale, far_scale, z_extent)`.
    #[inline]
    #[must_use]
    pub fn grid_scale(&self) -> f64 {
        self.config.grid_scale()
    }

    /// Slots per axis.
    #[inline]
    #[must_use]
    pub fn grid_dim(&self) -> u32 {
        self.config.grid_dim
    }

    /// Width and height of the record texture, in texels.
    #[inline]
    #[must_use]
    pub fn texture_extent(&self) -> (u32, u32) {
        (self.config.grid_dim, self.config.grid_dim)
    }

    /// Lowest cell of the last candidate range, or `None` before the first
    /// tick and while the footprint is degenerate.
    #[must_use]
    pub fn origin(&self) -> Option<CellCoord> {
        self.range.map(|r| CellCoord::new(r.min_x, r.min_z))
    }

    /// Cells scanned by the last tick.
    #[inline]
    #[must_use]
    pub fn candidate_range(&self) -> Option<CellRange> {
        self.range
    }

    /// The footprint as posed by the last tick.
    #[inline]
    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// The config this grid was built from.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The pose passed to the last tick.
    #[inline]
    #[must_use]
    pub fn last_pose(&self) -> Option<CameraPose> {
        self.last_pose
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// One record per slot, in slot order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    /// Records flattened to `[x, z, active, alpha]` per slot.
    #[inline]
    #[must_use]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.records)
    }

    /// Records as raw bytes, ready for a texture upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    /// Copies the current records into `exchange` for a render thread.
    pub fn publish(&self, exchange: &RecordExchange<CellRecord>) {
        exchange.publish_from(&self.records);
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// Slot bound to `cell`, if any.
    #[inline]
    #[must_use]
    pub fn slot_for_cell(&self, cell: CellCoord) -> Option<u32> {
        self.cell_to_slot.get(&cell).copied()
    }

    /// Cell bound to `slot`, if any.
    #[must_use]
    pub fn cell_for_slot(&self, slot: u32) -> Option<CellCoord> {
        self.slots.get(slot as usize).and_then(|s| s.cell)
    }

    /// Every `(cell, slot)` binding, in no particular order.
    pub fn bound_cells(&self) -> impl Iterator<Item = (CellCoord, u32)> + '_ {
        self.cell_to_slot.iter().map(|(cell, slot)| (*cell, *slot))
    }

    /// Number of bound cells.
    #[inline]
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.cell_to_slot.len()
    }

    /// Number of slots a new cell could take right now.
    #[inline]
    #[must_use]
    pub fn available_count(&self) -> u32 {
        self.pool.available_count()
    }

    /// Number of slots still fading out.
    #[must_use]
    pub fn decaying_count(&self) -> usize {
        self.slots.iter().filter(|s| s.decaying).count()
    }

    /// True while `slot` is fading out.
    #[must_use]
    pub fn is_decaying(&self, slot: u32) -> bool {
        self.slots.get(slot as usize).is_some_and(|s| s.decaying)
    }

    /// Full-precision alpha of `slot`.
    #[must_use]
    pub fn alpha(&self, slot: u32) -> Option<f64> {
        self.slots.get(slot as usize).map(|s| s.alpha)
    }

    /// Statistics from the last tick.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &GridStats {
        &self.stats
    }
}

#[allow(clippy::cast_possible_truncation)]
#[inline]
fn narrow(alpha: f64) -> f32 {
    alpha as f32
}

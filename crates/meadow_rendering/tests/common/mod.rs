//! Invariant checks shared by the grid integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};

use meadow_rendering::{CellCoord, FrustumGrid, SlotReuse};

/// Cells the posed footprint overlaps, straight from the geometry.
pub fn intersecting_cells(grid: &FrustumGrid) -> BTreeSet<CellCoord> {
    let Some(range) = grid.candidate_range() else {
        return BTreeSet::new();
    };
    range
        .iter()
        .map(CellCoord::from)
        .filter(|cell| grid.footprint().intersects_cell(&cell.bounds(grid.cell_size())))
        .collect()
}

/// Cells currently holding a slot.
pub fn bound_cells(grid: &FrustumGrid) -> BTreeSet<CellCoord> {
    grid.bound_cells().map(|(cell, _)| cell).collect()
}

/// Checks every structural invariant of the grid after a tick.
pub fn assert_invariants(grid: &FrustumGrid) {
    let capacity = grid.num_cells();
    let bound = grid.bound_count();
    assert!(bound <= capacity as usize, "{bound} cells bound with {capacity} slots");

    // One slot per cell, one cell per slot.
    let mut slots = HashSet::new();
    for (cell, slot) in grid.bound_cells() {
        assert!(slot < capacity);
        assert!(slots.insert(slot), "slot {slot} bound twice");
        assert_eq!(grid.cell_for_slot(slot), Some(cell));
        assert!(!grid.is_decaying(slot), "bound slot {slot} is decaying");

        let record = grid.records()[slot as usize];
        assert_eq!((record.cell_x, record.cell_z), (cell.x as f32, cell.z as f32));
    }

    for slot in 0..capacity {
        let record = grid.records()[slot as usize];
        let alpha = grid.alpha(slot).unwrap();
        assert!((0.0..=1.0).contains(&alpha), "slot {slot} alpha {alpha}");
        assert!((0.0..=1.0).contains(&record.alpha));
        assert!(record.active == 0.0 || record.active == 1.0);

        let live = grid.cell_for_slot(slot).is_some() || grid.is_decaying(slot);
        assert_eq!(record.is_active(), live, "slot {slot} active flag out of sync");
        if !live {
            assert_eq!(record.alpha, 0.0);
        }
    }

    let available = grid.available_count() as usize;
    match grid.config().slot_reuse {
        SlotReuse::Immediate => assert_eq!(available + bound, capacity as usize),
        SlotReuse::AfterFade => {
            assert_eq!(available + bound + grid.decaying_count(), capacity as usize);
        }
    }

    let stats = grid.stats();
    assert_eq!(stats.allocated + stats.retained + stats.dropped, stats.intersecting);
    assert_eq!(stats.bound as usize, bound);

    // Bound cells always overlap the footprint; with nothing dropped they
    // are exactly the overlapping cells.
    let expected = intersecting_cells(grid);
    let actual = bound_cells(grid);
    assert!(actual.is_subset(&expected), "bound cell outside the footprint");
    if stats.dropped == 0 {
        assert_eq!(actual, expected);
    }
}

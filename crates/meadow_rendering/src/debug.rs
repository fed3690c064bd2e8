//! Text dump of a grid's last tick, for logs and demos.
//!
//! One character per cell of the candidate range, far rows first:
//!
//! | Char | Meaning                                   |
//! |------|-------------------------------------------|
//! | `#`  | bound to a slot                           |
//! | `+`  | released, its slot still fading out       |
//! | `x`  | intersecting but dropped (pool exhausted) |
//! | `.`  | outside the footprint                     |

use std::collections::HashSet;
use std::fmt::Write;

use crate::grid::{CellCoord, FrustumGrid};

/// Renders the last tick's candidate range as ASCII art.
///
/// Returns an empty string before the first tick or while the footprint is
/// degenerate.
#[must_use]
pub fn render_ascii(grid: &FrustumGrid) -> String {
    let Some(range) = grid.candidate_range() else {
        return String::new();
    };

    #[allow(clippy::cast_possible_truncation)]
    let fading: HashSet<CellCoord> = (0..grid.num_cells())
        .filter(|&slot| grid.is_decaying(slot))
        .map(|slot| {
            let record = grid.records()[slot as usize];
            CellCoord::new(record.cell_x as i32, record.cell_z as i32)
        })
        .collect();

    let mut out = String::new();
    for z in (range.min_z..=range.max_z).rev() {
        for x in range.min_x..=range.max_x {
            let cell = CellCoord::new(x, z);
            let ch = if grid.slot_for_cell(cell).is_some() {
                '#'
            } else if fading.contains(&cell) {
                '+'
            } else if grid.footprint().intersects_cell(&cell.bounds(grid.cell_size())) {
                'x'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }

    let stats = grid.stats();
    let _ = writeln!(
        out,
        "tick {} | bound {} | free {} | fading {} | dropped {}",
        stats.tick, stats.bound, stats.available, stats.decaying, stats.dropped
    );
    out
}

//! GPU-facing data produced by the frustum grid.
//!
//! The grid writes one [`CellRecord`] per slot. The renderer uploads the
//! whole buffer as a small float texture and each instance looks up its
//! slot to find which world cell it belongs to and how opaque to draw.

mod cell_record;

pub use cell_record::CellRecord;

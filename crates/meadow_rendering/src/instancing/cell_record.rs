//! Per-slot record uploaded to the GPU.

use bytemuck::{Pod, Zeroable};

/// One slot's entry in the frustum-grid texture.
///
/// Four `f32`s so a `grid_dim × grid_dim` buffer of records uploads as an
/// RGBA32F texture without conversion: R = cell X, G = cell Z,
/// B = active (0 or 1), A = fade alpha.
///
/// Cell indices are exact up to ±2²⁴.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CellRecord {
    /// Logical cell X index.
    pub cell_x: f32,
    /// Logical cell Z index.
    pub cell_z: f32,
    /// 1.0 while the slot draws something, 0.0 otherwise.
    pub active: f32,
    /// Fade alpha in `[0, 1]`.
    pub alpha: f32,
}

impl CellRecord {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Floats per record in the flattened buffer.
    pub const COMPONENTS: usize = 4;

    /// A freshly bound slot: active, starting at `alpha`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn bound(cell_x: i32, cell_z: i32, alpha: f64) -> Self {
        Self {
            cell_x: cell_x as f32,
            cell_z: cell_z as f32,
            active: 1.0,
            alpha: alpha as f32,
        }
    }

    /// True while the slot contributes to the frame.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_record_size() {
        // One RGBA32F texel.
        assert_eq!(CellRecord::SIZE, 16);
        assert_eq!(CellRecord::SIZE, CellRecord::COMPONENTS * 4);
    }

    #[test]
    fn test_flattened_layout() {
        let records = [CellRecord::bound(-3, 7, 0.5), CellRecord::default()];
        let floats: &[f32] = bytemuck::cast_slice(&records);

        assert_eq!(floats, &[-3.0, 7.0, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0]);
        assert!(records[0].is_active());
        assert!(!records[1].is_active());
    }
}

//! Mounting orientation of the matrix.
//!
//! The scan driver asks for one output row at a time, so every rotation is
//! expressed as "build output row `k` from the source bitmap".
use crate::core::MATRIX_ROWS;
use crate::display::glyphs::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Decode the 2-bit orientation strap.
    pub const fn from_straps(straps: u8) -> Self {
        match straps & 0x03 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Output row `k` (0..=7) of `source` under this rotation.
    pub fn row(self, source: &Bitmap, k: usize) -> u8 {
        let k = k & (MATRIX_ROWS - 1);
        match self {
            Rotation::Deg0 => source[k],
            Rotation::Deg90 => source
                .iter()
                .enumerate()
                .fold(0, |acc, (r, bits)| acc | (((bits >> k) & 1) << (7 - r))),
            Rotation::Deg180 => source[7 - k].reverse_bits(),
            Rotation::Deg270 => source
                .iter()
                .enumerate()
                .fold(0, |acc, (j, bits)| acc | (((bits >> (7 - k)) & 1) << j)),
        }
    }

    /// Whole bitmap under this rotation.
    pub fn rotate(self, source: &Bitmap) -> Bitmap {
        let mut out = [0u8; MATRIX_ROWS];
        for (k, row) in out.iter_mut().enumerate() {
            *row = self.row(source, k);
        }
        out
    }
}

//! Glyph storage and digit remapping.
//!
//! The glyph table is mutable at runtime: pattern commands overwrite a glyph
//! four rows at a time. The remap table is fixed at build time and only
//! translates digit codes 0..=9; every other code passes through unchanged.
mod font;

pub use font::*;

use crate::core::{GLYPH_COUNT, MATRIX_ROWS};

/// Eight rows, bit `n` of a row is column `n`.
pub type Bitmap = [u8; MATRIX_ROWS];

//==================================================================================GLYPH_TABLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: [Bitmap; GLYPH_COUNT],
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphTable {
    /// Table loaded with the built-in font.
    pub const fn new() -> Self {
        Self {
            glyphs: font::DEFAULT_GLYPHS,
        }
    }

    pub const fn len(&self) -> usize {
        GLYPH_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        GLYPH_COUNT == 0
    }

    pub fn get(&self, index: u8) -> Option<&Bitmap> {
        self.glyphs.get(index as usize)
    }

    /// Overwrite four consecutive rows starting at `first_row` (0 or 4).
    /// Returns `false` when the glyph index is out of range.
    pub fn write_rows(&mut self, index: u8, first_row: usize, rows: &[u8; 4]) -> bool {
        match self.glyphs.get_mut(index as usize) {
            Some(glyph) if first_row + rows.len() <= MATRIX_ROWS => {
                glyph[first_row..first_row + rows.len()].copy_from_slice(rows);
                true
            }
            _ => false,
        }
    }
}

//==================================================================================REMAP
/// Digit code to glyph index translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapTable([u8; 10]);

impl RemapTable {
    /// Digits map onto themselves.
    pub const IDENTITY: RemapTable = RemapTable([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// Three two-letter labels followed by digits 3..=9.
    pub const LABELS_KG_EG_OG: RemapTable =
        RemapTable([GLYPH_KG, GLYPH_EG, GLYPH_OG, 3, 4, 5, 6, 7, 8, 9]);

    pub const fn new(map: [u8; 10]) -> Self {
        Self(map)
    }

    /// Glyph index for `code`.
    pub const fn resolve(&self, code: u8) -> u8 {
        if (code as usize) < self.0.len() {
            self.0[code as usize]
        } else {
            code
        }
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::IDENTITY
    }
}

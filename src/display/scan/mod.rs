//! Multiplexed row scan.
//!
//! One [`ScanDriver::step`] lights one row: the red and green bytes of the
//! (rotated) row are interleaved into a 16-bit word, shifted out, and
//! committed with the blank/latch sequence of the column driver. After the
//! eighth row of a frame both channel animations advance.
use crate::display::rotation::Rotation;
use crate::display::DisplayContext;

/// Physical column driver and row multiplexer.
pub trait MatrixDriver {
    /// Shift one interleaved 16-bit word out, MSB first.
    fn write_word(&mut self, word: u16);
    /// Drive the output-blank line; high turns the row off.
    fn set_blank(&mut self, high: bool);
    /// Drive the latch line; a high/low pulse moves shifted data to the outputs.
    fn set_latch(&mut self, high: bool);
    /// Select the row (0..=7) powered by the row multiplexer.
    fn select_row(&mut self, row: u8);
}

/// Interleave the red and green bytes of a row: for every column from 0 to
/// 7, the red bit then the green bit, most significant bit first.
pub const fn interleave(red: u8, green: u8) -> u16 {
    let mut word: u16 = 0;
    let mut col = 0;
    while col < 8 {
        word = (word << 1) | ((red >> col) & 1) as u16;
        word = (word << 1) | ((green >> col) & 1) as u16;
        col += 1;
    }
    word
}

/// Row scan state bound to one matrix driver.
#[derive(Debug)]
pub struct ScanDriver<D: MatrixDriver> {
    driver: D,
    row: u8,
    rotation: Rotation,
}

impl<D: MatrixDriver> ScanDriver<D> {
    pub fn new(driver: D, rotation: Rotation) -> Self {
        Self {
            driver,
            row: 0,
            rotation,
        }
    }

    /// Row lit by the next [`step`](Self::step).
    pub fn current_row(&self) -> u8 {
        self.row
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Orientation straps are sampled by the firmware; a change applies from the next row.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Refresh one row. Returns `true` when the step completed a frame and
    /// the animations were advanced.
    pub fn step(&mut self, display: &DisplayContext) -> bool {
        let k = self.row as usize & 7;
        let (red, green) = display.snapshot();
        let word = interleave(self.rotation.row(&red, k), self.rotation.row(&green, k));

        self.driver.write_word(word);
        self.driver.set_blank(true);
        self.driver.select_row(k as u8);
        self.driver.set_latch(true);
        self.driver.set_latch(false);
        self.driver.set_blank(false);

        self.row = if self.row >= 7 { 0 } else { self.row + 1 };
        if self.row == 7 {
            display.tick_animations();
            return true;
        }
        false
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;

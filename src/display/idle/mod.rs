//! Idle demo shown until the first display command arrives.
//!
//! Digits 0..=9 cycle every two seconds. Each cycle draws the digit behind a
//! green line climbing from the bottom row, holds it, then erases it behind a
//! red line climbing the same way. A bus-health pixel in the bottom-right
//! corner (row 7, column 0) is overlaid on every frame.
use crate::core::{Channel, IdleTiming, MATRIX_ROWS};
use crate::display::glyphs::Bitmap;
use crate::display::DisplayContext;
use crate::protocol::managment::bus_health::BusErrorStats;
use crate::protocol::managment::join_handshake::JoinStatus;

/// Row and mask of the status pixel.
const INDICATOR_ROW: usize = 7;
const INDICATOR_MASK: u8 = 0x01;

//==================================================================================BUS_INDICATOR
/// Color of the bus-health pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusIndicator {
    /// Acknowledged and never bus-off.
    Off,
    /// Recovery in progress (red and green).
    Recovering,
    /// Bus-off seen at least once.
    BusOff,
    /// Presence not acknowledged yet.
    NoAck,
}

impl BusIndicator {
    /// Evaluate the indicator, first matching rule wins.
    pub fn evaluate(join: &JoinStatus, stats: &BusErrorStats) -> Self {
        if join.ack_received && stats.bus_off_count == 0 {
            BusIndicator::Off
        } else if stats.recovery_in_progress {
            BusIndicator::Recovering
        } else if stats.bus_off_count > 0 {
            BusIndicator::BusOff
        } else {
            BusIndicator::NoAck
        }
    }

    /// OR the pixel into the frame.
    pub fn overlay(self, frame: &mut IdleFrame) {
        let (red, green) = match self {
            BusIndicator::Off => (false, false),
            BusIndicator::Recovering => (true, true),
            BusIndicator::BusOff => (true, false),
            BusIndicator::NoAck => (false, true),
        };
        if red {
            frame.red[INDICATOR_ROW] |= INDICATOR_MASK;
        }
        if green {
            frame.green[INDICATOR_ROW] |= INDICATOR_MASK;
        }
    }
}

//==================================================================================SEQUENCER
/// One composited idle frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleFrame {
    pub red: Bitmap,
    pub green: Bitmap,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSequencer {
    timing: IdleTiming,
}

impl IdleSequencer {
    pub const fn new(timing: IdleTiming) -> Self {
        Self { timing }
    }

    pub const fn timing(&self) -> &IdleTiming {
        &self.timing
    }

    /// Digit (0..=9) shown at `tick`.
    pub fn digit(&self, tick: u32) -> u8 {
        ((tick / self.timing.cycle_ticks().max(1)) % 10) as u8
    }

    /// Frame for `tick` with `glyph` as the current digit, without indicator.
    pub fn frame(&self, tick: u32, glyph: &Bitmap) -> IdleFrame {
        let cycle_pos = tick % self.timing.cycle_ticks().max(1);
        let draw = self.timing.draw_ticks();
        let hold = self.timing.hold_ticks();
        let mut frame = IdleFrame::default();

        if cycle_pos < draw {
            let pos = (cycle_pos / (draw / 8).max(1)) as usize;
            for (i, row) in frame.green.iter_mut().enumerate() {
                if pos >= MATRIX_ROWS || i >= 7 - pos {
                    *row = glyph[i];
                }
            }
            if pos < MATRIX_ROWS {
                frame.green[7 - pos] = 0xFF;
            }
        } else if cycle_pos < draw + hold {
            frame.green = *glyph;
        } else {
            let erase_pos = cycle_pos - draw - hold;
            let pos = ((erase_pos / (self.timing.erase_ticks() / 8).max(1)) as usize).min(7);
            let line_row = 7 - pos;
            frame.green[..line_row].copy_from_slice(&glyph[..line_row]);
            frame.red[line_row] = 0xFF;
        }
        frame
    }

    /// Render the idle frame for `tick` into `display`. Does nothing when the
    /// digit has no glyph.
    pub fn render(&self, tick: u32, display: &DisplayContext, indicator: BusIndicator) {
        let index = display.remap().resolve(self.digit(tick));
        let Some(glyph) = display.glyph(index) else {
            return;
        };
        let mut frame = self.frame(tick, &glyph);
        indicator.overlay(&mut frame);
        display.load_channel(Channel::Green, &frame.green);
        display.load_channel(Channel::Red, &frame.red);
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;

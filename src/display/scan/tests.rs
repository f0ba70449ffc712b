use super::*;
use crate::core::{Channel, ColorSelect};
use crate::display::animation::AnimationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Word(u16),
    Blank(bool),
    Latch(bool),
    Row(u8),
}

/// Records every signal edge of the last step.
#[derive(Default)]
struct RecordingDriver {
    log: [Option<Signal>; 8],
    len: usize,
}

impl RecordingDriver {
    fn push(&mut self, signal: Signal) {
        if self.len < self.log.len() {
            self.log[self.len] = Some(signal);
        }
        self.len += 1;
    }

    fn take(&mut self) -> [Option<Signal>; 8] {
        self.len = 0;
        core::mem::take(&mut self.log)
    }
}

impl MatrixDriver for RecordingDriver {
    fn write_word(&mut self, word: u16) {
        self.push(Signal::Word(word));
    }
    fn set_blank(&mut self, high: bool) {
        self.push(Signal::Blank(high));
    }
    fn set_latch(&mut self, high: bool) {
        self.push(Signal::Latch(high));
    }
    fn select_row(&mut self, row: u8) {
        self.push(Signal::Row(row));
    }
}

#[test]
/// Interleaving starts with the red bit of column 0 in the MSB.
fn test_interleave_bit_order() {
    assert_eq!(interleave(0x01, 0x00), 0x8000);
    assert_eq!(interleave(0x00, 0x01), 0x4000);
    assert_eq!(interleave(0x80, 0x00), 0x0002);
    assert_eq!(interleave(0x00, 0x80), 0x0001);
    assert_eq!(interleave(0xFF, 0x00), 0xAAAA);
    assert_eq!(interleave(0xFF, 0xFF), 0xFFFF);
}

#[test]
/// A step writes the word, then blanks, selects, latches and unblanks.
fn test_step_signal_sequence() {
    let display = DisplayContext::default();
    display.load_channel(Channel::Red, &[0x01, 0, 0, 0, 0, 0, 0, 0]);
    display.load_channel(Channel::Green, &[0x80, 0, 0, 0, 0, 0, 0, 0]);
    let mut scan = ScanDriver::new(RecordingDriver::default(), Rotation::Deg0);

    scan.step(&display);
    let log = scan.driver_mut().take();
    assert_eq!(
        log,
        [
            Some(Signal::Word(0x8001)),
            Some(Signal::Blank(true)),
            Some(Signal::Row(0)),
            Some(Signal::Latch(true)),
            Some(Signal::Latch(false)),
            Some(Signal::Blank(false)),
            None,
            None,
        ]
    );
    assert_eq!(scan.current_row(), 1);
}

#[test]
/// Rows wrap from 7 back to 0 and animations advance once per eight steps.
fn test_frame_boundary_ticks_animation() {
    let display = DisplayContext::default();
    let config = AnimationConfig {
        glyph: 16,
        period: 1,
        steps: 100,
        dx: 1,
        ..AnimationConfig::new()
    };
    display.set_animated_symbol(&config, ColorSelect::Red);
    let mut scan = ScanDriver::new(RecordingDriver::default(), Rotation::Deg0);

    let frames: usize = (0..24).filter(|_| scan.step(&display)).count();
    assert_eq!(frames, 3);
    assert_eq!(scan.current_row(), 0);
    assert_eq!(display.animation(Channel::Red).position(), (3, 0));
}

#[test]
/// The selected row follows the raw row counter whatever the rotation.
fn test_rotation_applies_to_row_data() {
    let display = DisplayContext::default();
    // Column 0 lit in red on every row.
    display.load_channel(Channel::Red, &[0x01; 8]);
    let mut scan = ScanDriver::new(RecordingDriver::default(), Rotation::Deg90);

    // Rotated by 90 degrees the column becomes row 0.
    scan.step(&display);
    let log = scan.driver_mut().take();
    assert_eq!(log[0], Some(Signal::Word(0xAAAA)));
    assert_eq!(log[2], Some(Signal::Row(0)));

    scan.step(&display);
    let log = scan.driver_mut().take();
    assert_eq!(log[0], Some(Signal::Word(0)));
    assert_eq!(log[2], Some(Signal::Row(1)));
}

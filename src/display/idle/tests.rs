use super::*;

const GLYPH: Bitmap = [0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00];

fn sequencer() -> IdleSequencer {
    IdleSequencer::new(IdleTiming::new(1000))
}

#[test]
/// The digit advances every two seconds and wraps after nine.
fn test_digit_cycle() {
    let idle = sequencer();
    assert_eq!(idle.digit(0), 0);
    assert_eq!(idle.digit(1_999), 0);
    assert_eq!(idle.digit(2_000), 1);
    assert_eq!(idle.digit(19_999), 9);
    assert_eq!(idle.digit(20_000), 0);
}

#[test]
/// During the draw phase a green line climbs with the glyph revealed below it.
fn test_draw_phase() {
    let idle = sequencer();

    let start = idle.frame(0, &GLYPH);
    assert_eq!(start.green, [0, 0, 0, 0, 0, 0, 0, 0xFF]);
    assert_eq!(start.red, [0; 8]);

    // 62 ticks per line position: position 3 puts the line on row 4.
    let middle = idle.frame(186, &GLYPH);
    assert_eq!(middle.green, [0, 0, 0, 0, 0xFF, 0x66, 0x66, 0x00]);

    // Past the eighth position the whole glyph shows without a line.
    let end = idle.frame(499, &GLYPH);
    assert_eq!(end.green, GLYPH);
}

#[test]
/// The hold phase shows the plain glyph in green.
fn test_hold_phase() {
    let idle = sequencer();
    for tick in [500, 1_000, 1_499] {
        let frame = idle.frame(tick, &GLYPH);
        assert_eq!(frame.green, GLYPH);
        assert_eq!(frame.red, [0; 8]);
    }
}

#[test]
/// During the erase phase a red line climbs and removes the glyph behind it.
fn test_erase_phase() {
    let idle = sequencer();

    let start = idle.frame(1_500, &GLYPH);
    assert_eq!(start.green, [0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0]);
    assert_eq!(start.red, [0, 0, 0, 0, 0, 0, 0, 0xFF]);

    let middle = idle.frame(1_500 + 62 * 5, &GLYPH);
    assert_eq!(middle.green, [0x3C, 0x66, 0, 0, 0, 0, 0, 0]);
    assert_eq!(middle.red, [0, 0, 0xFF, 0, 0, 0, 0, 0]);

    // The line stops on the top row.
    let end = idle.frame(1_999, &GLYPH);
    assert_eq!(end.green, [0; 8]);
    assert_eq!(end.red, [0xFF, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
/// Indicator rules are evaluated in priority order.
fn test_indicator_priority() {
    let mut join = JoinStatus::new();
    let mut stats = BusErrorStats::new();
    assert_eq!(BusIndicator::evaluate(&join, &stats), BusIndicator::NoAck);

    join.ack_received = true;
    assert_eq!(BusIndicator::evaluate(&join, &stats), BusIndicator::Off);

    stats.bus_off_count = 1;
    assert_eq!(BusIndicator::evaluate(&join, &stats), BusIndicator::BusOff);

    stats.recovery_in_progress = true;
    assert_eq!(BusIndicator::evaluate(&join, &stats), BusIndicator::Recovering);

    // Recovery alone with a clean history and an ack shows nothing.
    stats.bus_off_count = 0;
    assert_eq!(BusIndicator::evaluate(&join, &stats), BusIndicator::Off);
}

#[test]
/// The indicator pixel is OR-ed into row 7, column 0.
fn test_indicator_overlay() {
    let mut frame = IdleFrame::default();
    frame.green[7] = 0xF0;
    BusIndicator::Recovering.overlay(&mut frame);
    assert_eq!(frame.red[7], 0x01);
    assert_eq!(frame.green[7], 0xF1);

    let mut frame = IdleFrame::default();
    BusIndicator::Off.overlay(&mut frame);
    assert_eq!(frame, IdleFrame::default());
}

#[test]
/// Rendering writes both channels and stops their animations.
fn test_render_into_display() {
    let display = DisplayContext::default();
    let idle = sequencer();
    idle.render(2_600, &display, BusIndicator::NoAck);

    let one = display.glyph(1).unwrap();
    let mut expected = one;
    expected[7] |= 0x01;
    assert_eq!(display.screen(Channel::Green), expected);
    assert_eq!(display.screen(Channel::Red), [0; 8]);
    assert!(!display.animation(Channel::Green).is_active());
}

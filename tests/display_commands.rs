//! Display commands end to end: frames enter through the receive interrupt,
//! the receive runner applies them and the row scan shows the result.
mod helpers;

use helpers::{MockMatrix, TokioTimer};
use matrix_node::{
    core::{Channel, ColorSelect},
    display::{
        rotation::Rotation,
        scan::{interleave, ScanDriver},
        DisplayContext,
    },
    protocol::{
        managment::receive_runner::ReceiveRunner,
        messages::Command,
        transport::context::DefaultTransport,
    },
};
use static_cell::StaticCell;

static TRANSPORT: StaticCell<DefaultTransport> = StaticCell::new();
static DISPLAY: StaticCell<DisplayContext> = StaticCell::new();

const NODE: u8 = 2;

fn deliver(transport: &DefaultTransport, command: Command) {
    let frame = command.to_frame(NODE).expect("node address fits");
    transport
        .on_rx_pending(&frame)
        .expect("pool and queue have room");
}

#[tokio::test]
async fn test_symbol_then_red_screen() {
    let transport: &'static DefaultTransport = TRANSPORT.init(DefaultTransport::new());
    let display: &'static DisplayContext = DISPLAY.init(DisplayContext::default());
    display.set_idle_mode(true);

    deliver(
        transport,
        Command::SetSymbol {
            code: 5,
            color: ColorSelect::Both,
        },
    );
    deliver(transport, Command::SetRedScreen([0; 8]));

    let mut runner = ReceiveRunner::new(transport, display, TokioTimer::new());
    runner.run_once(100).await.unwrap();
    runner.run_once(100).await.unwrap();

    let five = display.glyph(5).unwrap();
    assert_eq!(display.screen(Channel::Red), [0; 8]);
    assert_eq!(display.screen(Channel::Green), five);
    assert!(!display.idle_mode());
    assert_eq!(transport.pool().in_use(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_receive_times_out_on_silent_bus() {
    let transport = DefaultTransport::new();
    let display = DisplayContext::default();
    let mut runner = ReceiveRunner::new(&transport, &display, TokioTimer::new());

    assert!(runner.run_once(100).await.is_err());
}

#[tokio::test]
async fn test_foreign_frames_are_dropped() {
    let transport = DefaultTransport::new();
    let display = DisplayContext::default();
    let mut runner = ReceiveRunner::new(&transport, &display, TokioTimer::new());

    let mut frame = Command::SetSymbol {
        code: 1,
        color: ColorSelect::Red,
    }
    .to_frame(NODE)
    .unwrap();
    frame.data[0] = 0x42;
    transport.on_rx_pending(&frame).unwrap();

    assert_eq!(runner.run_once(100).await, Ok(None));
    assert_eq!(display.snapshot(), ([0; 8], [0; 8]));
    assert_eq!(transport.pool().in_use(), 0);
}

#[tokio::test]
async fn test_dynamic_symbol_moves_one_column() {
    let transport = DefaultTransport::new();
    let display = DisplayContext::default();
    let mut runner = ReceiveRunner::new(&transport, &display, TokioTimer::new());

    deliver(
        &transport,
        Command::DynSymbolSet1 {
            glyph: 1,
            period: 2,
            steps: 1,
        },
    );
    deliver(&transport, Command::DynSymbolSet2 { dx: 1, dy: 0 });
    deliver(
        &transport,
        Command::DynSymbolSet3 {
            start_x: 0,
            start_y: 0,
        },
    );
    deliver(
        &transport,
        Command::DynSymbolSet4 {
            color: ColorSelect::Red,
        },
    );
    for _ in 0..4 {
        runner.run_once(100).await.unwrap();
    }
    assert!(display.animation(Channel::Red).is_active());

    let glyph = display.glyph(1).unwrap();
    let shifted = glyph.map(|row| row << 1);
    let mut scan = ScanDriver::new(MockMatrix::default(), Rotation::Deg0);

    // First completed frame draws at the origin.
    let frames = (0..7).filter(|_| scan.step(&display)).count();
    assert_eq!(frames, 1);
    assert_eq!(display.screen(Channel::Red), glyph);

    // Period 2: the next frame holds, the one after moves.
    for _ in 0..8 {
        scan.step(&display);
    }
    assert_eq!(display.screen(Channel::Red), glyph);
    for _ in 0..8 {
        scan.step(&display);
    }
    assert_eq!(display.screen(Channel::Red), shifted);

    scan.driver_mut().rows.clear();
    for _ in 0..8 {
        scan.step(&display);
    }
    for (row, word) in &scan.driver().rows {
        assert_eq!(*word, interleave(shifted[*row as usize], 0));
    }
    assert_eq!(scan.driver().rows.len(), 8);
}

#[tokio::test]
async fn test_pattern_then_symbol() {
    let transport = DefaultTransport::new();
    let display = DisplayContext::default();
    let mut runner = ReceiveRunner::new(&transport, &display, TokioTimer::new());

    deliver(
        &transport,
        Command::SetSymbolPattern {
            glyph: 9,
            half: matrix_node::protocol::messages::PatternHalf::Upper,
            rows: [0x81, 0x42, 0x24, 0x18],
        },
    );
    deliver(
        &transport,
        Command::SetSymbolPattern {
            glyph: 9,
            half: matrix_node::protocol::messages::PatternHalf::Lower,
            rows: [0x18, 0x24, 0x42, 0x81],
        },
    );
    deliver(
        &transport,
        Command::SetSymbol {
            code: 9,
            color: ColorSelect::Green,
        },
    );
    for _ in 0..3 {
        runner.run_once(100).await.unwrap();
    }

    let cross = [0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81];
    assert_eq!(display.screen(Channel::Green), cross);
    assert_eq!(display.screen(Channel::Red), [0; 8]);
}

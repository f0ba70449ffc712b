//! Test doubles for the CAN controller, the LED driver, the watchdog and the timer.
#![allow(dead_code)]
use std::cell::{Cell, RefCell};

use matrix_node::display::scan::MatrixDriver;
use matrix_node::node::Watchdog;
use matrix_node::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        can_controller::{CanController, ErrorFlags},
        node_timer::NodeTimer,
    },
};
use tokio::time::{sleep, Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One call received by [`MockController`].
pub enum ControllerCall {
    Init,
    ReleaseInitMode,
    Filter { bank: u8, id: u32, mask: u32 },
    Start,
    Stop,
    ActivateNotifications,
    Transmit(CanFrame),
    ResetErrors,
}

/// Controller double: always-free mailbox, settable error register, call log.
pub struct MockController {
    calls: RefCell<Vec<ControllerCall>>,
    flags: Cell<u32>,
}

impl MockController {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            flags: Cell::new(0),
        }
    }

    /// Latch `bits` in the error register until the next reset.
    pub fn raise(&self, bits: u32) {
        self.flags.set(self.flags.get() | bits);
    }

    pub fn calls(&self) -> Vec<ControllerCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn transmitted(&self) -> Vec<CanFrame> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ControllerCall::Transmit(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: ControllerCall) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == wanted)
            .count()
    }

    fn log(&self, call: ControllerCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl CanController for MockController {
    type Error = ();

    fn init(&self) -> Result<(), ()> {
        self.log(ControllerCall::Init);
        Ok(())
    }
    fn release_init_mode(&self) {
        self.log(ControllerCall::ReleaseInitMode);
    }
    fn configure_filter(&self, bank: u8, id: u32, mask: u32) {
        self.log(ControllerCall::Filter { bank, id, mask });
    }
    fn start(&self) -> Result<(), ()> {
        self.log(ControllerCall::Start);
        Ok(())
    }
    fn stop(&self) {
        self.log(ControllerCall::Stop);
    }
    fn activate_notifications(&self) -> Result<(), ()> {
        self.log(ControllerCall::ActivateNotifications);
        Ok(())
    }
    fn tx_mailbox_free(&self) -> bool {
        true
    }
    fn transmit(&self, frame: &CanFrame) -> Result<(), ()> {
        self.log(ControllerCall::Transmit(*frame));
        Ok(())
    }
    fn error_flags(&self) -> ErrorFlags {
        ErrorFlags(self.flags.get())
    }
    fn reset_errors(&self) {
        self.log(ControllerCall::ResetErrors);
        self.flags.set(0);
    }
}

#[derive(Default)]
/// LED driver double recording `(row, word)` for every refreshed row.
pub struct MockMatrix {
    pending: u16,
    pub rows: Vec<(u8, u16)>,
}

impl MatrixDriver for MockMatrix {
    fn write_word(&mut self, word: u16) {
        self.pending = word;
    }
    fn set_blank(&mut self, _high: bool) {}
    fn set_latch(&mut self, _high: bool) {}
    fn select_row(&mut self, row: u8) {
        self.rows.push((row, self.pending));
    }
}

#[derive(Default)]
pub struct MockWatchdog {
    pub feeds: u32,
}

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

/// Timer on tokio's clock; pair with `start_paused` for deterministic time.
pub struct TokioTimer {
    start: Instant,
}

impl TokioTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl NodeTimer for TokioTimer {
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

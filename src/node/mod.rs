//! Main loop of the node: watchdog, idle demo, debug broadcaster and row scan.
//!
//! The firmware spawns three activities around one [`DisplayContext`] and one
//! [`TransportContext`]: the [`TransmitRunner`](crate::protocol::managment::transmit_runner::TransmitRunner),
//! the [`ReceiveRunner`](crate::protocol::managment::receive_runner::ReceiveRunner)
//! and the [`MainLoop`] defined here. Each main-loop tick lights one matrix row.
use crate::core::{ColorSelect, IdleTiming, NodeConfig, BOOT_GLYPH};
use crate::display::idle::{BusIndicator, IdleSequencer};
use crate::display::scan::{MatrixDriver, ScanDriver};
use crate::display::DisplayContext;
use crate::protocol::managment::digit_broadcaster::DigitBroadcaster;
use crate::protocol::transport::context::TransportContext;
use crate::protocol::transport::traits::can_controller::CanController;
use crate::protocol::transport::traits::node_timer::NodeTimer;

/// Independent watchdog kicked once per main-loop tick.
pub trait Watchdog {
    fn feed(&mut self);
}

/// Per-tick work of the main loop.
pub struct MainLoop<'a, C, D, W, T, const P: usize, const TXQ: usize, const RXQ: usize>
where
    C: CanController,
    D: MatrixDriver,
    W: Watchdog,
    T: NodeTimer,
{
    display: &'a DisplayContext,
    transport: &'a TransportContext<P, TXQ, RXQ>,
    controller: &'a C,
    scan: ScanDriver<D>,
    watchdog: W,
    timer: T,
    idle: IdleSequencer,
    broadcaster: Option<DigitBroadcaster>,
    tick: u32,
}

impl<'a, C, D, W, T, const P: usize, const TXQ: usize, const RXQ: usize>
    MainLoop<'a, C, D, W, T, P, TXQ, RXQ>
where
    C: CanController,
    D: MatrixDriver,
    W: Watchdog,
    T: NodeTimer,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        display: &'a DisplayContext,
        transport: &'a TransportContext<P, TXQ, RXQ>,
        controller: &'a C,
        driver: D,
        watchdog: W,
        timer: T,
        config: &NodeConfig,
        timing: IdleTiming,
    ) -> Self {
        Self {
            display,
            transport,
            controller,
            scan: ScanDriver::new(driver, config.rotation),
            watchdog,
            timer,
            idle: IdleSequencer::new(timing),
            broadcaster: config
                .broadcast_digits
                .then(|| DigitBroadcaster::new(&timing)),
            tick: 0,
        }
    }

    /// Boot screen: the boot glyph on both channels, then hand over to the
    /// idle demo until the first display command.
    pub fn boot(&mut self) {
        self.display.set_symbol(BOOT_GLYPH, ColorSelect::Both);
        self.display.set_idle_mode(true);
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn scan(&self) -> &ScanDriver<D> {
        &self.scan
    }

    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    /// One iteration. Returns `true` when the scanned row closed a frame.
    pub async fn tick_once(&mut self) -> bool {
        self.watchdog.feed();
        self.tick = self.tick.wrapping_add(1);

        if self.display.idle_mode() {
            let indicator =
                BusIndicator::evaluate(&self.transport.join_status(), &self.transport.stats());
            self.idle.render(self.tick, self.display, indicator);
        }

        if let Some(broadcaster) = self.broadcaster.as_mut() {
            if let Err(_err) = broadcaster
                .run_tick(self.tick, self.transport, self.controller, &mut self.timer)
                .await
            {
                #[cfg(feature = "defmt")]
                defmt::debug!("Digit broadcast dropped: {}", _err);
            }
        }

        self.scan.step(self.display)
    }

    /// Tick forever at the configured rate. Never returns.
    pub async fn run(&mut self) {
        let period_ms = (1000 / self.idle.timing().tick_rate_hz.max(1)).max(1);
        loop {
            self.tick_once().await;
            self.timer.delay_ms(period_ms).await;
        }
    }
}

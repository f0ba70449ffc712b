//! Transmit-side monitor task.
//!
//! [`TransmitRunner::start`] brings the controller up and sends the first
//! presence frame. [`TransmitRunner::run`] then samples the error register
//! every `sample_period_ms`, executes whatever recovery the
//! [`BusHealthMonitor`] asks for, and re-announces the node when the presence
//! acknowledgement is overdue.
use crate::core::{JoinPolicy, NodeConfig, RecoveryPolicy};
use crate::error::{CanIdBuildError, TransportError};
use crate::protocol::managment::bus_health::{BusHealthMonitor, RecoveryAction};
use crate::protocol::managment::join_handshake::JoinHandshake;
use crate::protocol::messages::{FILTER_BASE_IDS, FILTER_EXACT_MASK};
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::context::TransportContext;
use crate::protocol::transport::traits::can_controller::CanController;
use crate::protocol::transport::traits::node_timer::NodeTimer;

/// Install one exact-match filter per protocol identifier, qualified with `node_address`.
pub fn install_filters<C: CanController>(
    controller: &C,
    node_address: u8,
) -> Result<(), CanIdBuildError> {
    for (bank, base) in FILTER_BASE_IDS.iter().enumerate() {
        let id = CanId::builder(*base).with_node(node_address).build()?;
        controller.configure_filter(bank as u8, id.raw(), FILTER_EXACT_MASK);
    }
    Ok(())
}

/// Owns the monitor and handshake state of the transmit task.
pub struct TransmitRunner<'a, C, T, const P: usize, const TXQ: usize, const RXQ: usize>
where
    C: CanController,
    T: NodeTimer,
{
    transport: &'a TransportContext<P, TXQ, RXQ>,
    controller: &'a C,
    timer: T,
    node_address: u8,
    monitor: BusHealthMonitor,
    join: JoinHandshake,
}

impl<'a, C, T, const P: usize, const TXQ: usize, const RXQ: usize>
    TransmitRunner<'a, C, T, P, TXQ, RXQ>
where
    C: CanController,
    T: NodeTimer,
{
    pub fn new(
        transport: &'a TransportContext<P, TXQ, RXQ>,
        controller: &'a C,
        timer: T,
        config: &NodeConfig,
        recovery: RecoveryPolicy,
        join: JoinPolicy,
    ) -> Result<Self, CanIdBuildError> {
        Ok(Self {
            transport,
            controller,
            timer,
            node_address: config.node_address,
            monitor: BusHealthMonitor::new(recovery),
            join: JoinHandshake::new(config.node_address, join)?,
        })
    }

    pub fn handshake(&self) -> &JoinHandshake {
        &self.join
    }

    /// Bring the controller up and announce the node.
    ///
    /// An announcement rejected by the send path leaves the handshake idle
    /// (nothing pending, nothing to retry); call [`announce`](Self::announce)
    /// to try again.
    pub async fn start(&mut self) -> Result<(), TransportError> {
        self.initialize_controller()?;
        #[cfg(feature = "defmt")]
        defmt::info!("CAN controller up, node {}", self.node_address);
        self.announce().await
    }

    /// Send one presence frame.
    pub async fn announce(&mut self) -> Result<(), TransportError> {
        self.join
            .announce(self.transport, self.controller, &mut self.timer)
            .await
    }

    /// Init, filters, start, notifications, leave init mode.
    fn initialize_controller(&self) -> Result<(), TransportError> {
        self.controller
            .init()
            .map_err(|_| TransportError::ControllerStart)?;
        install_filters(self.controller, self.node_address)
            .map_err(|_| TransportError::ControllerStart)?;
        self.controller
            .start()
            .map_err(|_| TransportError::ControllerStart)?;
        self.controller
            .activate_notifications()
            .map_err(|_| TransportError::ControllerStart)?;
        self.controller.release_init_mode();
        Ok(())
    }

    /// One monitor iteration: sample, recover, re-announce. Returns the action taken.
    pub async fn run_once(&mut self) -> RecoveryAction {
        let flags = self.controller.error_flags();
        let now = self.timer.now_ms();
        if !flags.is_empty() {
            self.controller.reset_errors();
        }
        let monitor = &mut self.monitor;
        let action = self
            .transport
            .update_stats(|stats| monitor.process(stats, flags, now));
        self.execute(action).await;

        let status = self.transport.join_status();
        if self.join.check_timeout(&status, self.timer.now_ms()) {
            if self.join.should_retry(&status, flags) {
                if let Err(_err) = self.announce().await {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Presence retry failed: {}", _err);
                }
            } else {
                self.transport.update_join(|status| status.pending = false);
                #[cfg(feature = "defmt")]
                defmt::warn!("Bus silent after {} announcements, giving up", status.retry_count);
            }
        }
        action
    }

    /// Monitor loop. Never returns.
    pub async fn run(&mut self) {
        loop {
            self.run_once().await;
            let period = self.monitor.policy().sample_period_ms;
            self.timer.delay_ms(period).await;
        }
    }

    async fn execute(&mut self, action: RecoveryAction) {
        let policy = *self.monitor.policy();
        match action {
            RecoveryAction::None => {}
            RecoveryAction::HardRestart => {
                self.controller.stop();
                self.timer.delay_ms(policy.bus_off_hold_ms).await;
                if self.controller.start().is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Restart after bus-off failed");
                }
                if self.controller.activate_notifications().is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Notifications not re-enabled");
                }
                let _dropped = self.transport.flush_queues();
                #[cfg(feature = "defmt")]
                defmt::info!("Hard restart done, {} queued frames dropped", _dropped);
            }
            RecoveryAction::SoftRestart => {
                self.controller.stop();
                self.timer.delay_ms(policy.soft_restart_hold_ms).await;
                if self.controller.start().is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Soft restart failed");
                }
            }
            RecoveryAction::Reinitialize => {
                self.timer.delay_ms(policy.reinit_settle_ms).await;
                if let Err(_err) = self.initialize_controller() {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Re-initialisation failed: {}", _err);
                }
                self.transport.flush_queues();
            }
        }
    }
}

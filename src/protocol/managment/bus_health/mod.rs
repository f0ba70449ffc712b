//! Bus health monitoring and tiered recovery decisions.
//!
//! [`BusHealthMonitor::process`] consumes one sample of the controller error
//! register and updates [`BusErrorStats`]. It never touches the hardware: the
//! returned [`RecoveryAction`] is executed by the transmit runner.
//!
//! Tiers, from the most to the least aggressive:
//!
//! * bus-off: hard restart, queues flushed, every other bit of the sample ignored;
//! * error-passive with more than `passive_restart_threshold` persistent errors:
//!   soft restart;
//! * more than `reinit_threshold` persistent errors outside a recovery: full
//!   controller re-initialisation.
use crate::core::RecoveryPolicy;
use crate::protocol::transport::traits::can_controller::ErrorFlags;

//==================================================================================STATS
/// Accumulated bus error statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusErrorStats {
    pub bus_off_count: u32,
    pub warning_count: u32,
    pub passive_count: u32,
    pub ack_error_count: u32,
    pub stuff_error_count: u32,
    pub form_error_count: u32,
    pub crc_error_count: u32,
    /// Transmit errors per mailbox (0..=2).
    pub tx_error_count: [u32; 3],
    pub recovery_attempts: u32,
    /// Timestamp of the last non-empty sample (ms).
    pub last_error_time: u32,
    /// Persistent error counter, saturating at 255.
    pub consecutive_errors: u8,
    pub recovery_in_progress: bool,
}

impl BusErrorStats {
    pub const fn new() -> Self {
        Self {
            bus_off_count: 0,
            warning_count: 0,
            passive_count: 0,
            ack_error_count: 0,
            stuff_error_count: 0,
            form_error_count: 0,
            crc_error_count: 0,
            tx_error_count: [0; 3],
            recovery_attempts: 0,
            last_error_time: 0,
            consecutive_errors: 0,
            recovery_in_progress: false,
        }
    }

    /// Zero every statistic except the recovery flag.
    pub fn reset(&mut self) {
        *self = Self {
            recovery_in_progress: self.recovery_in_progress,
            ..Self::new()
        };
    }

    /// Bus-off reported by the error interrupt, ahead of the next sample.
    pub fn record_bus_off_interrupt(&mut self) {
        self.bus_off_count = self.bus_off_count.wrapping_add(1);
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }

    /// Coarse health classification.
    pub const fn state(&self) -> HealthState {
        if self.recovery_in_progress {
            HealthState::Recovering
        } else if self.consecutive_errors == 0 {
            HealthState::Stable
        } else {
            HealthState::Degraded
        }
    }
}

/// Coarse bus health as reported to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthState {
    /// No persistent errors.
    Stable,
    /// Errors are being counted but no recovery is running.
    Degraded,
    /// A hard restart or re-initialisation has not been followed by a clean sample yet.
    Recovering,
}

/// Hardware sequence requested by a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryAction {
    None,
    /// Stop, hold, start, re-enable notifications, flush both queues.
    HardRestart,
    /// Stop, hold, start.
    SoftRestart,
    /// Settle, init, install filters, leave init mode, flush both queues.
    Reinitialize,
}

//==================================================================================MONITOR
/// Sample-driven error state machine.
#[derive(Debug, Clone, Copy)]
pub struct BusHealthMonitor {
    policy: RecoveryPolicy,
    last_stable_ms: u32,
}

impl Default for BusHealthMonitor {
    fn default() -> Self {
        Self::new(RecoveryPolicy::new())
    }
}

impl BusHealthMonitor {
    pub const fn new(policy: RecoveryPolicy) -> Self {
        Self {
            policy,
            last_stable_ms: 0,
        }
    }

    pub const fn policy(&self) -> &RecoveryPolicy {
        &self.policy
    }

    /// Fold one error sample taken at `now_ms` into `stats`.
    ///
    /// The caller clears the controller's latched errors whenever `flags` is
    /// not empty.
    pub fn process(
        &mut self,
        stats: &mut BusErrorStats,
        flags: ErrorFlags,
        now_ms: u32,
    ) -> RecoveryAction {
        if flags.is_empty() {
            self.last_stable_ms = now_ms;
            stats.consecutive_errors = stats.consecutive_errors.saturating_sub(1);
            stats.recovery_in_progress = false;
            return RecoveryAction::None;
        }
        stats.last_error_time = now_ms;

        if now_ms.wrapping_sub(self.last_stable_ms) > self.policy.persistence_ms {
            stats.consecutive_errors = stats.consecutive_errors.saturating_add(1);
        }

        if flags.is_bus_off() {
            stats.bus_off_count = stats.bus_off_count.wrapping_add(1);
            stats.recovery_in_progress = true;
            stats.recovery_attempts = stats.recovery_attempts.wrapping_add(1);
            stats.consecutive_errors = 0;
            #[cfg(feature = "defmt")]
            defmt::warn!("Bus-off #{}, hard restart", stats.bus_off_count);
            return RecoveryAction::HardRestart;
        }

        let mut action = RecoveryAction::None;
        if flags.contains(ErrorFlags::PASSIVE) {
            stats.passive_count = stats.passive_count.wrapping_add(1);
            if stats.consecutive_errors > self.policy.passive_restart_threshold {
                stats.recovery_attempts = stats.recovery_attempts.wrapping_add(1);
                stats.consecutive_errors = 0;
                action = RecoveryAction::SoftRestart;
                #[cfg(feature = "defmt")]
                defmt::warn!("Persistent error-passive, soft restart");
            }
        }

        count(flags, ErrorFlags::WARNING, &mut stats.warning_count);
        count(flags, ErrorFlags::STUFF, &mut stats.stuff_error_count);
        count(flags, ErrorFlags::FORM, &mut stats.form_error_count);
        count(flags, ErrorFlags::CRC, &mut stats.crc_error_count);
        if count(flags, ErrorFlags::ACK, &mut stats.ack_error_count)
            && stats.ack_error_count % 20 == 0
        {
            #[cfg(feature = "defmt")]
            defmt::info!("{} ACK errors so far", stats.ack_error_count);
        }
        let mailbox_bits = [ErrorFlags::TX_ERR0, ErrorFlags::TX_ERR1, ErrorFlags::TX_ERR2];
        for (bit, counter) in mailbox_bits.iter().zip(stats.tx_error_count.iter_mut()) {
            count(flags, *bit, counter);
        }

        if stats.consecutive_errors > self.policy.reinit_threshold && !stats.recovery_in_progress {
            stats.recovery_attempts = stats.recovery_attempts.wrapping_add(1);
            stats.consecutive_errors = 0;
            stats.recovery_in_progress = true;
            action = RecoveryAction::Reinitialize;
            #[cfg(feature = "defmt")]
            defmt::error!("Persistent bus errors, re-initialising controller");
        }

        action
    }
}

fn count(flags: ErrorFlags, bit: u32, counter: &mut u32) -> bool {
    let set = flags.contains(bit);
    if set {
        *counter = counter.wrapping_add(1);
    }
    set
}

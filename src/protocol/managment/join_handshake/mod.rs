//! Presence (ONBUS) handshake.
//!
//! A node announces itself with a zero-length frame under its own
//! address-qualified identifier. Any transmission that completes without a
//! transmit error counts as acknowledgement of the pending announcement.
//! Unanswered announcements are retried every `ack_timeout_ms` while the bus
//! looks alive, and at least `min_retries` times in any case.
use crate::core::JoinPolicy;
use crate::error::{CanIdBuildError, TransportError};
use crate::protocol::messages::presence_frame;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::context::TransportContext;
use crate::protocol::transport::traits::can_controller::{CanController, ErrorFlags};
use crate::protocol::transport::traits::node_timer::NodeTimer;

//==================================================================================STATUS
/// Progress of the presence handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoinStatus {
    /// An announcement is waiting for its acknowledgement.
    pub pending: bool,
    /// Time of the last successful announcement (ms).
    pub last_send_ms: u32,
    /// Announcements sent so far.
    pub retry_count: u32,
    pub ack_received: bool,
}

impl JoinStatus {
    pub const fn new() -> Self {
        Self {
            pending: false,
            last_send_ms: 0,
            retry_count: 0,
            ack_received: false,
        }
    }

    /// Bookkeeping after an announcement left (or was queued) at `now_ms`.
    pub fn record_announce(&mut self, now_ms: u32) {
        self.pending = true;
        self.last_send_ms = now_ms;
        self.retry_count = self.retry_count.wrapping_add(1);
        self.ack_received = false;
    }

    /// Mark the pending announcement as acknowledged. Returns `true` if one was pending.
    pub fn acknowledge(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.ack_received = true;
        true
    }
}

//==================================================================================HANDSHAKE
/// Announcement policy for one node.
#[derive(Debug, Clone, Copy)]
pub struct JoinHandshake {
    presence: CanFrame,
    policy: JoinPolicy,
}

impl JoinHandshake {
    /// Prepare the presence frame of `node_address` (4 bits).
    pub fn new(node_address: u8, policy: JoinPolicy) -> Result<Self, CanIdBuildError> {
        Ok(Self {
            presence: presence_frame(node_address)?,
            policy,
        })
    }

    pub const fn presence_frame(&self) -> &CanFrame {
        &self.presence
    }

    pub const fn policy(&self) -> &JoinPolicy {
        &self.policy
    }

    /// Send the presence frame. The status is only updated when the send path accepted it.
    pub async fn announce<C, T, const P: usize, const TXQ: usize, const RXQ: usize>(
        &self,
        transport: &TransportContext<P, TXQ, RXQ>,
        controller: &C,
        timer: &mut T,
    ) -> Result<(), TransportError>
    where
        C: CanController,
        T: NodeTimer,
    {
        transport
            .send_or_enqueue(controller, &self.presence, self.policy.send_timeout_ms, timer)
            .await?;
        let now = timer.now_ms();
        transport.update_join(|status| status.record_announce(now));
        #[cfg(feature = "defmt")]
        defmt::debug!("Presence sent, attempt {}", transport.join_status().retry_count);
        Ok(())
    }

    /// `true` when the pending announcement has waited longer than the ack timeout.
    pub fn check_timeout(&self, status: &JoinStatus, now_ms: u32) -> bool {
        status.pending && now_ms.wrapping_sub(status.last_send_ms) > self.policy.ack_timeout_ms
    }

    /// Whether the bus is worth announcing on, given the latest error sample.
    pub fn is_bus_active(&self, status: &JoinStatus, flags: ErrorFlags) -> bool {
        if status.ack_received {
            return true;
        }
        if flags.is_bus_off() {
            return false;
        }
        status.retry_count < self.policy.dead_bus_retries
    }

    /// Whether a timed-out announcement should be repeated.
    pub fn should_retry(&self, status: &JoinStatus, flags: ErrorFlags) -> bool {
        self.is_bus_active(status, flags) || status.retry_count < self.policy.min_retries
    }
}

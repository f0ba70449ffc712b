//! Debug traffic generator: sends the digits 0..=9 in green to node 0, one
//! every quarter second, so a second matrix can mirror the sequence.
use crate::core::{ColorSelect, IdleTiming};
use crate::error::TransportError;
use crate::protocol::messages::Command;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::{CanId, NODE_ADDRESS_SHIFT};
use crate::protocol::transport::context::TransportContext;
use crate::protocol::transport::traits::can_controller::CanController;
use crate::protocol::transport::traits::node_timer::NodeTimer;
use crate::protocol::transport::BROADCAST_SEND_TIMEOUT_MS;

/// Node receiving the digits.
pub const BROADCAST_TARGET_NODE: u8 = 0;

#[derive(Debug, Clone, Copy)]
pub struct DigitBroadcaster {
    interval_ticks: u32,
    last_send_tick: u32,
    digit: u8,
}

impl DigitBroadcaster {
    pub const fn new(timing: &IdleTiming) -> Self {
        Self {
            interval_ticks: timing.broadcast_ticks(),
            last_send_tick: 0,
            digit: 0,
        }
    }

    /// Command due at `tick`, if the interval has elapsed. Advances the digit.
    pub fn poll(&mut self, tick: u32) -> Option<Command> {
        if tick.wrapping_sub(self.last_send_tick) < self.interval_ticks {
            return None;
        }
        let command = Command::SetSymbol {
            code: self.digit,
            color: ColorSelect::Green,
        };
        self.last_send_tick = tick;
        self.digit = (self.digit + 1) % 10;
        Some(command)
    }

    /// Send the due digit, if any, through the shared send path.
    pub async fn run_tick<C, T, const P: usize, const TXQ: usize, const RXQ: usize>(
        &mut self,
        tick: u32,
        transport: &TransportContext<P, TXQ, RXQ>,
        controller: &C,
        timer: &mut T,
    ) -> Result<Option<Command>, TransportError>
    where
        C: CanController,
        T: NodeTimer,
    {
        let Some(command) = self.poll(tick) else {
            return Ok(None);
        };
        let id = CanId(command.base_id() | ((BROADCAST_TARGET_NODE as u32) << NODE_ADDRESS_SHIFT));
        let frame = CanFrame::extended(id, &command.encode());
        transport
            .send_or_enqueue(controller, &frame, BROADCAST_SEND_TIMEOUT_MS, timer)
            .await?;
        Ok(Some(command))
    }
}

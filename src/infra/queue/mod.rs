//! Bounded FIFO of pool slot references used for the interrupt/task handoff.
//!
//! Two kinds of producers coexist:
//!
//! * interrupt handlers call [`MessageQueue::push_from_interrupt`], which never
//!   waits: when the queue is full the slot is released back to the pool and
//!   the message is dropped;
//! * tasks call [`MessageQueue::push_blocking`] / [`MessageQueue::pop_blocking`],
//!   which wait up to a timeout measured with the supplied [`NodeTimer`].
//!
//! The queue is a pre-allocated [`embassy_sync::channel::Channel`] guarded by a
//! critical section, so a single interrupt source and a single task may use
//! it concurrently. Order is strictly FIFO.
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, TrySendError},
};
use futures_util::{
    future::{select, Either},
    pin_mut,
};

use crate::error::TransportError;
use crate::infra::pool::{MessagePool, SlotRef};
use crate::protocol::transport::traits::node_timer::NodeTimer;

/// Bounded queue of `N` slot references.
pub struct MessageQueue<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, SlotRef, N>,
}

impl<const N: usize> Default for MessageQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for MessageQueue<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageQueue")
            .field("capacity", &N)
            .field("len", &self.len())
            .finish()
    }
}

impl<const N: usize> MessageQueue<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Number of queued references.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Non-blocking push for interrupt context. On a full queue the slot goes
    /// back to `pool` and [`TransportError::QueueFull`] is returned.
    pub fn push_from_interrupt<const P: usize>(
        &self,
        slot: SlotRef,
        pool: &MessagePool<P>,
    ) -> Result<(), TransportError> {
        match self.channel.try_send(slot) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(slot)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Queue full, dropping slot {}", slot.index());
                pool.release(slot);
                Err(TransportError::QueueFull)
            }
        }
    }

    /// Push from task context, waiting up to `timeout_ms` for room. On timeout
    /// the slot is released to `pool`.
    pub async fn push_blocking<const P: usize, T: NodeTimer>(
        &self,
        slot: SlotRef,
        timeout_ms: u32,
        pool: &MessagePool<P>,
        timer: &mut T,
    ) -> Result<(), TransportError> {
        let slot = match self.channel.try_send(slot) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Full(slot)) => slot,
        };
        if timeout_ms == 0 {
            pool.release(slot);
            return Err(TransportError::Timeout);
        }

        // The send future owns the reference; keep its stamp and index to
        // release it if the timer wins.
        let (owner, index) = (slot.owner(), slot.index() as u8);
        let send = self.channel.send(slot);
        let deadline = timer.delay_ms(timeout_ms);
        pin_mut!(send);
        pin_mut!(deadline);

        match select(send, deadline).await {
            Either::Left(((), _)) => Ok(()),
            Either::Right(((), pending_send)) => {
                drop(pending_send);
                pool.release(SlotRef::new(owner, index));
                Err(TransportError::Timeout)
            }
        }
    }

    /// Pop from task context, waiting up to `timeout_ms` for a message.
    pub async fn pop_blocking<T: NodeTimer>(
        &self,
        timeout_ms: u32,
        timer: &mut T,
    ) -> Result<SlotRef, TransportError> {
        if let Some(slot) = self.try_pop() {
            return Ok(slot);
        }
        if timeout_ms == 0 {
            return Err(TransportError::Timeout);
        }

        let receive = self.channel.receive();
        let deadline = timer.delay_ms(timeout_ms);
        pin_mut!(receive);
        pin_mut!(deadline);

        match select(receive, deadline).await {
            Either::Left((slot, _)) => Ok(slot),
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }

    /// Non-blocking pop, usable from interrupt context.
    pub fn try_pop(&self) -> Option<SlotRef> {
        self.channel.try_receive().ok()
    }

    /// Drain the queue, releasing every queued slot. Returns how many were dropped.
    pub fn flush<const P: usize>(&self, pool: &MessagePool<P>) -> usize {
        let mut dropped = 0;
        while let Some(slot) = self.try_pop() {
            pool.release(slot);
            dropped += 1;
        }
        dropped
    }
}

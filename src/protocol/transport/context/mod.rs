//! Transport context: the single owner of the message pool, both queues, the
//! bus statistics and the presence-handshake status.
//!
//! One instance lives for the lifetime of the device (typically in a
//! `static`). Interrupt handlers call the `on_*` entry points, tasks use
//! [`TransportContext::send_or_enqueue`] and [`TransportContext::receive`].
//! Shared state is only ever touched inside a critical section, and readers
//! get copies.
use core::cell::Cell;

use critical_section::Mutex;

use crate::core::{POOL_CAPACITY, RX_QUEUE_DEPTH, TX_QUEUE_DEPTH};
use crate::error::TransportError;
use crate::infra::pool::MessagePool;
use crate::infra::queue::MessageQueue;
use crate::protocol::managment::bus_health::BusErrorStats;
use crate::protocol::managment::join_handshake::JoinStatus;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_controller::{CanController, ErrorFlags};
use crate::protocol::transport::traits::node_timer::NodeTimer;

/// Context sized like the reference board: 12 slots, TX queue 2, RX queue 8.
pub type DefaultTransport = TransportContext<POOL_CAPACITY, TX_QUEUE_DEPTH, RX_QUEUE_DEPTH>;

/// Pool of `P` slots, outbound queue of `TXQ`, inbound queue of `RXQ`.
pub struct TransportContext<const P: usize, const TXQ: usize, const RXQ: usize> {
    pool: MessagePool<P>,
    tx_queue: MessageQueue<TXQ>,
    rx_queue: MessageQueue<RXQ>,
    stats: Mutex<Cell<BusErrorStats>>,
    join: Mutex<Cell<JoinStatus>>,
}

impl<const P: usize, const TXQ: usize, const RXQ: usize> Default for TransportContext<P, TXQ, RXQ> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: usize, const TXQ: usize, const RXQ: usize> TransportContext<P, TXQ, RXQ> {
    pub const fn new() -> Self {
        Self {
            pool: MessagePool::new(),
            tx_queue: MessageQueue::new(),
            rx_queue: MessageQueue::new(),
            stats: Mutex::new(Cell::new(BusErrorStats::new())),
            join: Mutex::new(Cell::new(JoinStatus::new())),
        }
    }

    pub fn pool(&self) -> &MessagePool<P> {
        &self.pool
    }

    pub fn tx_queue(&self) -> &MessageQueue<TXQ> {
        &self.tx_queue
    }

    pub fn rx_queue(&self) -> &MessageQueue<RXQ> {
        &self.rx_queue
    }

    //==============================================================================SHARED_STATE
    /// Snapshot of the bus error statistics.
    pub fn stats(&self) -> BusErrorStats {
        critical_section::with(|cs| self.stats.borrow(cs).get())
    }

    /// Run `f` on the statistics inside one critical section.
    pub fn update_stats<R>(&self, f: impl FnOnce(&mut BusErrorStats) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.stats.borrow(cs);
            let mut stats = cell.get();
            let result = f(&mut stats);
            cell.set(stats);
            result
        })
    }

    /// Zero the statistics, keeping the recovery flag.
    pub fn reset_stats(&self) {
        self.update_stats(BusErrorStats::reset);
    }

    /// Snapshot of the presence handshake status.
    pub fn join_status(&self) -> JoinStatus {
        critical_section::with(|cs| self.join.borrow(cs).get())
    }

    pub fn update_join<R>(&self, f: impl FnOnce(&mut JoinStatus) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.join.borrow(cs);
            let mut status = cell.get();
            let result = f(&mut status);
            cell.set(status);
            result
        })
    }

    //==============================================================================SEND_PATH
    /// Send `frame` immediately when a mailbox is free, otherwise park it in
    /// the outbound queue for up to `timeout_ms`.
    ///
    /// Failures are reported once and never retried here.
    pub async fn send_or_enqueue<C: CanController, T: NodeTimer>(
        &self,
        controller: &C,
        frame: &CanFrame,
        timeout_ms: u32,
        timer: &mut T,
    ) -> Result<(), TransportError> {
        if controller.tx_mailbox_free() {
            return controller.transmit(frame).map_err(|_err| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Mailbox refused frame {:#X}", frame.id.raw());
                TransportError::TxBusy
            });
        }

        let Some(slot) = self.pool.allocate_with(frame) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Message pool exhausted");
            return Err(TransportError::PoolExhausted);
        };
        self.tx_queue
            .push_blocking(slot, timeout_ms, &self.pool, timer)
            .await?;

        // The completion interrupt may have fired while the frame was queued.
        if controller.tx_mailbox_free() {
            self.transmit_next(controller)?;
        }
        Ok(())
    }

    /// Pop the outbound head, if any, and hand it to the controller.
    ///
    /// Returns `Ok(false)` on an empty queue. A refused frame is dropped, its
    /// slot released, and reported as [`TransportError::TxBusy`].
    fn transmit_next<C: CanController>(&self, controller: &C) -> Result<bool, TransportError> {
        let Some(slot) = self.tx_queue.try_pop() else {
            return Ok(false);
        };
        let frame = self.pool.take(slot);
        controller.transmit(&frame).map_err(|_err| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Queued frame {:#X} dropped by controller", frame.id.raw());
            TransportError::TxBusy
        })?;
        Ok(true)
    }

    /// Wait up to `timeout_ms` for an inbound frame. The slot is released
    /// once the frame has been copied out.
    pub async fn receive<T: NodeTimer>(
        &self,
        timeout_ms: u32,
        timer: &mut T,
    ) -> Result<CanFrame, TransportError> {
        let slot = self.rx_queue.pop_blocking(timeout_ms, timer).await?;
        Ok(self.pool.take(slot))
    }

    /// Drop everything waiting in both queues. Returns the number of released slots.
    pub fn flush_queues(&self) -> usize {
        self.tx_queue.flush(&self.pool) + self.rx_queue.flush(&self.pool)
    }

    //==============================================================================INTERRUPTS
    /// Receive-pending interrupt: copy the frame into the pool and queue it.
    /// Exhaustion or a full queue drops the frame.
    pub fn on_rx_pending(&self, frame: &CanFrame) -> Result<(), TransportError> {
        let Some(slot) = self.pool.allocate_with(frame) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Inbound frame dropped, pool exhausted");
            return Err(TransportError::PoolExhausted);
        };
        self.rx_queue.push_from_interrupt(slot, &self.pool)
    }

    /// Transmit-complete interrupt for `mailbox`.
    ///
    /// A completion without error or arbitration loss acknowledges a pending
    /// presence announcement. The next queued frame, if any, is sent.
    pub fn on_tx_complete<C: CanController>(&self, controller: &C, mailbox: u8) {
        if !controller.error_flags().mailbox_failed(mailbox) {
            self.update_join(JoinStatus::acknowledge);
        }
        // Refusals are logged by transmit_next.
        let _ = self.transmit_next(controller);
    }

    /// Error interrupt. Only bus-off is recorded here, the monitor handles the rest.
    pub fn on_error(&self, flags: ErrorFlags) {
        if flags.is_bus_off() {
            self.update_stats(BusErrorStats::record_bus_off_interrupt);
        }
    }
}

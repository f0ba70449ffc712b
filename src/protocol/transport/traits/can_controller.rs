//! Minimal abstraction over the CAN controller peripheral. The library never
//! touches registers itself; firmware implements this trait on top of its HAL
//! and tests implement it with an in-memory mock.
//!
//! Every method takes `&self`: the controller is shared between the
//! interrupt handlers and the monitor task, exactly like the peripheral
//! registers it stands for.
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================ERROR_FLAGS
/// Latched controller error register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags(pub u32);

impl ErrorFlags {
    pub const NONE: ErrorFlags = ErrorFlags(0);
    /// Error counters reached the warning level.
    pub const WARNING: u32 = 1 << 0;
    /// Controller entered the error-passive state.
    pub const PASSIVE: u32 = 1 << 1;
    /// Controller is disconnected from the bus.
    pub const BUS_OFF: u32 = 1 << 2;
    pub const FORM: u32 = 1 << 3;
    pub const STUFF: u32 = 1 << 4;
    pub const ACK: u32 = 1 << 5;
    pub const CRC: u32 = 1 << 6;
    /// Arbitration lost on transmit mailbox 0 (mailboxes 1 and 2 follow).
    pub const TX_ARB_LOST0: u32 = 1 << 20;
    /// Transmit error on mailbox 0 (mailboxes 1 and 2 follow).
    pub const TX_ERR0: u32 = 1 << 26;
    pub const TX_ERR1: u32 = 1 << 27;
    pub const TX_ERR2: u32 = 1 << 28;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, bits: u32) -> bool {
        self.0 & bits != 0
    }

    pub const fn is_bus_off(&self) -> bool {
        self.contains(Self::BUS_OFF)
    }

    /// Whether the completion of `mailbox` carried a transmit failure.
    pub const fn mailbox_failed(&self, mailbox: u8) -> bool {
        let shift = if mailbox > 2 { 0 } else { mailbox as u32 };
        self.contains((Self::TX_ARB_LOST0 << shift) | (Self::TX_ERR0 << shift))
    }
}

//==================================================================================CAN_CONTROLLER
/// Contract of the physical-layer CAN module.
pub trait CanController {
    type Error: core::fmt::Debug;

    /// Full controller initialisation (bit timing, mode). Leaves the
    /// controller in init mode until [`release_init_mode`](Self::release_init_mode).
    fn init(&self) -> Result<(), Self::Error>;
    /// Leave init mode once filters are installed.
    fn release_init_mode(&self);
    /// Install an exact-match 32-bit filter in `bank`.
    fn configure_filter(&self, bank: u8, id: u32, mask: u32);
    /// Enter normal mode.
    fn start(&self) -> Result<(), Self::Error>;
    /// Leave the bus.
    fn stop(&self);
    /// Enable transmit-complete, receive-pending and overrun interrupts.
    fn activate_notifications(&self) -> Result<(), Self::Error>;
    /// `true` when at least one transmit mailbox is empty.
    fn tx_mailbox_free(&self) -> bool;
    /// Copy a frame into a free mailbox and request transmission.
    fn transmit(&self, frame: &CanFrame) -> Result<(), Self::Error>;
    /// Snapshot of the latched error register.
    fn error_flags(&self) -> ErrorFlags;
    /// Clear the latched error register.
    fn reset_errors(&self);
}

//! Error definitions shared across library modules.
//! Transient bus errors and bus-off are absorbed by the health monitor and
//! never show up here; only conditions the caller must decide about do.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures of the send/receive path. All of them are recoverable.
pub enum TransportError {
    /// Every slot of the message pool is in use.
    #[error("Message pool exhausted")]
    PoolExhausted,
    /// The queue stayed full (send) or empty (receive) for the whole timeout.
    #[error("Queue timeout")]
    Timeout,
    /// Queue full on the interrupt path; the message was dropped.
    #[error("Queue full, message dropped")]
    QueueFull,
    /// The controller refused the frame although a mailbox looked free.
    #[error("Transmit hardware busy")]
    TxBusy,
    /// The controller could not be started or its notifications enabled.
    #[error("Controller start failed")]
    ControllerStart,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a node-qualified identifier.
pub enum CanIdBuildError {
    /// Base identifier does not fit in 29 bits.
    #[error("Identifier exceeds 29 bits: {id:#X}")]
    IdentifierTooWide { id: u32 },
    /// Node address does not fit in the 4-bit address field.
    #[error("Node address out of range: {address}")]
    InvalidNodeAddress { address: u8 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Decoding failures for inbound display commands.
pub enum CommandError {
    /// The identifier does not belong to the display protocol.
    #[error("Unknown identifier: {id:#X}")]
    UnknownIdentifier { id: u32 },
    /// Sub-command byte not recognised under the request identifier.
    #[error("Unknown command code: {code:#X}")]
    UnknownCommand { code: u8 },
    /// Payload shorter than the command layout requires.
    #[error("Invalid payload length: {len}")]
    InvalidLength { len: usize },
    /// Color byte outside 0..=2.
    #[error("Invalid color code: {code}")]
    InvalidColor { code: u8 },
}

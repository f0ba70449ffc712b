//! CAN transport layer: frame and identifier representations, the controller
//! and timer abstractions, and the shared [`context::TransportContext`] that
//! ties pool, queues and bus statistics together.
//!
//! ## Timing constants
//!
//! Queue timeouts used by the built-in traffic. Callers of
//! [`context::TransportContext::send_or_enqueue`] pick their own.

pub mod can_frame;
pub mod can_id;
pub mod context;
pub mod traits;

/// Queue timeout for the debug digit broadcast (ms).
pub const BROADCAST_SEND_TIMEOUT_MS: u32 = 10;

/// Receive runner wait for the next inbound message before looping (ms).
///
/// Short enough that the runner never sits on an idle bus for long, long
/// enough not to spin.
pub const RECEIVE_POLL_TIMEOUT_MS: u32 = 100;

//! Shared data types and tuning policies used by both the CAN transport and
//! the display pipeline.
//!
//! Every number that encodes operationally tuned behavior (recovery delays,
//! error thresholds, handshake timeouts, demo cadence) lives here as a named
//! default inside a policy struct, so firmware can override them in one place.

use crate::display::rotation::Rotation;

//==================================================================================CAPACITIES
/// Outbound message objects reserved in the pool.
pub const SEND_OBJECTS: usize = 2;
/// Inbound message objects reserved in the pool.
pub const RECV_OBJECTS: usize = 8;
/// Spare objects kept for logging/diagnostic traffic.
pub const SPARE_OBJECTS: usize = 2;
/// Total number of message slots in the default pool.
pub const POOL_CAPACITY: usize = SEND_OBJECTS + RECV_OBJECTS + SPARE_OBJECTS;
/// Depth of the outbound (transmit) queue.
pub const TX_QUEUE_DEPTH: usize = SEND_OBJECTS;
/// Depth of the inbound (receive) queue.
pub const RX_QUEUE_DEPTH: usize = RECV_OBJECTS;

//==================================================================================DISPLAY_GEOMETRY
/// Rows (and columns) of the LED matrix.
pub const MATRIX_ROWS: usize = 8;
/// Number of glyphs held by the mutable glyph table.
pub const GLYPH_COUNT: usize = 52;
/// Glyph shown on both channels at boot.
pub const BOOT_GLYPH: u8 = 12;

/// Color plane of the bicolor matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red = 0,
    Green = 1,
}

impl Channel {
    /// Both channels, red first.
    pub const ALL: [Channel; 2] = [Channel::Red, Channel::Green];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Channel selection carried by display commands (`0` red, `1` green, `2` both).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorSelect {
    Red,
    Green,
    Both,
}

impl ColorSelect {
    /// Decode the wire color byte.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ColorSelect::Red),
            1 => Some(ColorSelect::Green),
            2 => Some(ColorSelect::Both),
            _ => None,
        }
    }

    /// Encode back into the wire color byte.
    pub const fn code(self) -> u8 {
        match self {
            ColorSelect::Red => 0,
            ColorSelect::Green => 1,
            ColorSelect::Both => 2,
        }
    }

    /// Whether `channel` is part of the selection.
    pub const fn includes(self, channel: Channel) -> bool {
        matches!(
            (self, channel),
            (ColorSelect::Both, _)
                | (ColorSelect::Red, Channel::Red)
                | (ColorSelect::Green, Channel::Green)
        )
    }
}

//==================================================================================RECOVERY_POLICY
/// Thresholds and delays driving the tiered bus recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    /// Errors must persist this long past the last clean sample before the
    /// consecutive-error counter grows (ms).
    pub persistence_ms: u32,
    /// Controller held stopped after bus-off before restart (ms).
    pub bus_off_hold_ms: u32,
    /// Controller held stopped during a soft restart (ms).
    pub soft_restart_hold_ms: u32,
    /// Settle delay preceding a full re-initialisation (ms).
    pub reinit_settle_ms: u32,
    /// Consecutive errors above which an error-passive sample triggers a soft restart.
    pub passive_restart_threshold: u8,
    /// Consecutive errors above which a full re-initialisation is run.
    pub reinit_threshold: u8,
    /// Period of the transmit monitor loop (ms).
    pub sample_period_ms: u32,
}

impl RecoveryPolicy {
    pub const fn new() -> Self {
        Self {
            persistence_ms: 50,
            bus_off_hold_ms: 200,
            soft_restart_hold_ms: 100,
            reinit_settle_ms: 500,
            passive_restart_threshold: 30,
            reinit_threshold: 100,
            sample_period_ms: 10,
        }
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================JOIN_POLICY
/// Timing of the presence (ONBUS) handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinPolicy {
    /// A pending announcement older than this is considered unanswered (ms).
    pub ack_timeout_ms: u32,
    /// At this many announcements without acknowledgement the bus is judged dead.
    pub dead_bus_retries: u32,
    /// Below this many announcements the node keeps retrying even on a dead bus.
    pub min_retries: u32,
    /// Queue timeout used when posting an announcement (ms).
    pub send_timeout_ms: u32,
}

impl JoinPolicy {
    pub const fn new() -> Self {
        Self {
            ack_timeout_ms: 1000,
            dead_bus_retries: 10,
            min_retries: 5,
            send_timeout_ms: 16,
        }
    }
}

impl Default for JoinPolicy {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================IDLE_TIMING
/// Cadence of the idle demo animation, expressed in main-loop ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTiming {
    /// Main-loop ticks per second.
    pub tick_rate_hz: u32,
}

impl IdleTiming {
    pub const fn new(tick_rate_hz: u32) -> Self {
        Self { tick_rate_hz }
    }

    /// One digit: draw + hold + erase (2 s).
    pub const fn cycle_ticks(&self) -> u32 {
        self.tick_rate_hz * 2
    }

    /// Line sweep drawing the digit (0.5 s).
    pub const fn draw_ticks(&self) -> u32 {
        self.tick_rate_hz / 2
    }

    /// Digit shown steadily (1 s).
    pub const fn hold_ticks(&self) -> u32 {
        self.tick_rate_hz
    }

    /// Line sweep erasing the digit (0.5 s).
    pub const fn erase_ticks(&self) -> u32 {
        self.tick_rate_hz / 2
    }

    /// Interval between two debug digit broadcasts (0.25 s).
    pub const fn broadcast_ticks(&self) -> u32 {
        self.tick_rate_hz / 4
    }
}

impl Default for IdleTiming {
    fn default() -> Self {
        Self::new(1000)
    }
}

//==================================================================================NODE_CONFIG
/// Per-node settings normally read from board straps at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeConfig {
    /// 4-bit node address embedded in bits 20..=23 of every identifier.
    pub node_address: u8,
    /// Mounting orientation of the matrix.
    pub rotation: Rotation,
    /// Enables the debug digit broadcaster.
    pub broadcast_digits: bool,
}

impl NodeConfig {
    /// Node address that enables the digit broadcaster on the reference board.
    pub const BROADCASTER_ADDRESS: u8 = 3;

    /// Build the configuration from the 2-bit address and orientation straps.
    pub const fn from_straps(address_straps: u8, rotation_straps: u8) -> Self {
        let node_address = address_straps & 0x03;
        Self {
            node_address,
            rotation: Rotation::from_straps(rotation_straps),
            broadcast_digits: node_address == Self::BROADCASTER_ADDRESS,
        }
    }
}

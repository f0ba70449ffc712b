//! In-memory representation of a classic CAN frame as stored in the message pool.
use crate::protocol::transport::can_id::{CanId, EXTENDED_ID_MAX, STANDARD_ID_MAX};
use embedded_can::{ExtendedId, Id, StandardId};

/// Identifier format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdFormat {
    Standard,
    #[default]
    Extended,
}

/// Data or remote-request frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    #[default]
    Data,
    Remote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw frame as exchanged with the controller.
pub struct CanFrame {
    /// Identifier (11 or 29 significant bits depending on `format`).
    pub id: CanId,
    /// Payload buffer. Only the first `len` bytes are meaningful.
    pub data: [u8; 8],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
    pub format: IdFormat,
    pub kind: FrameKind,
}

impl CanFrame {
    /// Zero-length extended data frame with identifier 0.
    pub const EMPTY: CanFrame = CanFrame {
        id: CanId(0),
        data: [0; 8],
        len: 0,
        format: IdFormat::Extended,
        kind: FrameKind::Data,
    };

    /// Extended data frame carrying `payload` (truncated to 8 bytes).
    pub fn extended(id: CanId, payload: &[u8]) -> Self {
        let len = payload.len().min(8);
        let mut data = [0u8; 8];
        data[..len].copy_from_slice(&payload[..len]);
        Self {
            id: CanId(id.0 & EXTENDED_ID_MAX),
            data,
            len,
            format: IdFormat::Extended,
            kind: FrameKind::Data,
        }
    }

    /// Valid part of the payload.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(8)]
    }
}

impl Default for CanFrame {
    fn default() -> Self {
        Self::EMPTY
    }
}

//==================================================================================EMBEDDED_CAN
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let (raw, format) = split_id(id.into());
        let mut frame = CanFrame::extended(CanId(raw), data);
        frame.format = format;
        Some(frame)
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        let (raw, format) = split_id(id.into());
        Some(CanFrame {
            id: CanId(raw),
            data: [0; 8],
            len: dlc,
            format,
            kind: FrameKind::Remote,
        })
    }

    fn is_extended(&self) -> bool {
        self.format == IdFormat::Extended
    }

    fn is_remote_frame(&self) -> bool {
        self.kind == FrameKind::Remote
    }

    fn id(&self) -> Id {
        match self.format {
            IdFormat::Extended => Id::Extended(
                ExtendedId::new(self.id.0 & EXTENDED_ID_MAX).unwrap_or(ExtendedId::ZERO),
            ),
            IdFormat::Standard => Id::Standard(
                StandardId::new((self.id.0 & STANDARD_ID_MAX) as u16).unwrap_or(StandardId::ZERO),
            ),
        }
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}

fn split_id(id: Id) -> (u32, IdFormat) {
    match id {
        Id::Standard(id) => (id.as_raw() as u32, IdFormat::Standard),
        Id::Extended(id) => (id.as_raw(), IdFormat::Extended),
    }
}

//! Display protocol messages: identifiers, sub-command codes, and the decoded
//! [`Command`] set carried in 8-byte payloads.
//!
//! Requests share one identifier and select the operation with payload byte
//! 0. Raw screen writes use their own identifiers and carry 8 bitmap bytes.
//! Every identifier is qualified with the addressed node in bits 20..=23.
use crate::core::ColorSelect;
use crate::error::{CanIdBuildError, CommandError};
use crate::protocol::transport::can_frame::{CanFrame, FrameKind};
use crate::protocol::transport::can_id::CanId;

//==================================================================================IDENTIFIERS
/// Presence announcement sent by each node under its own address.
pub const ONBUS_ID: u32 = 0x1000_0001;
/// Shared request identifier (sub-command in byte 0).
pub const REQUEST_ID: u32 = 0x1000_0002;
/// Answers to requests.
pub const ANSWER_ID: u32 = 0x1000_0003;
/// Firmware upgrade, host to node.
pub const UPGRADE_RX_ID: u32 = 0x1000_0004;
/// Raw overwrite of the red bitmap.
pub const SET_RED_SCREEN_ID: u32 = 0x1000_0005;
/// Raw overwrite of the green bitmap.
pub const SET_GREEN_SCREEN_ID: u32 = 0x1000_0006;
/// Firmware upgrade, node to host.
pub const UPGRADE_TX_ID: u32 = 0x1000_0007;

/// Identifiers accepted by the node, installed one per filter bank.
pub const FILTER_BASE_IDS: [u32; 7] = [
    ONBUS_ID,
    REQUEST_ID,
    ANSWER_ID,
    UPGRADE_RX_ID,
    SET_RED_SCREEN_ID,
    SET_GREEN_SCREEN_ID,
    UPGRADE_TX_ID,
];

/// Filter mask: every identifier bit must match.
pub const FILTER_EXACT_MASK: u32 = 0x1FFF_FFFF;

//==================================================================================COMMAND_CODES
pub const CMD_SET_SYMBOL: u8 = 0x01;
pub const CMD_SET_SYMBOL_PATTERN_1: u8 = 0x02;
pub const CMD_SET_SYMBOL_PATTERN_2: u8 = 0x03;
pub const CMD_DYN_SYMBOL_SET1: u8 = 0x04;
pub const CMD_DYN_SYMBOL_SET2: u8 = 0x05;
pub const CMD_DYN_SYMBOL_SET3: u8 = 0x06;
pub const CMD_DYN_SYMBOL_SET4: u8 = 0x07;

//==================================================================================COMMAND
/// Which four rows of a glyph a pattern command carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternHalf {
    /// Rows 0..=3.
    Upper,
    /// Rows 4..=7.
    Lower,
}

impl PatternHalf {
    /// First row written by this half.
    pub const fn first_row(self) -> usize {
        match self {
            PatternHalf::Upper => 0,
            PatternHalf::Lower => 4,
        }
    }
}

/// Decoded display command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Replace static content with a glyph.
    SetSymbol { code: u8, color: ColorSelect },
    /// Overwrite four rows of a glyph in the mutable table.
    SetSymbolPattern {
        glyph: u8,
        half: PatternHalf,
        rows: [u8; 4],
    },
    /// Stage glyph, period and step count of an animated symbol.
    DynSymbolSet1 { glyph: u8, period: u16, steps: u16 },
    /// Stage the per-step velocity.
    DynSymbolSet2 { dx: i16, dy: i16 },
    /// Stage the origin.
    DynSymbolSet3 { start_x: i16, start_y: i16 },
    /// Commit the staged animated symbol into the selected channel(s).
    DynSymbolSet4 { color: ColorSelect },
    /// Overwrite the red bitmap.
    SetRedScreen([u8; 8]),
    /// Overwrite the green bitmap.
    SetGreenScreen([u8; 8]),
}

impl Command {
    /// Decode a received frame. The node address bits of the identifier are ignored.
    pub fn decode(frame: &CanFrame) -> Result<Self, CommandError> {
        let data = &frame.data;
        match frame.id.base() {
            REQUEST_ID => {
                if frame.kind == FrameKind::Remote || frame.len == 0 {
                    return Err(CommandError::InvalidLength { len: 0 });
                }
                let code = data[0];
                let needed = match code {
                    CMD_SET_SYMBOL => 3,
                    CMD_SET_SYMBOL_PATTERN_1 | CMD_SET_SYMBOL_PATTERN_2 => 8,
                    CMD_DYN_SYMBOL_SET1 | CMD_DYN_SYMBOL_SET2 | CMD_DYN_SYMBOL_SET3 => 6,
                    CMD_DYN_SYMBOL_SET4 => 2,
                    _ => return Err(CommandError::UnknownCommand { code }),
                };
                if frame.len < needed {
                    return Err(CommandError::InvalidLength { len: frame.len });
                }
                Self::decode_request(code, data)
            }
            SET_RED_SCREEN_ID => Ok(Command::SetRedScreen(full_payload(frame)?)),
            SET_GREEN_SCREEN_ID => Ok(Command::SetGreenScreen(full_payload(frame)?)),
            _ => Err(CommandError::UnknownIdentifier { id: frame.id.0 }),
        }
    }

    fn decode_request(code: u8, data: &[u8; 8]) -> Result<Self, CommandError> {
        let word = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
        let command = match code {
            CMD_SET_SYMBOL => Command::SetSymbol {
                code: data[1],
                color: color(data[2])?,
            },
            CMD_SET_SYMBOL_PATTERN_1 | CMD_SET_SYMBOL_PATTERN_2 => Command::SetSymbolPattern {
                glyph: data[1],
                half: if code == CMD_SET_SYMBOL_PATTERN_1 {
                    PatternHalf::Upper
                } else {
                    PatternHalf::Lower
                },
                rows: [data[4], data[5], data[6], data[7]],
            },
            CMD_DYN_SYMBOL_SET1 => Command::DynSymbolSet1 {
                glyph: data[1],
                period: word(2),
                steps: word(4),
            },
            CMD_DYN_SYMBOL_SET2 => Command::DynSymbolSet2 {
                dx: word(2) as i16,
                dy: word(4) as i16,
            },
            CMD_DYN_SYMBOL_SET3 => Command::DynSymbolSet3 {
                start_x: word(2) as i16,
                start_y: word(4) as i16,
            },
            CMD_DYN_SYMBOL_SET4 => Command::DynSymbolSet4 {
                color: color(data[1])?,
            },
            _ => return Err(CommandError::UnknownCommand { code }),
        };
        Ok(command)
    }

    /// Identifier base this command travels under.
    pub const fn base_id(&self) -> u32 {
        match self {
            Command::SetRedScreen(_) => SET_RED_SCREEN_ID,
            Command::SetGreenScreen(_) => SET_GREEN_SCREEN_ID,
            _ => REQUEST_ID,
        }
    }

    /// Serialize into the 8-byte payload layout.
    pub fn encode(&self) -> [u8; 8] {
        let mut data = [0u8; 8];
        let put_word = |data: &mut [u8; 8], at: usize, value: u16| {
            data[at..at + 2].copy_from_slice(&value.to_le_bytes());
        };
        match *self {
            Command::SetSymbol { code, color } => {
                data[0] = CMD_SET_SYMBOL;
                data[1] = code;
                data[2] = color.code();
            }
            Command::SetSymbolPattern { glyph, half, rows } => {
                data[0] = match half {
                    PatternHalf::Upper => CMD_SET_SYMBOL_PATTERN_1,
                    PatternHalf::Lower => CMD_SET_SYMBOL_PATTERN_2,
                };
                data[1] = glyph;
                data[4..8].copy_from_slice(&rows);
            }
            Command::DynSymbolSet1 {
                glyph,
                period,
                steps,
            } => {
                data[0] = CMD_DYN_SYMBOL_SET1;
                data[1] = glyph;
                put_word(&mut data, 2, period);
                put_word(&mut data, 4, steps);
            }
            Command::DynSymbolSet2 { dx, dy } => {
                data[0] = CMD_DYN_SYMBOL_SET2;
                put_word(&mut data, 2, dx as u16);
                put_word(&mut data, 4, dy as u16);
            }
            Command::DynSymbolSet3 { start_x, start_y } => {
                data[0] = CMD_DYN_SYMBOL_SET3;
                put_word(&mut data, 2, start_x as u16);
                put_word(&mut data, 4, start_y as u16);
            }
            Command::DynSymbolSet4 { color } => {
                data[0] = CMD_DYN_SYMBOL_SET4;
                data[1] = color.code();
            }
            Command::SetRedScreen(rows) | Command::SetGreenScreen(rows) => data = rows,
        }
        data
    }

    /// Build the frame addressed to `node`.
    pub fn to_frame(&self, node: u8) -> Result<CanFrame, CanIdBuildError> {
        let id = CanId::builder(self.base_id()).with_node(node).build()?;
        Ok(CanFrame::extended(id, &self.encode()))
    }
}

fn color(code: u8) -> Result<ColorSelect, CommandError> {
    ColorSelect::from_code(code).ok_or(CommandError::InvalidColor { code })
}

fn full_payload(frame: &CanFrame) -> Result<[u8; 8], CommandError> {
    if frame.len < 8 {
        return Err(CommandError::InvalidLength { len: frame.len });
    }
    Ok(frame.data)
}

/// Zero-length presence frame for `node`.
pub fn presence_frame(node: u8) -> Result<CanFrame, CanIdBuildError> {
    let id = CanId::builder(ONBUS_ID).with_node(node).build()?;
    Ok(CanFrame::extended(id, &[]))
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;

//! Creation and decomposition of the 29-bit identifiers used by the display
//! protocol: a base identifier with a 4-bit node address in bits 20..=23.
use crate::error::CanIdBuildError;

//==================================================================================CONSTANTS
/// Largest value representable by an extended identifier.
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;
/// Largest value representable by a standard identifier.
pub const STANDARD_ID_MAX: u32 = 0x7FF;
/// Bit position of the node address field.
pub const NODE_ADDRESS_SHIFT: u32 = 20;
/// Node address field (bits 20..=23).
pub const NODE_ADDRESS_MASK: u32 = 0x0F << NODE_ADDRESS_SHIFT;
/// Mask applied by receivers to strip the node address from an identifier.
pub const BASE_ID_MASK: u32 = 0x1E0F_FFFF;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw identifier (11 or 29 significant bits) with accessors for the
/// node-address field.
pub struct CanId(pub u32);

impl CanId {
    /// Creates a builder for a node-qualified identifier.
    pub fn builder(base: u32) -> CanIdBuilder {
        CanIdBuilder::new(base)
    }

    /// Identifier with the node address bits cleared, as compared by receivers.
    pub const fn base(&self) -> u32 {
        self.0 & BASE_ID_MASK
    }

    /// Node address carried in bits 20..=23.
    pub const fn node_address(&self) -> u8 {
        ((self.0 & NODE_ADDRESS_MASK) >> NODE_ADDRESS_SHIFT) as u8
    }

    /// Raw identifier value.
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

//==================================================================================CAN_ID_BUILDER
#[derive(Debug)]
/// Fluent builder combining a base identifier and a node address.
pub struct CanIdBuilder {
    pub base: u32,
    pub node_address: u8,
}

impl CanIdBuilder {
    /// Initializes the builder for a base identifier addressed to node 0.
    pub fn new(base: u32) -> Self {
        Self {
            base,
            node_address: 0,
        }
    }

    /// Selects the node the identifier is qualified with.
    pub fn with_node(mut self, node_address: u8) -> Self {
        self.node_address = node_address;
        self
    }

    /// Builds the identifier: `base | (node << 20)`.
    ///
    /// The base keeps whatever it carries in bits 20..=23 only if the node
    /// address is zero; receivers never look at those bits anyway.
    pub fn build(self) -> Result<CanId, CanIdBuildError> {
        if self.base > EXTENDED_ID_MAX {
            return Err(CanIdBuildError::IdentifierTooWide { id: self.base });
        }
        if self.node_address > 0x0F {
            return Err(CanIdBuildError::InvalidNodeAddress {
                address: self.node_address,
            });
        }
        Ok(CanId(
            self.base | ((self.node_address as u32) << NODE_ADDRESS_SHIFT),
        ))
    }
}

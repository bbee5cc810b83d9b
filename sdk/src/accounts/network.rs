//! One entry of the root account's social-network table.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::core::codec::{Field, TextField};
use crate::core::constants::{MASK_STRING_LEN, NETWORK_STRING_LEN};
use crate::core::error::DecodeError;

mod layout {
    use super::*;

    pub const MAX_LENGTH: Field<i8> = Field::new("max_length", 0);
    pub const VALIDATOR: Field<Pubkey> = Field::new("validator", 4);
    pub const DESCRIPTOR: TextField = TextField::new("descriptor", 36, NETWORK_STRING_LEN);
    pub const MASK: TextField = TextField::new("mask", 68, MASK_STRING_LEN);
}

/// Social-network descriptor, array-indexed by network id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    /// Maximum token-address text length this network accepts
    pub max_length: i8,
    /// Address of the validator signing proofs for this network
    pub validator: Pubkey,
    /// Short network name, e.g. `twitter`
    pub descriptor: String,
    /// Character-class bitmask for address validation
    pub mask: String,
}

impl NetworkRecord {
    /// Fixed record size inside the root account's trailing table.
    pub const LEN: usize = 136;

    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            max_length: layout::MAX_LENGTH.read(buf)?,
            validator: layout::VALIDATOR.read(buf)?,
            descriptor: layout::DESCRIPTOR.read(buf)?,
            mask: layout::MASK.read(buf)?,
        })
    }

    /// Decode the record embedded at `offset` of a larger buffer.
    pub fn decode_at(buf: &[u8], offset: usize) -> Result<Self, DecodeError> {
        let end = offset
            .checked_add(Self::LEN)
            .filter(|end| *end <= buf.len())
            .ok_or(DecodeError::OutOfBounds {
                field: "network_record",
                offset,
                need: Self::LEN,
                len: buf.len(),
            })?;
        Self::decode(&buf[offset..end])
    }

    #[cfg(test)]
    pub(crate) fn encode_into(&self, buf: &mut [u8]) -> Result<(), DecodeError> {
        layout::MAX_LENGTH.write(buf, &self.max_length)?;
        layout::VALIDATOR.write(buf, &self.validator)?;
        layout::DESCRIPTOR.write(buf, &self.descriptor)?;
        layout::MASK.write(buf, &self.mask)?;
        Ok(())
    }
}

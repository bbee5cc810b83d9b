//! Fixed-layout instruction payloads.
//!
//! The payload discriminant matches the log event the program emits for
//! the operation; token creation reuses the mint layout because the
//! program treats it as a first mint.

use crate::core::codec::{Field, TextField};
use crate::core::constants::{NICKNAME_LEN, TOKEN_SEED_ADDRESS_LEN};
use crate::core::error::DecodeError;
use crate::events::types::TradeSide;

pub const MINT_PAYLOAD_LEN: usize = 80;
pub const BURN_PAYLOAD_LEN: usize = 56;

mod layout {
    use super::*;

    pub const DISCRIMINANT: Field<u8> = Field::new("discriminant", 0);
    pub const NETWORK_ID: Field<u32> = Field::new("network_id", 4);
    pub const AMOUNT: Field<i64> = Field::new("amount", 8);
    pub const SLIPPAGE_LIMIT: Field<i64> = Field::new("slippage_limit", 16);
    pub const TOKEN_ADDRESS: TextField =
        TextField::new("token_address", 24, TOKEN_SEED_ADDRESS_LEN);
    pub const MINT_NICKNAME: TextField = TextField::new("nickname", 48, NICKNAME_LEN);
    pub const BURN_NICKNAME: TextField = TextField::new("nickname", 24, NICKNAME_LEN);
}

/// Encode a mint (or create) payload. A `None` limit leaves the slippage
/// field zeroed, which the program reads as "no bound".
pub(crate) fn encode_mint_payload(
    network_id: u32,
    amount: i64,
    limit: Option<i64>,
    token_address: &str,
    nickname: &str,
) -> Result<Vec<u8>, DecodeError> {
    let mut buf = vec![0u8; MINT_PAYLOAD_LEN];
    layout::DISCRIMINANT.write(&mut buf, &TradeSide::Mint.discriminant())?;
    layout::NETWORK_ID.write(&mut buf, &network_id)?;
    layout::AMOUNT.write(&mut buf, &amount)?;
    if let Some(limit) = limit {
        layout::SLIPPAGE_LIMIT.write(&mut buf, &limit)?;
    }
    layout::TOKEN_ADDRESS.write(&mut buf, &token_address.to_lowercase())?;
    layout::MINT_NICKNAME.write(&mut buf, nickname)?;
    Ok(buf)
}

/// Encode a burn payload. Burns identify the token through the account
/// list, so the payload carries no address text.
pub(crate) fn encode_burn_payload(
    network_id: u32,
    amount: i64,
    limit: Option<i64>,
    nickname: &str,
) -> Result<Vec<u8>, DecodeError> {
    let mut buf = vec![0u8; BURN_PAYLOAD_LEN];
    layout::DISCRIMINANT.write(&mut buf, &TradeSide::Burn.discriminant())?;
    layout::NETWORK_ID.write(&mut buf, &network_id)?;
    layout::AMOUNT.write(&mut buf, &amount)?;
    if let Some(limit) = limit {
        layout::SLIPPAGE_LIMIT.write(&mut buf, &limit)?;
    }
    layout::BURN_NICKNAME.write(&mut buf, nickname)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_payload_layout() {
        let buf = encode_mint_payload(2, 5_000_000, Some(521), "ElonMusk", "degen42").unwrap();
        assert_eq!(buf.len(), MINT_PAYLOAD_LEN);
        assert_eq!(buf[0], 4);
        assert_eq!(u32::from_le_bytes(buf[4..8].try_into().unwrap()), 2);
        assert_eq!(i64::from_le_bytes(buf[8..16].try_into().unwrap()), 5_000_000);
        assert_eq!(i64::from_le_bytes(buf[16..24].try_into().unwrap()), 521);
        assert_eq!(&buf[24..32], b"elonmusk");
        assert_eq!(&buf[48..55], b"degen42");
    }

    #[test]
    fn burn_payload_layout() {
        let buf = encode_burn_payload(1, 1_000_000, None, "degen42").unwrap();
        assert_eq!(buf.len(), BURN_PAYLOAD_LEN);
        assert_eq!(buf[0], 5);
        assert_eq!(i64::from_le_bytes(buf[16..24].try_into().unwrap()), 0);
        assert_eq!(&buf[24..31], b"degen42");
    }
}

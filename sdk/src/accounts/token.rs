//! Per-token bonding-curve account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::accounts::root::RootSnapshot;
use crate::accounts::{decimals_divisor, timestamp_secs};
use crate::core::codec::{Field, TextField};
use crate::core::constants::{AccountTag, NETWORK_STRING_LEN};
use crate::core::error::{DecodeError, DomainError};
use crate::curve::{self, CurveParams};

mod layout {
    use super::*;

    pub const TAG: Field<u32> = Field::new("tag", 0);
    pub const VERSION: Field<u32> = Field::new("version", 4);
    pub const ID: Field<i64> = Field::new("id", 8);
    pub const MINT: Field<Pubkey> = Field::new("mint", 16);
    pub const PROGRAM_ADDRESS: Field<Pubkey> = Field::new("program_address", 48);
    pub const CREATOR: Field<Pubkey> = Field::new("creator", 80);
    pub const CREATION_TIME: Field<u32> = Field::new("creation_time", 112);
    pub const TIME: Field<u32> = Field::new("time", 116);
    pub const SUPPLY: Field<i64> = Field::new("supply", 120);
    pub const ADDRESS: TextField = TextField::new("address", 128, NETWORK_STRING_LEN);
    pub const NETWORK: Field<u32> = Field::new("network", 160);
    pub const VALIDATION: Field<u32> = Field::new("validation", 164);
    pub const SLOT: Field<u64> = Field::new("slot", 168);
    pub const ALL_TIME_TRADES_COUNT: Field<i64> = Field::new("all_time_trades_count", 176);
    pub const ALL_TIME_BASE_CRNCY_VOLUME: Field<i64> =
        Field::new("all_time_base_crncy_volume", 184);
    pub const ALL_TIME_TOKENS_VOLUME: Field<i64> = Field::new("all_time_tokens_volume", 192);
}

/// Raw token account as stored on-chain. Amount fields arrive scaled to
/// human units; the root snapshot supplies the decimals factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub tag: u32,
    pub version: u32,
    pub id: i64,
    pub mint: Pubkey,
    pub program_address: Pubkey,
    pub creator: Pubkey,
    pub creation_time: DateTime<Utc>,
    pub time: DateTime<Utc>,
    pub supply: Decimal,
    pub address: String,
    pub network: u32,
    pub validation: u32,
    pub slot: u64,
    pub all_time_trades_count: i64,
    pub all_time_base_crncy_volume: Decimal,
    pub all_time_tokens_volume: Decimal,
}

impl TokenAccount {
    pub fn decode(buf: &[u8], root: &RootSnapshot) -> Result<Self, DecodeError> {
        let tag = layout::TAG.read(buf)?;
        if tag != AccountTag::Token.as_u32() {
            return Err(DecodeError::TagMismatch {
                expected: AccountTag::Token.as_u32(),
                found: tag,
            });
        }
        let divisor = decimals_divisor(root.base_crncy_decs_factor)?;
        let scaled = |field: Field<i64>| -> Result<Decimal, DecodeError> {
            Ok(Decimal::from(field.read(buf)?) / divisor)
        };

        Ok(Self {
            tag,
            version: layout::VERSION.read(buf)?,
            id: layout::ID.read(buf)?,
            mint: layout::MINT.read(buf)?,
            program_address: layout::PROGRAM_ADDRESS.read(buf)?,
            creator: layout::CREATOR.read(buf)?,
            creation_time: timestamp_secs(layout::CREATION_TIME.read(buf)?),
            time: timestamp_secs(layout::TIME.read(buf)?),
            supply: scaled(layout::SUPPLY)?,
            address: layout::ADDRESS.read(buf)?,
            network: layout::NETWORK.read(buf)?,
            validation: layout::VALIDATION.read(buf)?,
            slot: layout::SLOT.read(buf)?,
            all_time_trades_count: layout::ALL_TIME_TRADES_COUNT.read(buf)?,
            all_time_base_crncy_volume: scaled(layout::ALL_TIME_BASE_CRNCY_VOLUME)?,
            all_time_tokens_volume: scaled(layout::ALL_TIME_TOKENS_VOLUME)?,
        })
    }
}

/// Token view for consumers: raw account fields plus the spot price from
/// the curve and the resolved network descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub mint: Pubkey,
    pub token_program_id: Pubkey,
    pub address: String,
    pub network_id: u32,
    pub network: String,
    pub price: Decimal,
    pub supply: Decimal,
    pub creation_time: DateTime<Utc>,
}

impl TokenSummary {
    /// A token referencing a network id outside the root table is treated
    /// as undecodable, not silently defaulted.
    pub fn new(account: &TokenAccount, root: &RootSnapshot) -> Result<Self, DomainError> {
        let network = root.network(account.network)?.descriptor.clone();
        let price = curve::price(account.supply, &CurveParams::from(root), None)?;
        Ok(Self {
            mint: account.mint,
            token_program_id: account.program_address,
            address: account.address.clone(),
            network_id: account.network,
            network,
            price,
            supply: account.supply,
            creation_time: account.creation_time,
        })
    }
}

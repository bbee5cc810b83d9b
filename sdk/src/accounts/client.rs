//! Per-user client account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::accounts::root::RootSnapshot;
use crate::accounts::decimals_divisor;
use crate::core::codec::{Field, TextField};
use crate::core::constants::{AccountTag, NICKNAME_LEN};
use crate::core::error::DecodeError;

// The client record predates the u32 tag header of the other accounts:
// tag and version are single bytes and every later field is byte-packed.
mod layout {
    use super::*;

    pub const TAG: Field<u8> = Field::new("tag", 0);
    pub const VERSION: Field<u8> = Field::new("version", 1);
    pub const ID: Field<Pubkey> = Field::new("id", 2);
    pub const WALLET: Field<Pubkey> = Field::new("wallet", 34);
    pub const NICKNAME: TextField = TextField::new("nickname", 66, NICKNAME_LEN);
    pub const REF_STOP: Field<u64> = Field::new("ref_stop", 98);
    pub const REF_PAID: Field<u64> = Field::new("ref_paid", 106);
    pub const REF_DISCOUNT: Field<u64> = Field::new("ref_discount", 114);
    pub const REF_RATIO: Field<u64> = Field::new("ref_ratio", 122);
    pub const ALL_TIME_BASE_CRNCY_VOLUME: Field<u64> =
        Field::new("all_time_base_crncy_volume", 130);
    pub const ALL_TIME_TOKENS_VOLUME: Field<u64> = Field::new("all_time_tokens_volume", 138);
    pub const REF_ADDRESS: Field<Pubkey> = Field::new("ref_address", 146);
}

/// Byte offset of the referrer address, usable as a program-account scan
/// filter for "clients referred by wallet X".
pub const REF_ADDRESS_OFFSET: usize = 146;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientAccount {
    pub tag: u8,
    pub version: u8,
    pub id: Pubkey,
    pub wallet: Pubkey,
    pub nickname: String,
    /// Referral program expiry
    pub ref_stop: DateTime<Utc>,
    pub ref_paid: Decimal,
    pub ref_discount: u64,
    pub ref_ratio: u64,
    pub all_time_base_crncy_volume: Decimal,
    pub all_time_tokens_volume: Decimal,
    pub ref_address: Pubkey,
}

impl ClientAccount {
    pub fn decode(buf: &[u8], root: &RootSnapshot) -> Result<Self, DecodeError> {
        let tag = layout::TAG.read(buf)?;
        if u32::from(tag) != AccountTag::Client.as_u32() {
            return Err(DecodeError::TagMismatch {
                expected: AccountTag::Client.as_u32(),
                found: u32::from(tag),
            });
        }
        let divisor = decimals_divisor(root.base_crncy_decs_factor)?;
        let scaled = |field: Field<u64>| -> Result<Decimal, DecodeError> {
            Ok(Decimal::from(field.read(buf)?) / divisor)
        };

        let ref_stop_millis = layout::REF_STOP.read(buf)?;
        let ref_stop = DateTime::from_timestamp_millis(ref_stop_millis as i64).ok_or(
            DecodeError::InvalidValue {
                field: "ref_stop",
                reason: "timestamp out of range",
            },
        )?;

        Ok(Self {
            tag,
            version: layout::VERSION.read(buf)?,
            id: layout::ID.read(buf)?,
            wallet: layout::WALLET.read(buf)?,
            nickname: layout::NICKNAME.read(buf)?,
            ref_stop,
            ref_paid: scaled(layout::REF_PAID)?,
            ref_discount: layout::REF_DISCOUNT.read(buf)?,
            ref_ratio: layout::REF_RATIO.read(buf)?,
            all_time_base_crncy_volume: scaled(layout::ALL_TIME_BASE_CRNCY_VOLUME)?,
            all_time_tokens_volume: scaled(layout::ALL_TIME_TOKENS_VOLUME)?,
            ref_address: layout::REF_ADDRESS.read(buf)?,
        })
    }
}

/// The client fields trade building needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub wallet: Pubkey,
    pub nickname: String,
    pub ref_wallet: Pubkey,
}

impl From<&ClientAccount> for ClientInfo {
    fn from(account: &ClientAccount) -> Self {
        Self {
            wallet: account.wallet,
            nickname: account.nickname.clone(),
            ref_wallet: account.ref_address,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::accounts::root::tests::sample_root;
    use rust_decimal::prelude::ToPrimitive;

    pub(crate) fn encode_client(account: &ClientAccount, decs_factor: u32) -> Vec<u8> {
        let mut buf = vec![0u8; 178];
        let divisor = Decimal::from(decs_factor);
        let raw = |value: Decimal| -> u64 { (value * divisor).trunc().to_u64().unwrap() };

        layout::TAG.write(&mut buf, &account.tag).unwrap();
        layout::VERSION.write(&mut buf, &account.version).unwrap();
        layout::ID.write(&mut buf, &account.id).unwrap();
        layout::WALLET.write(&mut buf, &account.wallet).unwrap();
        layout::NICKNAME.write(&mut buf, &account.nickname).unwrap();
        layout::REF_STOP
            .write(&mut buf, &(account.ref_stop.timestamp_millis() as u64))
            .unwrap();
        layout::REF_PAID
            .write(&mut buf, &raw(account.ref_paid))
            .unwrap();
        layout::REF_DISCOUNT
            .write(&mut buf, &account.ref_discount)
            .unwrap();
        layout::REF_RATIO
            .write(&mut buf, &account.ref_ratio)
            .unwrap();
        layout::ALL_TIME_BASE_CRNCY_VOLUME
            .write(&mut buf, &raw(account.all_time_base_crncy_volume))
            .unwrap();
        layout::ALL_TIME_TOKENS_VOLUME
            .write(&mut buf, &raw(account.all_time_tokens_volume))
            .unwrap();
        layout::REF_ADDRESS
            .write(&mut buf, &account.ref_address)
            .unwrap();
        buf
    }

    pub(crate) fn sample_client() -> ClientAccount {
        ClientAccount {
            tag: AccountTag::Client.as_u32() as u8,
            version: 0,
            id: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
            nickname: "degen42".to_string(),
            ref_stop: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            ref_paid: Decimal::new(3_000_000, 6),
            ref_discount: 10,
            ref_ratio: 25,
            all_time_base_crncy_volume: Decimal::new(77_000_000, 6),
            all_time_tokens_volume: Decimal::new(11_000_000, 6),
            ref_address: Pubkey::new_unique(),
        }
    }

    #[test]
    fn client_round_trip() {
        let root = sample_root().snapshot(Pubkey::new_unique());
        let client = sample_client();
        let buf = encode_client(&client, root.base_crncy_decs_factor);
        assert_eq!(ClientAccount::decode(&buf, &root).unwrap(), client);
    }

    #[test]
    fn tag_mismatch_is_rejected() {
        let root = sample_root().snapshot(Pubkey::new_unique());
        let client = sample_client();
        let mut buf = encode_client(&client, root.base_crncy_decs_factor);
        buf[0] = AccountTag::Root.as_u32() as u8;
        assert!(matches!(
            ClientAccount::decode(&buf, &root),
            Err(DecodeError::TagMismatch { .. })
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let root = sample_root().snapshot(Pubkey::new_unique());
        let client = sample_client();
        let buf = encode_client(&client, root.base_crncy_decs_factor);
        assert!(matches!(
            ClientAccount::decode(&buf[..100], &root),
            Err(DecodeError::OutOfBounds { .. })
        ));
    }
}

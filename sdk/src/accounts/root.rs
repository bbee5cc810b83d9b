//! Root account: the protocol-wide singleton.
//!
//! The root is fetched once per session and passed around as read-only
//! context; every mutation happens on-chain. Its buffer carries the curve
//! parameters, the base-currency identity, cumulative counters, and a
//! trailing table of network records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::accounts::network::NetworkRecord;
use crate::accounts::{decimal_from_f64, decimals_divisor, timestamp_secs};
use crate::core::codec::{Field, TextField};
use crate::core::constants::AccountTag;
use crate::core::error::{DecodeError, DomainError};

mod layout {
    use super::*;

    pub const TAG: Field<u32> = Field::new("tag", 0);
    pub const VERSION: Field<u32> = Field::new("version", 4);
    pub const ADMIN: Field<Pubkey> = Field::new("admin", 8);
    pub const FEE_WALLET: Field<Pubkey> = Field::new("fee_wallet", 40);
    pub const BASE_CRNCY_MINT: Field<Pubkey> = Field::new("base_crncy_mint", 72);
    pub const BASE_CRNCY_PROGRAM_ADDRESS: Field<Pubkey> =
        Field::new("base_crncy_program_address", 104);
    pub const CLIENTS_COUNT: Field<i64> = Field::new("clients_count", 136);
    pub const TOKENS_COUNT: Field<i64> = Field::new("tokens_count", 144);
    pub const FEES: Field<i64> = Field::new("fees", 152);
    pub const NETWORKS_COUNT: Field<u32> = Field::new("networks_count", 160);
    pub const BASE_CRNCY_DECS_FACTOR: Field<u32> = Field::new("base_crncy_decs_factor", 164);
    pub const SLOT: Field<u64> = Field::new("slot", 168);
    pub const TIME: Field<u32> = Field::new("time", 176);
    pub const DECIMALS: Field<u32> = Field::new("decimals", 180);
    pub const SUPPLY: Field<i64> = Field::new("supply", 184);
    pub const TVL: Field<i64> = Field::new("tvl", 192);
    pub const COUNTER: Field<i64> = Field::new("counter", 200);
    pub const ALL_TIME_BASE_CRNCY_VOLUME: Field<i64> =
        Field::new("all_time_base_crncy_volume", 208);
    pub const ALL_TIME_TOKENS_VOLUME: Field<i64> = Field::new("all_time_tokens_volume", 224);
    pub const HOLDER_FEES: Field<i64> = Field::new("holder_fees", 240);
    pub const INIT_PRICE: Field<f64> = Field::new("init_price", 248);
    pub const MAX_SUPPLY: Field<i64> = Field::new("max_supply", 256);
    pub const FEE_RATIO: Field<f64> = Field::new("fee_ratio", 264);
    pub const FEE_RATE: Field<f64> = Field::new("fee_rate", 272);
    pub const CREATION_FEE: Field<f64> = Field::new("creation_fee", 280);
    pub const MAX_NETWORKS_COUNT: Field<u32> = Field::new("max_networks_count", 288);
    pub const CREATION_TIME: Field<u32> = Field::new("creation_time", 292);
    pub const MIN_FEES: Field<f64> = Field::new("min_fees", 296);
    pub const OPERATOR_NAME: TextField = TextField::new("operator_name", 304, 24);
    pub const REF_DURATION: Field<u32> = Field::new("ref_duration", 336);
    pub const MASK: Field<u32> = Field::new("mask", 340);
    pub const REF_DISCOUNT: Field<f64> = Field::new("ref_discount", 344);
    pub const REF_RATIO: Field<f64> = Field::new("ref_ratio", 352);
    pub const URL_PREFIX: TextField = TextField::new("url_prefix", 360, 32);
    pub const NETWORK_RECORDS: usize = 392;
}

/// Fully decoded root account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootAccount {
    pub tag: u32,
    pub version: u32,
    pub admin: Pubkey,
    pub fee_wallet: Pubkey,
    pub base_crncy_mint: Pubkey,
    pub base_crncy_program_address: Pubkey,
    pub clients_count: i64,
    pub tokens_count: i64,
    pub fees: Decimal,
    pub networks_count: u32,
    pub base_crncy_decs_factor: u32,
    pub slot: u64,
    pub time: DateTime<Utc>,
    pub decimals: u32,
    pub supply: Decimal,
    pub tvl: Decimal,
    pub counter: i64,
    pub all_time_base_crncy_volume: Decimal,
    pub all_time_tokens_volume: Decimal,
    pub holder_fees: Decimal,
    pub init_price: Decimal,
    pub max_supply: Decimal,
    pub fee_ratio: Decimal,
    pub fee_rate: Decimal,
    pub creation_fee: Decimal,
    pub max_networks_count: u32,
    pub creation_time: DateTime<Utc>,
    pub min_fees: Decimal,
    pub operator_name: String,
    pub ref_duration: u32,
    pub mask: u32,
    pub ref_discount: Decimal,
    pub ref_ratio: Decimal,
    pub url_prefix: String,
    pub networks: Vec<NetworkRecord>,
}

impl RootAccount {
    /// Decode a root account buffer.
    ///
    /// The leading tag must identify a root account and the network table
    /// length must respect `networks_count <= max_networks_count`; either
    /// violation rejects the whole buffer rather than yielding a partially
    /// populated record.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let tag = layout::TAG.read(buf)?;
        if tag != AccountTag::Root.as_u32() {
            return Err(DecodeError::TagMismatch {
                expected: AccountTag::Root.as_u32(),
                found: tag,
            });
        }

        let decs_factor = layout::BASE_CRNCY_DECS_FACTOR.read(buf)?;
        let divisor = decimals_divisor(decs_factor)?;
        let scaled = |field: Field<i64>| -> Result<Decimal, DecodeError> {
            Ok(Decimal::from(field.read(buf)?) / divisor)
        };

        let networks_count = layout::NETWORKS_COUNT.read(buf)?;
        let max_networks_count = layout::MAX_NETWORKS_COUNT.read(buf)?;
        if networks_count > max_networks_count {
            return Err(DecodeError::NetworkTableOverflow {
                count: networks_count,
                max: max_networks_count,
            });
        }
        let mut networks = Vec::with_capacity(networks_count as usize);
        for i in 0..networks_count as usize {
            let offset = layout::NETWORK_RECORDS + NetworkRecord::LEN * i;
            networks.push(NetworkRecord::decode_at(buf, offset)?);
        }

        Ok(Self {
            tag,
            version: layout::VERSION.read(buf)?,
            admin: layout::ADMIN.read(buf)?,
            fee_wallet: layout::FEE_WALLET.read(buf)?,
            base_crncy_mint: layout::BASE_CRNCY_MINT.read(buf)?,
            base_crncy_program_address: layout::BASE_CRNCY_PROGRAM_ADDRESS.read(buf)?,
            clients_count: layout::CLIENTS_COUNT.read(buf)?,
            tokens_count: layout::TOKENS_COUNT.read(buf)?,
            fees: scaled(layout::FEES)?,
            networks_count,
            base_crncy_decs_factor: decs_factor,
            slot: layout::SLOT.read(buf)?,
            time: timestamp_secs(layout::TIME.read(buf)?),
            decimals: layout::DECIMALS.read(buf)?,
            supply: scaled(layout::SUPPLY)?,
            tvl: scaled(layout::TVL)?,
            counter: layout::COUNTER.read(buf)?,
            all_time_base_crncy_volume: scaled(layout::ALL_TIME_BASE_CRNCY_VOLUME)?,
            all_time_tokens_volume: scaled(layout::ALL_TIME_TOKENS_VOLUME)?,
            holder_fees: scaled(layout::HOLDER_FEES)?,
            init_price: decimal_from_f64(layout::INIT_PRICE.read(buf)?, "init_price")?,
            max_supply: scaled(layout::MAX_SUPPLY)?,
            fee_ratio: decimal_from_f64(layout::FEE_RATIO.read(buf)?, "fee_ratio")?,
            fee_rate: decimal_from_f64(layout::FEE_RATE.read(buf)?, "fee_rate")?,
            creation_fee: decimal_from_f64(layout::CREATION_FEE.read(buf)?, "creation_fee")?,
            max_networks_count,
            creation_time: timestamp_secs(layout::CREATION_TIME.read(buf)?),
            min_fees: decimal_from_f64(layout::MIN_FEES.read(buf)?, "min_fees")?,
            operator_name: layout::OPERATOR_NAME.read(buf)?,
            ref_duration: layout::REF_DURATION.read(buf)?,
            mask: layout::MASK.read(buf)?,
            ref_discount: decimal_from_f64(layout::REF_DISCOUNT.read(buf)?, "ref_discount")?,
            ref_ratio: decimal_from_f64(layout::REF_RATIO.read(buf)?, "ref_ratio")?,
            url_prefix: layout::URL_PREFIX.read(buf)?,
            networks,
        })
    }

    /// Reduce to the snapshot the rest of the SDK threads around.
    pub fn snapshot(&self, address: Pubkey) -> RootSnapshot {
        RootSnapshot {
            address,
            base_crncy_decs_factor: self.base_crncy_decs_factor,
            max_supply: self.max_supply,
            init_price: self.init_price,
            fee_rate: self.fee_rate,
            min_fees: self.min_fees,
            networks: self.networks.clone(),
            base_crncy_mint: self.base_crncy_mint,
            base_crncy_program_address: self.base_crncy_program_address,
        }
    }
}

/// The slice of the root account that pricing and encoding need, plus the
/// account's own address. Required context for token/client decoding and
/// for every instruction builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootSnapshot {
    pub address: Pubkey,
    pub base_crncy_decs_factor: u32,
    pub max_supply: Decimal,
    pub init_price: Decimal,
    pub fee_rate: Decimal,
    pub min_fees: Decimal,
    pub networks: Vec<NetworkRecord>,
    pub base_crncy_mint: Pubkey,
    pub base_crncy_program_address: Pubkey,
}

impl RootSnapshot {
    /// Resolve a network id against the root table.
    pub fn network(&self, id: u32) -> Result<&NetworkRecord, DomainError> {
        self.networks
            .get(id as usize)
            .ok_or(DomainError::UnknownNetwork {
                id,
                count: self.networks.len(),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    /// Synthetic encoder mirroring `RootAccount::decode`, test-only: the
    /// production client never writes account buffers.
    pub(crate) fn encode_root(account: &RootAccount) -> Vec<u8> {
        let len = layout::NETWORK_RECORDS + NetworkRecord::LEN * account.networks.len();
        let mut buf = vec![0u8; len];
        let divisor = Decimal::from(account.base_crncy_decs_factor);
        let raw = |value: Decimal| -> i64 { (value * divisor).trunc().to_i64().unwrap() };

        layout::TAG.write(&mut buf, &account.tag).unwrap();
        layout::VERSION.write(&mut buf, &account.version).unwrap();
        layout::ADMIN.write(&mut buf, &account.admin).unwrap();
        layout::FEE_WALLET.write(&mut buf, &account.fee_wallet).unwrap();
        layout::BASE_CRNCY_MINT
            .write(&mut buf, &account.base_crncy_mint)
            .unwrap();
        layout::BASE_CRNCY_PROGRAM_ADDRESS
            .write(&mut buf, &account.base_crncy_program_address)
            .unwrap();
        layout::CLIENTS_COUNT
            .write(&mut buf, &account.clients_count)
            .unwrap();
        layout::TOKENS_COUNT
            .write(&mut buf, &account.tokens_count)
            .unwrap();
        layout::FEES.write(&mut buf, &raw(account.fees)).unwrap();
        layout::NETWORKS_COUNT
            .write(&mut buf, &account.networks_count)
            .unwrap();
        layout::BASE_CRNCY_DECS_FACTOR
            .write(&mut buf, &account.base_crncy_decs_factor)
            .unwrap();
        layout::SLOT.write(&mut buf, &account.slot).unwrap();
        layout::TIME
            .write(&mut buf, &(account.time.timestamp() as u32))
            .unwrap();
        layout::DECIMALS.write(&mut buf, &account.decimals).unwrap();
        layout::SUPPLY.write(&mut buf, &raw(account.supply)).unwrap();
        layout::TVL.write(&mut buf, &raw(account.tvl)).unwrap();
        layout::COUNTER.write(&mut buf, &account.counter).unwrap();
        layout::ALL_TIME_BASE_CRNCY_VOLUME
            .write(&mut buf, &raw(account.all_time_base_crncy_volume))
            .unwrap();
        layout::ALL_TIME_TOKENS_VOLUME
            .write(&mut buf, &raw(account.all_time_tokens_volume))
            .unwrap();
        layout::HOLDER_FEES
            .write(&mut buf, &raw(account.holder_fees))
            .unwrap();
        layout::INIT_PRICE
            .write(&mut buf, &account.init_price.to_f64().unwrap())
            .unwrap();
        layout::MAX_SUPPLY
            .write(&mut buf, &raw(account.max_supply))
            .unwrap();
        layout::FEE_RATIO
            .write(&mut buf, &account.fee_ratio.to_f64().unwrap())
            .unwrap();
        layout::FEE_RATE
            .write(&mut buf, &account.fee_rate.to_f64().unwrap())
            .unwrap();
        layout::CREATION_FEE
            .write(&mut buf, &account.creation_fee.to_f64().unwrap())
            .unwrap();
        layout::MAX_NETWORKS_COUNT
            .write(&mut buf, &account.max_networks_count)
            .unwrap();
        layout::CREATION_TIME
            .write(&mut buf, &(account.creation_time.timestamp() as u32))
            .unwrap();
        layout::MIN_FEES
            .write(&mut buf, &account.min_fees.to_f64().unwrap())
            .unwrap();
        layout::OPERATOR_NAME
            .write(&mut buf, &account.operator_name)
            .unwrap();
        layout::REF_DURATION
            .write(&mut buf, &account.ref_duration)
            .unwrap();
        layout::MASK.write(&mut buf, &account.mask).unwrap();
        layout::REF_DISCOUNT
            .write(&mut buf, &account.ref_discount.to_f64().unwrap())
            .unwrap();
        layout::REF_RATIO
            .write(&mut buf, &account.ref_ratio.to_f64().unwrap())
            .unwrap();
        layout::URL_PREFIX
            .write(&mut buf, &account.url_prefix)
            .unwrap();
        for (i, record) in account.networks.iter().enumerate() {
            let offset = layout::NETWORK_RECORDS + NetworkRecord::LEN * i;
            record
                .encode_into(&mut buf[offset..offset + NetworkRecord::LEN])
                .unwrap();
        }
        buf
    }

    pub(crate) fn sample_root() -> RootAccount {
        RootAccount {
            tag: AccountTag::Root.as_u32(),
            version: 0,
            admin: Pubkey::new_unique(),
            fee_wallet: Pubkey::new_unique(),
            base_crncy_mint: Pubkey::new_unique(),
            base_crncy_program_address: Pubkey::new_unique(),
            clients_count: 1234,
            tokens_count: 56,
            fees: Decimal::new(125_000, 6),
            networks_count: 2,
            base_crncy_decs_factor: 1_000_000,
            slot: 250_000_000,
            time: timestamp_secs(1_700_000_000),
            decimals: 6,
            supply: Decimal::new(42_000_000, 6),
            tvl: Decimal::new(9_000_000, 6),
            counter: 789,
            all_time_base_crncy_volume: Decimal::new(123_456_789, 6),
            all_time_tokens_volume: Decimal::new(987_654_321, 6),
            holder_fees: Decimal::new(55_000, 6),
            init_price: Decimal::new(1, 4),
            max_supply: Decimal::from(1_000_000),
            fee_ratio: Decimal::new(5, 1),
            fee_rate: Decimal::new(1, 2),
            creation_fee: Decimal::new(25, 1),
            max_networks_count: 16,
            creation_time: timestamp_secs(1_690_000_000),
            min_fees: Decimal::new(1, 2),
            operator_name: "hype-operator".to_string(),
            ref_duration: 86_400,
            mask: 7,
            ref_discount: Decimal::new(1, 1),
            ref_ratio: Decimal::new(25, 2),
            url_prefix: "https://hype.vote/t/".to_string(),
            networks: vec![
                NetworkRecord {
                    max_length: 15,
                    validator: Pubkey::new_unique(),
                    descriptor: "twitter".to_string(),
                    mask: "a1".to_string(),
                },
                NetworkRecord {
                    max_length: 24,
                    validator: Pubkey::new_unique(),
                    descriptor: "twitch".to_string(),
                    mask: "b2".to_string(),
                },
            ],
        }
    }

    #[test]
    fn root_round_trip() {
        let root = sample_root();
        let buf = encode_root(&root);
        let decoded = RootAccount::decode(&buf).unwrap();
        assert_eq!(decoded, root);
    }

    #[test]
    fn tag_mismatch_is_rejected() {
        let root = sample_root();
        let mut buf = encode_root(&root);
        buf[0] = AccountTag::Token.as_u32() as u8;
        let err = RootAccount::decode(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::TagMismatch { .. }));
    }

    #[test]
    fn truncated_network_table_is_rejected() {
        let root = sample_root();
        let buf = encode_root(&root);
        let err = RootAccount::decode(&buf[..buf.len() - 1]).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { .. }));
    }

    #[test]
    fn network_count_above_maximum_is_rejected() {
        let mut root = sample_root();
        root.max_networks_count = 1;
        let buf = encode_root(&root);
        let err = RootAccount::decode(&buf).unwrap_err();
        assert!(matches!(err, DecodeError::NetworkTableOverflow { .. }));
    }

    #[test]
    fn unknown_network_lookup_fails() {
        let root = sample_root();
        let snapshot = root.snapshot(Pubkey::new_unique());
        assert_eq!(snapshot.network(1).unwrap().descriptor, "twitch");
        assert!(matches!(
            snapshot.network(9),
            Err(DomainError::UnknownNetwork { id: 9, count: 2 })
        ));
    }
}

//! Typed records for program-emitted log events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Prefix of structured event lines.
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";
/// Prefix of program error lines.
pub const ERROR_PREFIX: &str = "Error:";

/// Event-kind discriminants as emitted in the first base64 field.
pub mod discriminant {
    pub const NEW_CLIENT: u8 = 1;
    pub const NEW_NETWORK: u8 = 2;
    pub const NEW_TOKEN: u8 = 3;
    pub const MINT: u8 = 4;
    pub const BURN: u8 = 5;
}

/// Direction of a trade event, and of the matching instruction payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Mint,
    Burn,
}

impl TradeSide {
    /// The wire discriminant shared by the log event and the instruction.
    pub const fn discriminant(self) -> u8 {
        match self {
            TradeSide::Mint => discriminant::MINT,
            TradeSide::Burn => discriminant::BURN,
        }
    }
}

/// A client record was created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewClientEvent {
    pub client_id: u64,
    pub order_id: u64,
    pub wallet: Pubkey,
    pub time: DateTime<Utc>,
    pub slot: u64,
    pub nickname: String,
}

/// A social network was added to the root table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewNetworkEvent {
    pub network_id: u32,
    pub descriptor: String,
    pub time: DateTime<Utc>,
    pub slot: u64,
}

/// A token was created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTokenEvent {
    pub client_id: u64,
    pub order_id: u64,
    pub token_id: u64,
    pub network_id: u32,
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub address: String,
    pub time: DateTime<Utc>,
    pub slot: u64,
}

/// A mint or burn happened. Both kinds share one field list; `side` carries
/// the discriminant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub side: TradeSide,
    pub client_id: u64,
    pub order_id: u64,
    pub token_id: u64,
    pub network_id: u32,
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub address: String,
    /// Post-event token supply
    pub supply: Decimal,
    pub creation_time: DateTime<Utc>,
    pub all_time_trades_count: u64,
    pub all_time_base_crncy_volume: Decimal,
    pub all_time_tokens_volume: Decimal,
    /// Tokens moved by this trade
    pub tokens_amount: Decimal,
    /// Base currency moved by this trade
    pub base_crncy_amount: Decimal,
    pub time: DateTime<Utc>,
    pub slot: u64,
    pub wallet: Pubkey,
    pub nickname: String,
}

/// One decoded program log event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProgramEvent {
    NewClient(NewClientEvent),
    NewNetwork(NewNetworkEvent),
    NewToken(NewTokenEvent),
    Trade(TradeEvent),
    /// Free-text program error line
    Error(String),
}

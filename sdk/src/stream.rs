//! Normalized transaction records for streaming consumers.
//!
//! A log-subscription collaborator delivers batches of lines plus the
//! transaction signature; this module flattens the decoded events into one
//! uniform record shape. Per-line decode failures are passed through from
//! the batch decoder, never dropped.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::events::{decode_logs, LineFailure, ProgramEvent, TradeSide};

/// Kind of a normalized transaction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Mint,
    Burn,
    NewToken,
    /// A program error line; only the signature and receipt time are
    /// meaningful.
    Instruction,
}

/// One event flattened into the shape streaming consumers store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Transaction signature of the containing transaction
    pub id: String,
    pub kind: TransactionKind,
    pub token_id: u64,
    pub order_id: u64,
    pub mint: Option<Pubkey>,
    pub creator: Option<Pubkey>,
    pub wallet: Option<Pubkey>,
    pub address: String,
    pub network_id: u32,
    /// When the event was committed
    pub committed_at: DateTime<Utc>,
    /// When the underlying token was created
    pub created_at: DateTime<Utc>,
    /// Post-event token supply
    pub supply: Decimal,
    /// Signed supply change: positive for mints, negative for burns
    pub supply_delta: Decimal,
    pub base_crncy_amount: Decimal,
}

/// Decode a log batch and normalize its events, preserving line order.
pub fn parse_transactions<S: AsRef<str>>(
    lines: &[S],
    signature: &str,
    decs_factor: u32,
) -> (Vec<ParsedTransaction>, Vec<LineFailure>) {
    let batch = decode_logs(lines, decs_factor);
    let transactions = batch
        .events
        .iter()
        .filter_map(|event| normalize(event, signature))
        .collect();
    (transactions, batch.failures)
}

fn normalize(event: &ProgramEvent, signature: &str) -> Option<ParsedTransaction> {
    match event {
        ProgramEvent::NewToken(token) => Some(ParsedTransaction {
            id: signature.to_string(),
            kind: TransactionKind::NewToken,
            token_id: token.token_id,
            order_id: token.order_id,
            mint: Some(token.mint),
            creator: Some(token.creator),
            // for new tokens the creator is the acting wallet
            wallet: Some(token.creator),
            address: token.address.clone(),
            network_id: token.network_id,
            committed_at: token.time,
            created_at: token.time,
            supply: Decimal::ZERO,
            supply_delta: Decimal::ZERO,
            base_crncy_amount: Decimal::ZERO,
        }),
        ProgramEvent::Trade(trade) => {
            let (kind, delta) = match trade.side {
                TradeSide::Mint => (TransactionKind::Mint, trade.tokens_amount),
                TradeSide::Burn => (TransactionKind::Burn, -trade.tokens_amount),
            };
            Some(ParsedTransaction {
                id: signature.to_string(),
                kind,
                token_id: trade.token_id,
                order_id: trade.order_id,
                mint: Some(trade.mint),
                creator: Some(trade.creator),
                wallet: Some(trade.wallet),
                address: trade.address.clone(),
                network_id: trade.network_id,
                committed_at: trade.time,
                created_at: trade.creation_time,
                supply: trade.supply,
                supply_delta: delta,
                base_crncy_amount: trade.base_crncy_amount,
            })
        }
        ProgramEvent::Error(_) => Some(ParsedTransaction {
            id: signature.to_string(),
            kind: TransactionKind::Instruction,
            token_id: 0,
            order_id: 0,
            mint: None,
            creator: None,
            wallet: None,
            address: String::new(),
            network_id: 0,
            committed_at: Utc::now(),
            created_at: Utc::now(),
            supply: Decimal::ZERO,
            supply_delta: Decimal::ZERO,
            base_crncy_amount: Decimal::ZERO,
        }),
        // Client and network registrations are not transactions.
        ProgramEvent::NewClient(_) | ProgramEvent::NewNetwork(_) => None,
    }
}

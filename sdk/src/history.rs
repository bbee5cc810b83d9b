//! Per-token transaction history derived from trade events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::RootSnapshot;
use crate::core::error::DomainError;
use crate::curve::{self, CurveParams};
use crate::events::{TradeEvent, TradeSide};

/// One trade with the curve state on both sides of it. The before-price is
/// recomputed by re-running the curve at `supply -/+ tokens_amount`;
/// nothing here is persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionHistoryItem {
    pub side: TradeSide,
    pub supply_before: Decimal,
    pub price_before: Decimal,
    pub supply_after: Decimal,
    pub price_after: Decimal,
    /// Base currency moved by the trade
    pub sum: Decimal,
    pub token_amount: Decimal,
    pub time: DateTime<Utc>,
}

impl TransactionHistoryItem {
    pub fn from_trade(report: &TradeEvent, root: &RootSnapshot) -> Result<Self, DomainError> {
        let delta = match report.side {
            TradeSide::Mint => report.tokens_amount,
            TradeSide::Burn => -report.tokens_amount,
        };
        let supply_before = report.supply - delta;
        let params = CurveParams::from(root);
        Ok(Self {
            side: report.side,
            supply_before,
            price_before: curve::price(supply_before, &params, None)?,
            supply_after: report.supply,
            price_after: curve::price(report.supply, &params, None)?,
            sum: report.base_crncy_amount,
            token_amount: report.tokens_amount,
            time: report.time,
        })
    }
}

/// Pick the most recent trade out of a set of decoded reports.
///
/// Log sources give no ordering guarantee, so "latest" is defined here as
/// the highest slot, with the program-assigned order id breaking ties
/// inside a slot. Callers must not assume the first decoded report is the
/// newest.
pub fn latest_trade(reports: &[TradeEvent]) -> Option<&TradeEvent> {
    reports.iter().max_by_key(|r| (r.slot, r.order_id))
}

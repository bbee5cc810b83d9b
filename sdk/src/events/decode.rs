//! Decoding of program log lines into typed events.
//!
//! Recognition is prefix-based: `"Program data: "` lines carry
//! space-separated base64 fields (first field: one-byte discriminant),
//! `"Error:"` lines carry free text, anything else is not ours and is
//! skipped. A recognized line whose fields fail to decode is a hard error
//! surfaced to the caller; batch decoding isolates such failures per line.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::error::EventError;
use crate::events::types::*;

/// Positional accessor over the base64-decoded fields after the
/// discriminant.
struct EventFields {
    fields: Vec<Vec<u8>>,
    divisor: Decimal,
}

impl EventFields {
    fn get(&self, index: usize) -> Result<&[u8], EventError> {
        self.fields
            .get(index)
            .map(Vec::as_slice)
            .ok_or(EventError::MissingField {
                index,
                available: self.fields.len(),
            })
    }

    fn fixed(&self, index: usize, need: usize) -> Result<&[u8], EventError> {
        let bytes = self.get(index)?;
        if bytes.len() < need {
            return Err(EventError::FieldTooShort {
                index,
                need,
                got: bytes.len(),
            });
        }
        Ok(&bytes[..need])
    }

    fn u32(&self, index: usize) -> Result<u32, EventError> {
        let bytes = self.fixed(index, 4)?;
        Ok(u32::from_le_bytes(bytes.try_into().expect("length checked")))
    }

    fn u64(&self, index: usize) -> Result<u64, EventError> {
        let bytes = self.fixed(index, 8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("length checked")))
    }

    /// Timestamps are u32 whole seconds.
    fn time(&self, index: usize) -> Result<DateTime<Utc>, EventError> {
        let secs = self.u32(index)?;
        Ok(DateTime::from_timestamp(i64::from(secs), 0).expect("u32 seconds are in range"))
    }

    fn pubkey(&self, index: usize) -> Result<solana_sdk::pubkey::Pubkey, EventError> {
        let bytes = self.fixed(index, 32)?;
        Ok(solana_sdk::pubkey::Pubkey::new_from_array(
            bytes.try_into().expect("length checked"),
        ))
    }

    fn text(&self, index: usize) -> Result<String, EventError> {
        Ok(crate::core::codec::read_zero_terminated(self.get(index)?))
    }

    /// A u64 amount scaled down by the currency decimals factor.
    fn amount(&self, index: usize) -> Result<Decimal, EventError> {
        Ok(Decimal::from(self.u64(index)?) / self.divisor)
    }
}

/// Decode one log line.
///
/// Returns `Ok(None)` for lines that are not protocol events (wrong prefix,
/// or a program-data discriminant this client does not know). Returns an
/// error only when a recognized prefix fails field-level decoding.
pub fn decode_line(
    line: &str,
    decs_factor: u32,
) -> Result<Option<ProgramEvent>, EventError> {
    if let Some(payload) = line.strip_prefix(PROGRAM_DATA_PREFIX) {
        return decode_program_data(payload, decs_factor);
    }
    if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
        let message = message.strip_prefix(' ').unwrap_or(message);
        return Ok(Some(ProgramEvent::Error(message.to_string())));
    }
    Ok(None)
}

fn decode_program_data(
    payload: &str,
    decs_factor: u32,
) -> Result<Option<ProgramEvent>, EventError> {
    if decs_factor == 0 {
        return Err(EventError::ZeroDecimals);
    }
    let mut parts = payload.split(' ');
    let head = parts.next().filter(|p| !p.is_empty()).ok_or(EventError::Empty)?;
    let head = BASE64.decode(head).map_err(|e| EventError::Base64 {
        index: 0,
        reason: e.to_string(),
    })?;
    let kind = *head.first().ok_or(EventError::FieldTooShort {
        index: 0,
        need: 1,
        got: 0,
    })?;

    let fields = parts
        .enumerate()
        .map(|(i, part)| {
            BASE64.decode(part).map_err(|e| EventError::Base64 {
                index: i + 1,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let fields = EventFields {
        fields,
        divisor: Decimal::from(decs_factor),
    };

    let event = match kind {
        discriminant::NEW_CLIENT => ProgramEvent::NewClient(NewClientEvent {
            client_id: fields.u64(0)?,
            order_id: fields.u64(1)?,
            wallet: fields.pubkey(2)?,
            time: fields.time(3)?,
            slot: fields.u64(4)?,
            nickname: fields.text(5)?,
        }),
        discriminant::NEW_NETWORK => ProgramEvent::NewNetwork(NewNetworkEvent {
            network_id: fields.u32(0)?,
            descriptor: fields.text(1)?,
            time: fields.time(2)?,
            slot: fields.u64(3)?,
        }),
        discriminant::NEW_TOKEN => ProgramEvent::NewToken(NewTokenEvent {
            client_id: fields.u64(0)?,
            order_id: fields.u64(1)?,
            token_id: fields.u64(2)?,
            network_id: fields.u32(3)?,
            mint: fields.pubkey(4)?,
            creator: fields.pubkey(5)?,
            address: fields.text(6)?,
            time: fields.time(7)?,
            slot: fields.u64(8)?,
        }),
        discriminant::MINT => ProgramEvent::Trade(decode_trade(TradeSide::Mint, &fields)?),
        discriminant::BURN => ProgramEvent::Trade(decode_trade(TradeSide::Burn, &fields)?),
        other => {
            debug!(discriminant = other, "skipping unknown program data event");
            return Ok(None);
        }
    };
    Ok(Some(event))
}

fn decode_trade(side: TradeSide, fields: &EventFields) -> Result<TradeEvent, EventError> {
    Ok(TradeEvent {
        side,
        client_id: fields.u64(0)?,
        order_id: fields.u64(1)?,
        token_id: fields.u64(2)?,
        network_id: fields.u32(3)?,
        mint: fields.pubkey(4)?,
        creator: fields.pubkey(5)?,
        address: fields.text(6)?,
        supply: fields.amount(7)?,
        creation_time: fields.time(8)?,
        all_time_trades_count: fields.u64(9)?,
        all_time_base_crncy_volume: fields.amount(10)?,
        all_time_tokens_volume: fields.amount(11)?,
        tokens_amount: fields.amount(12)?,
        base_crncy_amount: fields.amount(13)?,
        time: fields.time(14)?,
        slot: fields.u64(15)?,
        wallet: fields.pubkey(16)?,
        nickname: fields.text(17)?,
    })
}

/// One per-line failure inside a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFailure {
    pub line_index: usize,
    pub error: EventError,
}

/// Events and failures decoded from one batch of log lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogBatch {
    pub events: Vec<ProgramEvent>,
    pub failures: Vec<LineFailure>,
}

/// Decode a batch of log lines, isolating failures per line: a malformed
/// line is reported in `failures` without dropping its siblings.
pub fn decode_logs<S: AsRef<str>>(lines: &[S], decs_factor: u32) -> LogBatch {
    let mut batch = LogBatch::default();
    for (line_index, line) in lines.iter().enumerate() {
        match decode_line(line.as_ref(), decs_factor) {
            Ok(Some(event)) => batch.events.push(event),
            Ok(None) => {}
            Err(error) => {
                warn!(line_index, %error, "malformed program log line");
                batch.failures.push(LineFailure { line_index, error });
            }
        }
    }
    batch
}

//! Typed decoders for program-owned account buffers.
//!
//! Each decoder is a pure function over a raw byte buffer fetched by the
//! caller's transport. Decoders that scale currency/token amounts take the
//! already-decoded root snapshot as explicit context; nothing here talks to
//! the network or holds state across calls.

pub mod client;
pub mod network;
pub mod root;
pub mod token;

pub use client::{ClientAccount, ClientInfo};
pub use network::NetworkRecord;
pub use root::{RootAccount, RootSnapshot};
pub use token::{TokenAccount, TokenSummary};

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::core::error::DecodeError;

/// Divisor converting raw on-chain integer amounts to human-scale decimals.
pub(crate) fn decimals_divisor(decs_factor: u32) -> Result<Decimal, DecodeError> {
    if decs_factor == 0 {
        return Err(DecodeError::InvalidValue {
            field: "base_crncy_decs_factor",
            reason: "decimals factor is zero",
        });
    }
    Ok(Decimal::from(decs_factor))
}

/// On-chain timestamps are whole seconds in a u32, which always fits chrono's
/// supported range.
pub(crate) fn timestamp_secs(secs: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(i64::from(secs), 0).expect("u32 seconds are in range")
}

pub(crate) fn decimal_from_f64(
    value: f64,
    field: &'static str,
) -> Result<Decimal, DecodeError> {
    Decimal::from_f64(value).ok_or(DecodeError::InvalidValue {
        field,
        reason: "not representable as a decimal",
    })
}

/// Decode an ordered batch of account buffers, preserving request order.
///
/// Batching transports return one optional buffer per requested address;
/// `None` entries (missing accounts) pass through untouched so the caller
/// can line results up with its request list regardless of how the
/// transport partitioned the batch.
pub fn decode_sequence<B, T, F>(
    buffers: &[Option<B>],
    mut decode: F,
) -> Vec<Option<Result<T, DecodeError>>>
where
    B: AsRef<[u8]>,
    F: FnMut(&[u8]) -> Result<T, DecodeError>,
{
    buffers
        .iter()
        .map(|entry| entry.as_ref().map(|bytes| decode(bytes.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_sequence_preserves_order_and_gaps() {
        let buffers = vec![
            Some(vec![1u8]),
            None,
            Some(vec![3u8]),
        ];
        let out = decode_sequence(&buffers, |bytes| Ok::<u8, DecodeError>(bytes[0]));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Some(Ok(1)));
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(Ok(3)));
    }
}

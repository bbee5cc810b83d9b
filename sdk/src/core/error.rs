//! SDK error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while reading or writing fixed-layout account buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field's byte range falls outside the supplied buffer.
    #[error("field `{field}` needs {need} bytes at offset {offset}, buffer has {len}")]
    OutOfBounds {
        field: &'static str,
        offset: usize,
        need: usize,
        len: usize,
    },

    /// The leading account tag does not identify the expected account kind.
    #[error("account tag mismatch: expected {expected}, found {found}")]
    TagMismatch { expected: u32, found: u32 },

    /// A field decoded successfully but holds a value the record cannot carry.
    #[error("field `{field}` is invalid: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    /// The root network table claims more records than the account allows.
    #[error("network table holds {count} records, at most {max} allowed")]
    NetworkTableOverflow { count: u32, max: u32 },
}

/// Errors raised by the bonding-curve engine and network-id resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The curve is only defined for `0 <= supply < max_supply`.
    #[error("supply {supply} outside the curve domain [0, {max_supply})")]
    SupplyOutOfRange {
        supply: Decimal,
        max_supply: Decimal,
    },

    /// A burn cannot remove more tokens than exist.
    #[error("amount {amount} exceeds current supply {supply}")]
    AmountExceedsSupply { amount: Decimal, supply: Decimal },

    /// Trade amounts are non-negative by definition.
    #[error("negative amount {0}")]
    NegativeAmount(Decimal),

    /// A record referenced a network id missing from the root table.
    #[error("network id {id} is not present in the root table ({count} networks)")]
    UnknownNetwork { id: u32, count: usize },
}

/// Errors raised when a program log line matches a known prefix but its
/// fields cannot be decoded. Lines matching no prefix are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event field {index} missing, line carries {available} fields")]
    MissingField { index: usize, available: usize },

    #[error("event field {index} is not valid base64: {reason}")]
    Base64 { index: usize, reason: String },

    #[error("event field {index} too short: need {need} bytes, got {got}")]
    FieldTooShort {
        index: usize,
        need: usize,
        got: usize,
    },

    #[error("program data line carries no fields")]
    Empty,

    #[error("decimals factor is zero")]
    ZeroDecimals,
}

/// Top-level SDK error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("event error: {0}")]
    Event(#[from] EventError),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

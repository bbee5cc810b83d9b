//! Client SDK for the Hype bonding-curve protocol on Solana.
//!
//! Mirrors the program's external contract on the client side:
//! - fixed-layout decoders for the root, token, and client accounts
//! - a decoder for program-emitted log events
//! - the deterministic bonding-curve pricing and fee arithmetic
//! - encoders for the mint, burn, and create instruction payloads, with
//!   the program-derived addresses they reference
//!
//! Everything is pure and synchronous; fetching buffers, subscribing to
//! logs, and submitting transactions belong to the caller's transport.

pub mod accounts;
pub mod config;
pub mod core;
pub mod curve;
pub mod events;
pub mod history;
pub mod instructions;
pub mod protocol;
pub mod stream;

pub use accounts::{
    ClientAccount, ClientInfo, NetworkRecord, RootAccount, RootSnapshot, TokenAccount,
    TokenSummary,
};
pub use config::{program_id, SdkContext, DEFAULT_RPC_URL, PROGRAM_ID, PROTOCOL_VERSION};
pub use crate::core::error::{DecodeError, DomainError, EventError, SdkError, SdkResult};
pub use curve::{quote_burn, quote_mint, BurnQuote, CurveParams, MintQuote};
pub use events::{decode_line, decode_logs, LogBatch, ProgramEvent, TradeEvent, TradeSide};
pub use history::{latest_trade, TransactionHistoryItem};
pub use instructions::{
    burn_instruction, create_instruction, mint_instruction, CreateTokenInstruction, TradeArgs,
};
pub use stream::{parse_transactions, ParsedTransaction, TransactionKind};

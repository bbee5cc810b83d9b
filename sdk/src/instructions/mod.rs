//! Outbound instruction encoding.
//!
//! Builders consume typed records plus an explicit [`SdkContext`] and
//! produce a ready [`solana_sdk::instruction::Instruction`]: payload bytes
//! plus the ordered account list the program expects. Nothing here signs
//! or submits.

pub mod builder;
pub mod burn;
pub mod create;
pub mod mint;
mod payload;

pub use builder::HypeInstructionBuilder;
pub use burn::burn_instruction;
pub use create::{create_instruction, CreateTokenInstruction};
pub use mint::mint_instruction;
pub use payload::{BURN_PAYLOAD_LEN, MINT_PAYLOAD_LEN};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use spl_associated_token_account::{
    get_associated_token_address, get_associated_token_address_with_program_id,
};

use crate::accounts::{ClientInfo, RootSnapshot};
use crate::config::SdkContext;
use crate::core::error::{SdkError, SdkResult};
use crate::events::TradeSide;
use crate::protocol::pda;

/// Caller intent for a trade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TradeArgs {
    /// Token amount to mint or burn, in human units
    pub amount: Decimal,
    /// Worst-case slippage tolerance in percent; `None` or zero encodes no
    /// bound
    pub slippage_percent: Option<Decimal>,
}

/// Scale a human-unit amount to on-chain base units, truncating: the
/// program compares integers, rounding up could overshoot the caller's
/// balance.
pub(crate) fn scale_to_base_units(value: Decimal, decs_factor: u32) -> SdkResult<i64> {
    (value * Decimal::from(decs_factor))
        .trunc()
        .to_i64()
        .ok_or_else(|| {
            SdkError::InvalidParameters(format!("amount {value} does not fit into 64 bits"))
        })
}

/// Slippage bound for a quote total, scaled to base units.
pub(crate) fn slippage_limit(
    quote_total: Decimal,
    percent: Decimal,
    side: TradeSide,
    decs_factor: u32,
) -> SdkResult<i64> {
    let factor = match side {
        TradeSide::Mint => Decimal::ONE + percent / Decimal::ONE_HUNDRED,
        TradeSide::Burn => Decimal::ONE - percent / Decimal::ONE_HUNDRED,
    };
    scale_to_base_units(quote_total * factor, decs_factor)
}

/// Resolve the referrer account pair. A referrer equal to the system
/// program placeholder means "no referrer" and is passed through verbatim
/// instead of being resolved to a token account.
pub(crate) fn referrer_accounts(root: &RootSnapshot, ref_wallet: &Pubkey) -> (Pubkey, Pubkey) {
    if *ref_wallet == system_program::id() {
        (*ref_wallet, *ref_wallet)
    } else {
        (
            *ref_wallet,
            get_associated_token_address_with_program_id(
                ref_wallet,
                &root.base_crncy_mint,
                &spl_token::id(),
            ),
        )
    }
}

/// Assemble the account list shared by mint, burn, and create. For create,
/// the token mint and token program record are fresh signing keys.
pub(crate) fn trade_builder(
    ctx: &SdkContext,
    client: &ClientInfo,
    network_id: u32,
    address: &str,
    token_mint: Pubkey,
    token_program: Pubkey,
    token_accounts_sign: bool,
) -> HypeInstructionBuilder {
    let root = &ctx.root;
    let authority = pda::find_authority_address(&ctx.program_id);
    let client_account = pda::find_client_address(&ctx.program_id, &client.wallet, ctx.version);
    let token_account = pda::find_token_address(&ctx.program_id, network_id, address, ctx.version);
    let payer_base_ata = get_associated_token_address(&client.wallet, &root.base_crncy_mint);
    let payer_token_ata = get_associated_token_address_with_program_id(
        &client.wallet,
        &token_mint,
        &spl_token_2022::id(),
    );
    let (ref_wallet, ref_account) = referrer_accounts(root, &client.ref_wallet);

    let builder = HypeInstructionBuilder::new()
        .add_signer(client.wallet)
        .add_writable(root.address)
        .add_writable(client_account)
        .add_writable(payer_base_ata)
        .add_writable(payer_token_ata)
        .add_writable(token_account)
        .add_readonly(root.base_crncy_mint)
        .add_writable(root.base_crncy_program_address);
    let builder = if token_accounts_sign {
        builder.add_signer(token_mint).add_signer(token_program)
    } else {
        builder.add_writable(token_mint).add_writable(token_program)
    };
    builder
        .add_readonly(authority)
        .add_readonly(spl_token::id())
        .add_readonly(spl_token_2022::id())
        .add_readonly(system_program::id())
        .add_readonly(spl_associated_token_account::id())
        .add_readonly(ref_wallet)
        .add_writable(ref_account)
}

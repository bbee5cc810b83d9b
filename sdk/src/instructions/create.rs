//! Token creation instruction encoding.
//!
//! Creation is a first mint: the payload reuses the mint layout, and the
//! token mint plus the token program record are brand-new keypairs that
//! must co-sign the transaction.

use rust_decimal::Decimal;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::{Keypair, Signer};

use crate::accounts::ClientInfo;
use crate::config::SdkContext;
use crate::core::error::SdkResult;
use crate::curve::{self, CurveParams};
use crate::events::TradeSide;
use crate::instructions::{
    payload, scale_to_base_units, slippage_limit, trade_builder, TradeArgs,
};

/// A create instruction plus the fresh keypairs that must sign alongside
/// the wallet.
pub struct CreateTokenInstruction {
    pub instruction: Instruction,
    pub signers: Vec<Keypair>,
}

/// Build a create-token instruction for `address` on network `network_id`,
/// minting `args.amount` tokens to the creator in the same transaction.
///
/// Pass `mint_keypair` to pin the new mint to a pre-generated (e.g.
/// vanity) address; otherwise a fresh one is drawn.
pub fn create_instruction(
    ctx: &SdkContext,
    network_id: u32,
    address: &str,
    client: &ClientInfo,
    args: &TradeArgs,
    mint_keypair: Option<Keypair>,
) -> SdkResult<CreateTokenInstruction> {
    let root = &ctx.root;
    let token_mint = mint_keypair.unwrap_or_else(Keypair::new);
    let token_program = Keypair::new();

    let scaled_amount = scale_to_base_units(args.amount, root.base_crncy_decs_factor)?;

    // A new token starts at zero supply, so the slippage bound quotes the
    // curve from its origin.
    let limit = match args.slippage_percent {
        Some(percent) if percent > Decimal::ZERO => {
            let quote = curve::quote_mint(Decimal::ZERO, args.amount, &CurveParams::from(root))?;
            Some(slippage_limit(
                quote.total,
                percent,
                TradeSide::Mint,
                root.base_crncy_decs_factor,
            )?)
        }
        _ => None,
    };

    let data = payload::encode_mint_payload(
        network_id,
        scaled_amount,
        limit,
        address,
        &client.nickname,
    )?;

    let instruction = trade_builder(
        ctx,
        client,
        network_id,
        address,
        token_mint.pubkey(),
        token_program.pubkey(),
        true,
    )
    .with_data(data)
    .build(ctx.program_id);

    Ok(CreateTokenInstruction {
        instruction,
        signers: vec![token_mint, token_program],
    })
}

//! Mint instruction encoding.

use rust_decimal::Decimal;
use solana_sdk::instruction::Instruction;

use crate::accounts::{ClientInfo, TokenSummary};
use crate::config::SdkContext;
use crate::core::error::SdkResult;
use crate::curve::{self, CurveParams};
use crate::events::TradeSide;
use crate::instructions::{
    payload, scale_to_base_units, slippage_limit, trade_builder, TradeArgs,
};

/// Build a mint instruction for an existing token.
///
/// With a positive slippage tolerance the payload carries a limit derived
/// from the same curve quote the program will recompute; the trade fails
/// on-chain instead of filling at a worse price.
pub fn mint_instruction(
    ctx: &SdkContext,
    token: &TokenSummary,
    client: &ClientInfo,
    args: &TradeArgs,
) -> SdkResult<Instruction> {
    let root = &ctx.root;
    let scaled_amount = scale_to_base_units(args.amount, root.base_crncy_decs_factor)?;

    let limit = match args.slippage_percent {
        Some(percent) if percent > Decimal::ZERO => {
            let quote = curve::quote_mint(token.supply, args.amount, &CurveParams::from(root))?;
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
        token.network_id,
        scaled_amount,
        limit,
        &token.address,
        &client.nickname,
    )?;

    Ok(trade_builder(
        ctx,
        client,
        token.network_id,
        &token.address,
        token.mint,
        token.token_program_id,
        false,
    )
    .with_data(data)
    .build(ctx.program_id))
}

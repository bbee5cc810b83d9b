//! Burn instruction encoding.

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

/// Build a burn instruction for an existing token.
pub fn burn_instruction(
    ctx: &SdkContext,
    token: &TokenSummary,
    client: &ClientInfo,
    args: &TradeArgs,
) -> SdkResult<Instruction> {
    let root = &ctx.root;
    let scaled_amount = scale_to_base_units(args.amount, root.base_crncy_decs_factor)?;

    let limit = match args.slippage_percent {
        Some(percent) if percent > Decimal::ZERO => {
            let quote = curve::quote_burn(token.supply, args.amount, &CurveParams::from(root))?;
            Some(slippage_limit(
                quote.total,
                percent,
                TradeSide::Burn,
                root.base_crncy_decs_factor,
            )?)
        }
        _ => None,
    };

    let data = payload::encode_burn_payload(
        token.network_id,
        scaled_amount,
        limit,
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

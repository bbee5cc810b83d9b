//! Bonding-curve arithmetic.
//!
//! All math runs on [`Decimal`] values; the results feed slippage limits
//! that the on-chain program compares against its own integer arithmetic,
//! so floating point is never used here. Mint and burn quotes are computed
//! as the difference of two reserve evaluations, matching the program's own
//! formulation; collapsing the difference into a closed form would change
//! rounding and produce limits the program rejects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::RootSnapshot;
use crate::core::error::DomainError;

/// Curve coefficients lifted out of the root account.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub max_supply: Decimal,
    pub init_price: Decimal,
    pub fee_rate: Decimal,
    pub min_fees: Decimal,
}

impl From<&RootSnapshot> for CurveParams {
    fn from(root: &RootSnapshot) -> Self {
        Self {
            max_supply: root.max_supply,
            init_price: root.init_price,
            fee_rate: root.fee_rate,
            min_fees: root.min_fees,
        }
    }
}

/// Cost breakdown of a mint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MintQuote {
    pub cost: Decimal,
    pub fees: Decimal,
    /// `cost + fees`, the amount the payer spends
    pub total: Decimal,
}

/// Payout breakdown of a burn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurnQuote {
    pub cashout: Decimal,
    pub fees: Decimal,
    /// `cashout - fees`, the amount the seller receives
    pub total: Decimal,
}

fn check_supply(supply: Decimal, params: &CurveParams) -> Result<(), DomainError> {
    // The reserve denominator is max_supply - supply; the curve is only
    // defined strictly below max_supply.
    if supply < Decimal::ZERO || supply >= params.max_supply {
        return Err(DomainError::SupplyOutOfRange {
            supply,
            max_supply: params.max_supply,
        });
    }
    Ok(())
}

fn check_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::NegativeAmount(amount));
    }
    Ok(())
}

/// Base-currency backing of the curve at `supply`:
/// `max_supply * supply * init_price / (max_supply - supply)`.
pub fn reserve(supply: Decimal, params: &CurveParams) -> Result<Decimal, DomainError> {
    check_supply(supply, params)?;
    Ok(params.max_supply * supply * params.init_price / (params.max_supply - supply))
}

/// Spot price at `supply`. Pass a previously computed reserve to reuse it;
/// the result is then bit-identical with the paired reserve computation.
pub fn price(
    supply: Decimal,
    params: &CurveParams,
    reserve_hint: Option<Decimal>,
) -> Result<Decimal, DomainError> {
    let reserve_value = match reserve_hint {
        Some(value) => {
            check_supply(supply, params)?;
            value
        }
        None => reserve(supply, params)?,
    };
    Ok((reserve_value + params.max_supply * params.init_price) / (params.max_supply - supply))
}

/// Quote minting `amount` tokens on top of `supply`.
pub fn quote_mint(
    supply: Decimal,
    amount: Decimal,
    params: &CurveParams,
) -> Result<MintQuote, DomainError> {
    check_amount(amount)?;
    let r1 = reserve(supply, params)?;
    let r2 = reserve(supply + amount, params)?;
    let cost = r2 - r1;
    let fees = (cost * params.fee_rate).max(params.min_fees);
    Ok(MintQuote {
        cost,
        fees,
        total: cost + fees,
    })
}

/// Quote burning `amount` tokens out of `supply`.
pub fn quote_burn(
    supply: Decimal,
    amount: Decimal,
    params: &CurveParams,
) -> Result<BurnQuote, DomainError> {
    check_amount(amount)?;
    if amount > supply {
        return Err(DomainError::AmountExceedsSupply { amount, supply });
    }
    let r1 = reserve(supply, params)?;
    let r2 = reserve(supply - amount, params)?;
    let cashout = r1 - r2;
    let fees = (cashout * params.fee_rate).max(params.min_fees);
    Ok(BurnQuote {
        cashout,
        fees,
        total: cashout - fees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CurveParams {
        CurveParams {
            max_supply: Decimal::from(1_000_000),
            init_price: Decimal::new(1, 4),
            fee_rate: Decimal::new(1, 2),
            min_fees: Decimal::new(1, 2),
        }
    }

    #[test]
    fn price_at_zero_supply_is_init_price() {
        let p = price(Decimal::ZERO, &params(), None).unwrap();
        assert_eq!(p, Decimal::new(1, 4));
    }

    #[test]
    fn reserve_at_zero_supply_is_zero() {
        assert_eq!(reserve(Decimal::ZERO, &params()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn price_is_strictly_increasing_in_supply() {
        let params = params();
        let mut last = price(Decimal::ZERO, &params, None).unwrap();
        for supply in [1u32, 10, 1_000, 100_000, 500_000, 900_000, 999_999] {
            let next = price(Decimal::from(supply), &params, None).unwrap();
            assert!(next > last, "price not increasing at supply {supply}");
            last = next;
        }
    }

    #[test]
    fn price_reuses_supplied_reserve() {
        let params = params();
        let supply = Decimal::from(12_345);
        let r = reserve(supply, &params).unwrap();
        let with_hint = price(supply, &params, Some(r)).unwrap();
        let without = price(supply, &params, None).unwrap();
        assert_eq!(with_hint, without);
    }

    #[test]
    fn reserve_at_max_supply_is_a_domain_error() {
        let params = params();
        assert!(matches!(
            reserve(params.max_supply, &params),
            Err(DomainError::SupplyOutOfRange { .. })
        ));
        assert!(matches!(
            reserve(Decimal::from(2_000_000), &params),
            Err(DomainError::SupplyOutOfRange { .. })
        ));
        assert!(matches!(
            reserve(Decimal::from(-1), &params),
            Err(DomainError::SupplyOutOfRange { .. })
        ));
    }

    #[test]
    fn mint_then_burn_never_pays_out_more_than_cost() {
        let params = params();
        let supply = Decimal::from(100);
        let amount = Decimal::from(5);
        let mint = quote_mint(supply, amount, &params).unwrap();
        let burn = quote_burn(supply + amount, amount, &params).unwrap();
        assert!(burn.cashout <= mint.cost);
        assert!(burn.total < mint.total);
    }

    #[test]
    fn fee_floor_applies_exactly() {
        let params = params();
        // Tiny trade: proportional fee is far below the floor.
        let mint = quote_mint(Decimal::ZERO, Decimal::ONE, &params).unwrap();
        assert!(mint.cost * params.fee_rate < params.min_fees);
        assert_eq!(mint.fees, params.min_fees);

        // Large trade: proportional fee dominates.
        let mint = quote_mint(Decimal::ZERO, Decimal::from(500_000), &params).unwrap();
        assert_eq!(mint.fees, mint.cost * params.fee_rate);
    }

    #[test]
    fn burn_rejects_amount_above_supply() {
        let params = params();
        assert!(matches!(
            quote_burn(Decimal::from(10), Decimal::from(11), &params),
            Err(DomainError::AmountExceedsSupply { .. })
        ));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let params = params();
        assert!(matches!(
            quote_mint(Decimal::from(10), Decimal::from(-1), &params),
            Err(DomainError::NegativeAmount(_))
        ));
    }

    #[test]
    fn mint_to_the_cap_is_a_domain_error() {
        let params = params();
        assert!(matches!(
            quote_mint(Decimal::from(999_999), Decimal::ONE, &params),
            Err(DomainError::SupplyOutOfRange { .. })
        ));
    }
}

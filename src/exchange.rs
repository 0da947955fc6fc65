//! Currency conversion for import costing
//!
//! Two USD -> BRL rates are in play and must not be mixed up:
//! - [`BaseRate`]: the spot rate; customs value, import duty and ICMS use it.
//! - [`EffectiveRate`]: spot loaded with bank spread and IOF; this is what
//!   the buyer actually pays for USD-denominated goods and freight.
//!
//! All conversions use checked arithmetic and report overflow as
//! [`CalculationError::DegenerateInput`].

use rust_decimal::Decimal;

use crate::error::{CalculationError, OrOverflow};
use crate::models::Currency;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Spot USD -> BRL rate used for customs and tax bases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseRate(pub Decimal);

/// USD -> BRL rate including spread and IOF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveRate(pub Decimal);

impl BaseRate {
    /// Load the spot rate with spread then IOF (multiplicative, not additive)
    pub fn effective(
        self,
        spread_percent: Decimal,
        iof_percent: Decimal,
    ) -> Result<EffectiveRate, CalculationError> {
        let spread = Decimal::ONE
            .checked_add(spread_percent / HUNDRED)
            .or_overflow("spread")?;
        let iof = Decimal::ONE
            .checked_add(iof_percent / HUNDRED)
            .or_overflow("IOF")?;
        self.0
            .checked_mul(spread)
            .and_then(|rate| rate.checked_mul(iof))
            .map(EffectiveRate)
            .or_overflow("effective exchange rate")
    }

    /// Convert a value to USD for customs purposes
    ///
    /// Caller guarantees the rate is positive.
    pub fn to_usd(self, value: Decimal, currency: Currency) -> Result<Decimal, CalculationError> {
        match currency {
            Currency::Usd => Ok(value),
            Currency::Brl => value.checked_div(self.0).or_overflow("USD conversion"),
        }
    }

    pub fn usd_to_brl(self, usd: Decimal) -> Result<Decimal, CalculationError> {
        usd.checked_mul(self.0).or_overflow("BRL conversion")
    }
}

impl EffectiveRate {
    /// Cash actually spent in BRL; BRL amounts carry no FX markup
    pub fn cash_brl(self, value: Decimal, currency: Currency) -> Result<Decimal, CalculationError> {
        match currency {
            Currency::Usd => value.checked_mul(self.0).or_overflow("cash cost"),
            Currency::Brl => Ok(value),
        }
    }
}

//! Tax owed on the sale itself, by regime.

use rust_decimal::Decimal;

use crate::error::{CalculationError, OrOverflow};
use crate::models::TaxRegime;

/// Marginal output tax as a fraction of the sale price.
///
/// MEI pays a fixed monthly DAS, so the marginal cost of a sale is zero.
/// Lucro Presumido is not modeled and also yields zero.
pub fn output_tax_rate(regime: TaxRegime, simples_nacional_percent: Decimal) -> Decimal {
    match regime {
        TaxRegime::SimplesNacional => simples_nacional_percent / Decimal::ONE_HUNDRED,
        TaxRegime::Mei | TaxRegime::LucroPresumido => Decimal::ZERO,
    }
}

pub fn output_tax(
    regime: TaxRegime,
    simples_nacional_percent: Decimal,
    sale_price_brl: Decimal,
) -> Result<Decimal, CalculationError> {
    sale_price_brl
        .checked_mul(output_tax_rate(regime, simples_nacional_percent))
        .or_overflow("output tax")
}

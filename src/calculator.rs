//! Landed-cost calculator
//!
//! Turns a [`CalculationInput`] into a [`CalculationResult`] in eight stages:
//! effective exchange rate, customs value, import duty, ICMS, landed cost,
//! marketplace fees, output tax and the final aggregation. The calculation
//! is a pure function of its input; the [`Calculator`] only carries the fee
//! schedule it quotes marketplace costs from.
//!
//! Divisions that would be undefined (zero quantity, zero sale price, zero
//! landed cost, commission + tax rates reaching 100%) are reported as
//! [`CalculationError::DegenerateInput`] instead of producing NaN/infinity.
//! Every stage uses checked arithmetic, so amounts that leave the `Decimal`
//! range fail the same way rather than panicking.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CalculationError, OrOverflow};
use crate::exchange::BaseRate;
use crate::marketplace::FeeSchedule;
use crate::models::{CalculationInput, CalculationResult};
use crate::tax;

/// Stateless calculator bound to a fee schedule
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    fees: FeeSchedule,
}

/// Outcome of re-pricing an input at its own break-even price
#[derive(Debug, Clone, PartialEq)]
pub struct BreakEvenCheck {
    pub break_even_price: Decimal,
    /// Result recomputed with `salePriceBRL = break_even_price`
    pub at_break_even: CalculationResult,
}

/// Calculate with the default fee schedule
pub fn calculate_landed_cost(
    input: &CalculationInput,
) -> Result<CalculationResult, CalculationError> {
    Calculator::default().calculate(input)
}

impl Calculator {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, CalculationError> {
        validate(input)?;

        let hundred = Decimal::ONE_HUNDRED;
        let quantity = Decimal::from(input.quantity);

        // 1. Exchange rates
        let base_rate = BaseRate(input.exchange_rate);
        let effective_rate = base_rate.effective(input.spread_percent, input.iof_percent)?;

        // 2. Customs value (freight is a shipment total, not per unit)
        let product_cost_usd = base_rate.to_usd(input.product_cost_value, input.product_currency)?;
        let freight_cost_usd = base_rate.to_usd(input.freight_value, input.freight_currency)?;
        let customs_value_usd = product_cost_usd
            .checked_mul(quantity)
            .and_then(|goods| goods.checked_add(freight_cost_usd))
            .or_overflow("customs value")?;

        // 3. Import duty, converted at the base rate
        let import_duty_brl = base_rate.usd_to_brl(tax::import_duty_usd(customs_value_usd)?)?;

        // 4. ICMS gross-up over the base-rate customs value
        let customs_value_brl = base_rate.usd_to_brl(customs_value_usd)?;
        let icms = tax::icms_gross_up(customs_value_brl, import_duty_brl, input.icms_rate)?;

        debug!(
            sku = %input.label(),
            customs_value_usd = %customs_value_usd,
            import_duty_brl = %import_duty_brl,
            icms_base = %icms.base,
            icms_tax = %icms.tax,
            "import taxes assessed"
        );

        // 5. Landed cost at the effective rate
        let product_cost_total = input
            .product_cost_value
            .checked_mul(quantity)
            .or_overflow("product cost")?;
        let total_product_cost_brl =
            effective_rate.cash_brl(product_cost_total, input.product_currency)?;
        let total_freight_cost_brl =
            effective_rate.cash_brl(input.freight_value, input.freight_currency)?;
        let landed_cost_total = [
            total_freight_cost_brl,
            import_duty_brl,
            icms.tax,
            input.extra_expenses,
        ]
        .into_iter()
        .try_fold(total_product_cost_brl, |sum, part| sum.checked_add(part))
        .or_overflow("landed cost")?;
        let landed_cost_unit = landed_cost_total / quantity;

        // 6. Marketplace fees
        let fees = self.fees.quote(
            input.marketplace,
            input.announcement_type,
            input.sale_price_brl,
        )?;

        // 7. Output tax
        let output_tax_rate = tax::output_tax_rate(input.tax_regime, input.simples_nacional_rate);
        let output_tax = tax::output_tax(
            input.tax_regime,
            input.simples_nacional_rate,
            input.sale_price_brl,
        )?;

        // 8. Aggregation
        let selling_costs = fees
            .commission
            .checked_add(fees.flat_costs())
            .and_then(|costs| costs.checked_add(output_tax))
            .or_overflow("selling costs")?;
        let net_profit = input
            .sale_price_brl
            .checked_sub(landed_cost_unit)
            .and_then(|profit| profit.checked_sub(selling_costs))
            .or_overflow("net profit")?;
        let total_cost_unit = landed_cost_unit
            .checked_add(selling_costs)
            .or_overflow("total unit cost")?;

        if input.sale_price_brl.is_zero() {
            return Err(CalculationError::DegenerateInput(
                "salePriceBRL is zero, net margin is undefined".to_string(),
            ));
        }
        if landed_cost_unit.is_zero() {
            return Err(CalculationError::DegenerateInput(
                "landed unit cost is zero, ROI is undefined".to_string(),
            ));
        }
        let break_even_denominator = Decimal::ONE - fees.commission_rate - output_tax_rate;
        if break_even_denominator <= Decimal::ZERO {
            return Err(CalculationError::DegenerateInput(format!(
                "commission ({}) plus output tax ({}) reach 100%, no break-even price exists",
                fees.commission_rate, output_tax_rate
            )));
        }

        let net_margin = net_profit
            .checked_div(input.sale_price_brl)
            .and_then(|ratio| ratio.checked_mul(hundred))
            .or_overflow("net margin")?;
        let roi = net_profit
            .checked_div(landed_cost_unit)
            .and_then(|ratio| ratio.checked_mul(hundred))
            .or_overflow("ROI")?;
        let break_even_price = landed_cost_unit
            .checked_add(fees.flat_costs())
            .and_then(|fixed| fixed.checked_div(break_even_denominator))
            .or_overflow("break-even price")?;

        debug!(
            sku = %input.label(),
            landed_cost_unit = %landed_cost_unit,
            selling_costs = %selling_costs,
            net_profit = %net_profit,
            break_even_price = %break_even_price,
            "unit economics computed"
        );

        Ok(CalculationResult {
            effective_exchange_rate: effective_rate.0,
            total_product_cost_brl,
            total_freight_cost_brl,
            customs_value_usd,
            import_tax: import_duty_brl,
            icms_tax: icms.tax,
            landed_cost_unit,
            landed_cost_total,
            marketplace_commission: fees.commission,
            marketplace_fixed_fee: fees.fixed_fee,
            marketplace_shipping_support: fees.shipping_support,
            output_tax,
            total_cost_unit,
            net_profit,
            net_margin,
            roi,
            break_even_price,
        })
    }

    /// Compute the break-even price and re-run the calculation at it.
    ///
    /// The closed form assumes the fee tier of the original price; when the
    /// break-even price crosses a tier (Mercado Livre threshold, Shopee cap)
    /// the recomputed profit will not be zero, which is what callers use
    /// this to detect.
    pub fn break_even_check(
        &self,
        input: &CalculationInput,
    ) -> Result<BreakEvenCheck, CalculationError> {
        let result = self.calculate(input)?;
        let repriced = CalculationInput {
            sale_price_brl: result.break_even_price,
            ..input.clone()
        };
        let at_break_even = self.calculate(&repriced)?;

        Ok(BreakEvenCheck {
            break_even_price: result.break_even_price,
            at_break_even,
        })
    }
}

/// Reject inputs outside the calculator's numeric domain
pub fn validate(input: &CalculationInput) -> Result<(), CalculationError> {
    if input.quantity == 0 {
        return Err(CalculationError::DegenerateInput(
            "quantity is zero, landed unit cost is undefined".to_string(),
        ));
    }
    if input.exchange_rate <= Decimal::ZERO {
        return Err(CalculationError::invalid(
            "exchangeRate",
            format!("must be > 0, got {}", input.exchange_rate),
        ));
    }

    let non_negative = [
        ("productCostValue", input.product_cost_value),
        ("freightValue", input.freight_value),
        ("extraExpenses", input.extra_expenses),
        ("spreadPercent", input.spread_percent),
        ("iofPercent", input.iof_percent),
        ("simplesNacionalRate", input.simples_nacional_rate),
        ("salePriceBRL", input.sale_price_brl),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(CalculationError::non_negative(field, value));
        }
    }

    if input.icms_rate < Decimal::ZERO || input.icms_rate >= Decimal::ONE_HUNDRED {
        return Err(CalculationError::invalid(
            "icmsRate",
            format!("must be in [0, 100), got {}", input.icms_rate),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnouncementType, Currency, Marketplace, TaxRegime};
    use rust_decimal_macros::dec;

    fn reference_input() -> CalculationInput {
        CalculationInput {
            product_cost_value: dec!(10),
            product_currency: Currency::Usd,
            quantity: 10,
            freight_value: dec!(20),
            freight_currency: Currency::Usd,
            extra_expenses: Decimal::ZERO,
            exchange_rate: dec!(5.0),
            spread_percent: Decimal::ZERO,
            iof_percent: Decimal::ZERO,
            icms_rate: dec!(17),
            tax_regime: TaxRegime::Mei,
            simples_nacional_rate: Decimal::ZERO,
            sale_price_brl: dec!(50),
            marketplace: Marketplace::Shopee,
            announcement_type: AnnouncementType::SemFreteGratis,
            ..CalculationInput::default()
        }
    }

    #[test]
    fn test_reference_scenario() {
        let r = calculate_landed_cost(&reference_input()).unwrap();

        assert_eq!(r.customs_value_usd, dec!(120));
        assert_eq!(r.import_tax, dec!(260));
        assert_eq!(r.icms_tax.round_dp(2), dec!(176.14));
        assert_eq!(r.total_product_cost_brl, dec!(500));
        assert_eq!(r.total_freight_cost_brl, dec!(100));
        assert_eq!(r.landed_cost_total.round_dp(2), dec!(1036.14));
        assert_eq!(r.landed_cost_unit.round_dp(2), dec!(103.61));
        assert_eq!(r.marketplace_fixed_fee, dec!(4));
        assert_eq!(r.marketplace_commission, dec!(7));
        assert_eq!(r.output_tax, Decimal::ZERO);
        assert_eq!(r.net_profit.round_dp(2), dec!(-64.61));
        assert!(r.net_profit < Decimal::ZERO);
    }

    #[test]
    fn test_extra_expenses_added_in_brl() {
        let base = calculate_landed_cost(&reference_input()).unwrap();
        let with_extra = calculate_landed_cost(&CalculationInput {
            extra_expenses: dec!(150),
            ..reference_input()
        })
        .unwrap();

        assert_eq!(with_extra.landed_cost_total - base.landed_cost_total, dec!(150));
        assert_eq!(with_extra.import_tax, base.import_tax);
        assert_eq!(with_extra.icms_tax, base.icms_tax);
    }

    #[test]
    fn test_spread_only_affects_cash_costs() {
        let base = calculate_landed_cost(&reference_input()).unwrap();
        let loaded = calculate_landed_cost(&CalculationInput {
            spread_percent: dec!(4),
            iof_percent: dec!(3.5),
            ..reference_input()
        })
        .unwrap();

        assert_eq!(loaded.effective_exchange_rate, dec!(5.382));
        // Taxes use the base rate
        assert_eq!(loaded.import_tax, base.import_tax);
        assert_eq!(loaded.icms_tax, base.icms_tax);
        assert_eq!(loaded.customs_value_usd, base.customs_value_usd);
        // Cash outflow uses the effective rate
        assert_eq!(loaded.total_product_cost_brl, dec!(538.2));
        assert_eq!(loaded.total_freight_cost_brl, dec!(107.64));
    }

    #[test]
    fn test_brl_costs_skip_fx_markup() {
        let input = CalculationInput {
            product_cost_value: dec!(50),
            product_currency: Currency::Brl,
            freight_value: dec!(100),
            freight_currency: Currency::Brl,
            spread_percent: dec!(5),
            ..reference_input()
        };
        let r = calculate_landed_cost(&input).unwrap();

        assert_eq!(r.total_product_cost_brl, dec!(500));
        assert_eq!(r.total_freight_cost_brl, dec!(100));
        // 50 BRL / 5 = 10 USD per unit, 100 BRL / 5 = 20 USD freight
        assert_eq!(r.customs_value_usd, dec!(120));
    }

    #[test]
    fn test_simples_nacional_output_tax() {
        let input = CalculationInput {
            tax_regime: TaxRegime::SimplesNacional,
            simples_nacional_rate: dec!(4),
            sale_price_brl: dec!(200),
            ..reference_input()
        };
        let r = calculate_landed_cost(&input).unwrap();
        assert_eq!(r.output_tax, dec!(8));
    }

    #[test]
    fn test_result_reconciles() {
        let r = calculate_landed_cost(&reference_input()).unwrap();
        assert_eq!(r.net_profit, dec!(50) - r.landed_cost_unit - r.selling_costs());
        assert_eq!(r.total_cost_unit, r.landed_cost_unit + r.selling_costs());
    }

    #[test]
    fn test_zero_quantity_is_degenerate() {
        let err = calculate_landed_cost(&CalculationInput {
            quantity: 0,
            ..reference_input()
        })
        .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(_)));
    }

    #[test]
    fn test_zero_sale_price_is_degenerate() {
        let err = calculate_landed_cost(&CalculationInput {
            sale_price_brl: Decimal::ZERO,
            ..reference_input()
        })
        .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(ref m) if m.contains("salePriceBRL")));
    }

    #[test]
    fn test_zero_landed_cost_is_degenerate() {
        let err = calculate_landed_cost(&CalculationInput {
            product_cost_value: Decimal::ZERO,
            freight_value: Decimal::ZERO,
            ..reference_input()
        })
        .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(ref m) if m.contains("ROI")));
    }

    #[test]
    fn test_rates_reaching_100_percent_have_no_break_even() {
        let err = calculate_landed_cost(&CalculationInput {
            tax_regime: TaxRegime::SimplesNacional,
            simples_nacional_rate: dec!(86),
            ..reference_input()
        })
        .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(ref m) if m.contains("break-even")));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let cases = [
            CalculationInput {
                exchange_rate: Decimal::ZERO,
                ..reference_input()
            },
            CalculationInput {
                freight_value: dec!(-1),
                ..reference_input()
            },
            CalculationInput {
                icms_rate: dec!(100),
                ..reference_input()
            },
        ];
        for input in cases {
            assert!(matches!(
                calculate_landed_cost(&input),
                Err(CalculationError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_oversized_shipment_overflow_is_an_error() {
        let err = calculate_landed_cost(&CalculationInput {
            product_cost_value: dec!(100000000000000000000),
            quantity: 1_000_000_000,
            ..reference_input()
        })
        .unwrap_err();
        assert_eq!(
            err,
            CalculationError::DegenerateInput("customs value overflows decimal range".to_string())
        );
    }

    #[test]
    fn test_extreme_ratio_overflow_is_an_error() {
        // A one-centavo sale against a huge landed cost overflows the margin
        let err = calculate_landed_cost(&CalculationInput {
            product_cost_value: dec!(10000000000000000000000000),
            quantity: 1,
            sale_price_brl: dec!(0.01),
            ..reference_input()
        })
        .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(ref m) if m.contains("overflows")));
    }

    #[test]
    fn test_break_even_check_zeroes_profit() {
        let check = Calculator::default()
            .break_even_check(&reference_input())
            .unwrap();
        assert!(check.break_even_price > dec!(103));
        assert!(check.at_break_even.net_profit.abs() < dec!(0.0000000001));
    }
}

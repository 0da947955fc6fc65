//! Viability reading of a calculation result
//!
//! Classifies the outcome and splits the landed cost into the per-unit lines
//! shown to the seller (base cost, import taxes, marketplace, output tax).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CalculationInput, CalculationResult};

/// Net margins above this percentage count as healthy
pub const HEALTHY_MARGIN_PERCENT: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitHealth {
    /// Sale does not cover costs
    Loss,
    /// Profitable, margin at or below 15%
    Thin,
    Healthy,
}

impl ProfitHealth {
    pub fn classify(result: &CalculationResult) -> Self {
        if result.net_profit <= Decimal::ZERO {
            ProfitHealth::Loss
        } else if result.net_margin > HEALTHY_MARGIN_PERCENT {
            ProfitHealth::Healthy
        } else {
            ProfitHealth::Thin
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitHealth::Loss => "LOSS",
            ProfitHealth::Thin => "THIN",
            ProfitHealth::Healthy => "HEALTHY",
        }
    }
}

/// Per-unit cost composition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitBreakdown {
    /// Product + freight cash cost per unit
    pub base_cost_unit: Decimal,
    /// Import duty + ICMS per unit
    pub import_taxes_unit: Decimal,
    /// Extra BRL expenses per unit
    pub extra_expenses_unit: Decimal,
    pub landed_cost_unit: Decimal,
    pub commission: Decimal,
    pub fixed_and_shipping: Decimal,
    pub output_tax: Decimal,
}

impl UnitBreakdown {
    /// Quantity must be non-zero; any successful calculation guarantees it.
    pub fn from_result(input: &CalculationInput, result: &CalculationResult) -> Self {
        let quantity = Decimal::from(input.quantity.max(1));
        Self {
            base_cost_unit: (result.total_product_cost_brl + result.total_freight_cost_brl)
                / quantity,
            import_taxes_unit: (result.import_tax + result.icms_tax) / quantity,
            extra_expenses_unit: input.extra_expenses / quantity,
            landed_cost_unit: result.landed_cost_unit,
            commission: result.marketplace_commission,
            fixed_and_shipping: result.marketplace_fixed_fee + result.marketplace_shipping_support,
            output_tax: result.output_tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate_landed_cost;
    use crate::models::{AnnouncementType, Marketplace};
    use rust_decimal_macros::dec;

    fn input(sale_price: Decimal) -> CalculationInput {
        CalculationInput {
            product_cost_value: dec!(5),
            quantity: 20,
            freight_value: dec!(10),
            extra_expenses: dec!(40),
            exchange_rate: dec!(5),
            icms_rate: dec!(17),
            sale_price_brl: sale_price,
            marketplace: Marketplace::MercadoLivre,
            announcement_type: AnnouncementType::Classico,
            ..CalculationInput::default()
        }
    }

    #[test]
    fn test_classification_thresholds() {
        let loss = calculate_landed_cost(&input(dec!(30))).unwrap();
        assert_eq!(ProfitHealth::classify(&loss), ProfitHealth::Loss);

        let healthy = calculate_landed_cost(&input(dec!(78))).unwrap();
        assert!(healthy.net_margin > dec!(15));
        assert_eq!(ProfitHealth::classify(&healthy), ProfitHealth::Healthy);
    }

    #[test]
    fn test_thin_margin() {
        let mut result = calculate_landed_cost(&input(dec!(78))).unwrap();
        result.net_margin = dec!(15);
        assert_eq!(ProfitHealth::classify(&result), ProfitHealth::Thin);
    }

    #[test]
    fn test_breakdown_sums_to_landed_cost() {
        let input = input(dec!(60));
        let result = calculate_landed_cost(&input).unwrap();
        let b = UnitBreakdown::from_result(&input, &result);

        let sum = b.base_cost_unit + b.import_taxes_unit + b.extra_expenses_unit;
        assert!((sum - b.landed_cost_unit).abs() < dec!(0.0000000001));
        assert_eq!(b.extra_expenses_unit, dec!(2));
        assert_eq!(b.fixed_and_shipping, dec!(6.00));
    }
}

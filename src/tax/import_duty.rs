//! Federal import duty (Imposto de Importação) under Remessa Conforme.
//!
//! Duty is assessed per package on the total customs value in USD
//! (goods for the whole shipment plus freight).

use rust_decimal::Decimal;

use crate::error::{CalculationError, OrOverflow};

/// One row of the import duty table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyBracket {
    /// Inclusive upper bound in USD; `None` means unbounded
    pub up_to_usd: Option<Decimal>,
    /// Fraction of the customs value (0.20 = 20%)
    pub rate: Decimal,
    /// Flat USD deduction after applying the rate
    pub deduction_usd: Decimal,
}

/// Brackets ordered by upper bound; the last one is open-ended.
pub static IMPORT_DUTY_BRACKETS: [DutyBracket; 2] = [
    DutyBracket {
        up_to_usd: Some(Decimal::from_parts(50, 0, 0, false, 0)),
        rate: Decimal::from_parts(20, 0, 0, false, 2),
        deduction_usd: Decimal::ZERO,
    },
    DutyBracket {
        up_to_usd: None,
        rate: Decimal::from_parts(60, 0, 0, false, 2),
        deduction_usd: Decimal::from_parts(20, 0, 0, false, 0),
    },
];

/// Find the bracket that applies to a customs value
pub fn bracket_for(customs_value_usd: Decimal) -> &'static DutyBracket {
    IMPORT_DUTY_BRACKETS
        .iter()
        .find(|b| b.up_to_usd.map_or(true, |limit| customs_value_usd <= limit))
        .unwrap_or(&IMPORT_DUTY_BRACKETS[IMPORT_DUTY_BRACKETS.len() - 1])
}

/// Duty in USD, never negative
pub fn import_duty_usd(customs_value_usd: Decimal) -> Result<Decimal, CalculationError> {
    let bracket = bracket_for(customs_value_usd);
    let gross = customs_value_usd
        .checked_mul(bracket.rate)
        .or_overflow("import duty")?;
    Ok((gross - bracket.deduction_usd).max(Decimal::ZERO))
}

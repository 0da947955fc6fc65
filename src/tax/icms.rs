//! ICMS on imports, computed "por dentro" (the tax is part of its own base).

use rust_decimal::Decimal;

use crate::error::{CalculationError, OrOverflow};

/// ICMS base and amount in BRL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmsAssessment {
    pub base: Decimal,
    pub tax: Decimal,
}

/// Gross-up ICMS over customs value plus import duty.
///
/// `base = (customs + duty) / (1 - rate/100)`, `tax = base * rate/100`.
/// Rates must lie in `[0, 100)`.
pub fn icms_gross_up(
    customs_value_brl: Decimal,
    import_duty_brl: Decimal,
    icms_rate_percent: Decimal,
) -> Result<IcmsAssessment, CalculationError> {
    if icms_rate_percent < Decimal::ZERO || icms_rate_percent >= Decimal::ONE_HUNDRED {
        return Err(CalculationError::invalid(
            "icmsRate",
            format!("must be in [0, 100), got {}", icms_rate_percent),
        ));
    }

    let rate = icms_rate_percent / Decimal::ONE_HUNDRED;
    let base = customs_value_brl
        .checked_add(import_duty_brl)
        .and_then(|taxable| taxable.checked_div(Decimal::ONE - rate))
        .or_overflow("ICMS base")?;
    let tax = base.checked_mul(rate).or_overflow("ICMS")?;
    Ok(IcmsAssessment { base, tax })
}

/// Suggested ICMS rate for a destination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmsState {
    pub uf: &'static str,
    pub name: &'static str,
    pub rate: Decimal,
}

const fn pct(units: i64, scale: u32) -> Decimal {
    Decimal::from_parts(units as u32, 0, 0, false, scale)
}

const fn state(uf: &'static str, name: &'static str, rate: Decimal) -> IcmsState {
    IcmsState { uf, name, rate }
}

/// State presets; `PADRAO` is the national Remessa Conforme rate.
pub static ICMS_STATE_RATES: [IcmsState; 28] = [
    state("PADRAO", "Padrão Remessa Conforme", pct(17, 0)),
    state("AC", "Acre", pct(19, 0)),
    state("AL", "Alagoas", pct(19, 0)),
    state("AM", "Amazonas", pct(20, 0)),
    state("AP", "Amapá", pct(18, 0)),
    state("BA", "Bahia", pct(205, 1)),
    state("CE", "Ceará", pct(20, 0)),
    state("DF", "Distrito Federal", pct(20, 0)),
    state("ES", "Espírito Santo", pct(17, 0)),
    state("GO", "Goiás", pct(19, 0)),
    state("MA", "Maranhão", pct(22, 0)),
    state("MG", "Minas Gerais", pct(18, 0)),
    state("MS", "Mato Grosso do Sul", pct(17, 0)),
    state("MT", "Mato Grosso", pct(17, 0)),
    state("PA", "Pará", pct(19, 0)),
    state("PB", "Paraíba", pct(20, 0)),
    state("PE", "Pernambuco", pct(205, 1)),
    state("PI", "Piauí", pct(21, 0)),
    state("PR", "Paraná", pct(195, 1)),
    state("RJ", "Rio de Janeiro", pct(22, 0)),
    state("RN", "Rio Grande do Norte", pct(20, 0)),
    state("RO", "Rondônia", pct(175, 1)),
    state("RR", "Roraima", pct(20, 0)),
    state("RS", "Rio Grande do Sul", pct(17, 0)),
    state("SC", "Santa Catarina", pct(17, 0)),
    state("SE", "Sergipe", pct(19, 0)),
    state("SP", "São Paulo", pct(18, 0)),
    state("TO", "Tocantins", pct(20, 0)),
];

/// Look up the preset ICMS rate for a UF code (case-insensitive)
pub fn rate_for_state(uf: &str) -> Result<Decimal, CalculationError> {
    let wanted = uf.trim().to_ascii_uppercase();
    ICMS_STATE_RATES
        .iter()
        .find(|s| s.uf == wanted)
        .map(|s| s.rate)
        .ok_or(CalculationError::UnknownState(wanted))
}

//! Error handling for the landed-cost calculator
//!
//! The calculation core signals typed errors through [`CalculationError`];
//! the CLI layer wraps them in `anyhow` for context chaining.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AnnouncementType, Marketplace};

/// Core error types for landed-cost calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid listing: {announcement} is not offered by {marketplace}")]
    InvalidListing {
        marketplace: Marketplace,
        announcement: AnnouncementType,
    },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("unknown state: {0}")]
    UnknownState(String),
}

impl CalculationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalculationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Self {
        Self::invalid(field, format!("must be >= 0, got {}", value))
    }

    pub(crate) fn overflow(stage: &str) -> Self {
        CalculationError::DegenerateInput(format!("{} overflows decimal range", stage))
    }
}

/// Maps a `None` from `Decimal::checked_*` to an overflow error
pub(crate) trait OrOverflow<T> {
    fn or_overflow(self, stage: &str) -> Result<T, CalculationError>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, stage: &str) -> Result<T, CalculationError> {
        self.ok_or_else(|| CalculationError::overflow(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = CalculationError::DegenerateInput("quantity is zero".to_string());
        assert_eq!(err.to_string(), "degenerate input: quantity is zero");
    }

    #[test]
    fn test_invalid_input_names_field() {
        let err = CalculationError::non_negative("freightValue", dec!(-1));
        assert_eq!(err.to_string(), "invalid input: freightValue must be >= 0, got -1");
    }

    #[test]
    fn test_invalid_listing_names_both_sides() {
        let err = CalculationError::InvalidListing {
            marketplace: Marketplace::Shopee,
            announcement: AnnouncementType::Premium,
        };
        assert_eq!(
            err.to_string(),
            "invalid listing: PREMIUM is not offered by SHOPEE"
        );
    }

    #[test]
    fn test_overflow_names_stage() {
        let none: Option<Decimal> = None;
        assert_eq!(
            none.or_overflow("customs value").unwrap_err().to_string(),
            "degenerate input: customs value overflows decimal range"
        );
        assert_eq!(Some(dec!(1)).or_overflow("customs value"), Ok(dec!(1)));
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: anyhow::Result<()> = Err(CalculationError::UnknownState("XX".to_string()))
            .context("failed to apply state override");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to apply state override"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("unknown state: XX"));
            }
            Ok(_) => panic!("expected error"),
        }
    }
}

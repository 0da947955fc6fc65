//! Marketplace selling-cost schedule
//!
//! Fees are table-driven: each marketplace has a rule set and each
//! announcement type contributes a commission rate. The schedule is plain
//! data so a config file can override individual values (for instance the
//! Mercado Livre shipping estimate, which depends on weight and region).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, OrOverflow};
use crate::models::{AnnouncementType, Marketplace};

/// Mercado Livre rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MercadoLivreFees {
    /// Sale prices strictly below this pay the fixed fee; at or above it
    /// the seller subsidizes shipping instead
    pub free_shipping_threshold: Decimal,
    pub low_price_fixed_fee: Decimal,
    /// Flat estimate of the seller's share of free shipping
    pub shipping_support: Decimal,
    pub classico_rate: Decimal,
    pub premium_rate: Decimal,
}

impl Default for MercadoLivreFees {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(79, 0),
            low_price_fixed_fee: Decimal::new(600, 2),
            shipping_support: Decimal::new(2090, 2),
            classico_rate: Decimal::new(12, 2),
            premium_rate: Decimal::new(17, 2),
        }
    }
}

/// Shopee rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopeeFees {
    pub fixed_fee: Decimal,
    /// Maximum commission per item
    pub commission_cap: Decimal,
    pub standard_rate: Decimal,
    /// Standard rate plus the free-shipping program surcharge
    pub free_shipping_rate: Decimal,
}

impl Default for ShopeeFees {
    fn default() -> Self {
        Self {
            fixed_fee: Decimal::new(400, 2),
            commission_cap: Decimal::new(100, 0),
            standard_rate: Decimal::new(14, 2),
            free_shipping_rate: Decimal::new(20, 2),
        }
    }
}

/// Complete fee table for every supported marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeeSchedule {
    pub mercado_livre: MercadoLivreFees,
    pub shopee: ShopeeFees,
}

/// Per-unit selling costs charged by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplaceFees {
    pub commission_rate: Decimal,
    /// `min(sale_price * commission_rate, fee_cap)`
    pub commission: Decimal,
    pub fixed_fee: Decimal,
    pub shipping_support: Decimal,
    /// `None` when commission is uncapped
    pub fee_cap: Option<Decimal>,
}

impl MarketplaceFees {
    /// Fixed fee plus shipping support; the price-independent part
    pub fn flat_costs(&self) -> Decimal {
        self.fixed_fee + self.shipping_support
    }
}

impl FeeSchedule {
    /// Commission rate for a listing, or an error if the marketplace does
    /// not offer that announcement type
    pub fn commission_rate(
        &self,
        marketplace: Marketplace,
        announcement: AnnouncementType,
    ) -> Result<Decimal, CalculationError> {
        match (marketplace, announcement) {
            (Marketplace::MercadoLivre, AnnouncementType::Classico) => {
                Ok(self.mercado_livre.classico_rate)
            }
            (Marketplace::MercadoLivre, AnnouncementType::Premium) => {
                Ok(self.mercado_livre.premium_rate)
            }
            (Marketplace::Shopee, AnnouncementType::SemFreteGratis) => {
                Ok(self.shopee.standard_rate)
            }
            (Marketplace::Shopee, AnnouncementType::ComFreteGratis) => {
                Ok(self.shopee.free_shipping_rate)
            }
            (marketplace, announcement) => Err(CalculationError::InvalidListing {
                marketplace,
                announcement,
            }),
        }
    }

    /// Quote the selling costs for one unit at `sale_price_brl`
    pub fn quote(
        &self,
        marketplace: Marketplace,
        announcement: AnnouncementType,
        sale_price_brl: Decimal,
    ) -> Result<MarketplaceFees, CalculationError> {
        let commission_rate = self.commission_rate(marketplace, announcement)?;

        let (fixed_fee, shipping_support, fee_cap) = match marketplace {
            Marketplace::MercadoLivre => {
                let ml = &self.mercado_livre;
                if sale_price_brl < ml.free_shipping_threshold {
                    (ml.low_price_fixed_fee, Decimal::ZERO, None)
                } else {
                    (Decimal::ZERO, ml.shipping_support, None)
                }
            }
            Marketplace::Shopee => (
                self.shopee.fixed_fee,
                Decimal::ZERO,
                Some(self.shopee.commission_cap),
            ),
        };

        let raw_commission = sale_price_brl
            .checked_mul(commission_rate)
            .or_overflow("marketplace commission")?;
        let commission = match fee_cap {
            Some(cap) => raw_commission.min(cap),
            None => raw_commission,
        };

        Ok(MarketplaceFees {
            commission_rate,
            commission,
            fixed_fee,
            shipping_support,
            fee_cap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedule() -> FeeSchedule {
        FeeSchedule::default()
    }

    #[test]
    fn test_mercado_livre_below_threshold_pays_fixed_fee() {
        let fees = schedule()
            .quote(Marketplace::MercadoLivre, AnnouncementType::Classico, dec!(78.99))
            .unwrap();
        assert_eq!(fees.fixed_fee, dec!(6.00));
        assert_eq!(fees.shipping_support, Decimal::ZERO);
        assert_eq!(fees.commission_rate, dec!(0.12));
        assert_eq!(fees.fee_cap, None);
    }

    #[test]
    fn test_mercado_livre_at_threshold_pays_shipping() {
        let fees = schedule()
            .quote(Marketplace::MercadoLivre, AnnouncementType::Premium, dec!(79))
            .unwrap();
        assert_eq!(fees.fixed_fee, Decimal::ZERO);
        assert_eq!(fees.shipping_support, dec!(20.90));
        assert_eq!(fees.commission, dec!(13.43));
    }

    #[test]
    fn test_shopee_standard_listing() {
        let fees = schedule()
            .quote(Marketplace::Shopee, AnnouncementType::SemFreteGratis, dec!(50))
            .unwrap();
        assert_eq!(fees.fixed_fee, dec!(4.00));
        assert_eq!(fees.commission, dec!(7));
        assert_eq!(fees.flat_costs(), dec!(4.00));
    }

    #[test]
    fn test_shopee_commission_is_capped() {
        let fees = schedule()
            .quote(Marketplace::Shopee, AnnouncementType::ComFreteGratis, dec!(1000))
            .unwrap();
        assert_eq!(fees.commission_rate, dec!(0.20));
        assert_eq!(fees.commission, dec!(100));
        assert_eq!(fees.fee_cap, Some(dec!(100)));
    }

    #[test]
    fn test_mismatched_listing_is_rejected() {
        let err = schedule()
            .quote(Marketplace::Shopee, AnnouncementType::Classico, dec!(50))
            .unwrap_err();
        assert_eq!(
            err,
            CalculationError::InvalidListing {
                marketplace: Marketplace::Shopee,
                announcement: AnnouncementType::Classico,
            }
        );
    }

    #[test]
    fn test_oversized_commission_is_an_error() {
        let mut custom = schedule();
        custom.mercado_livre.premium_rate = dec!(1000);
        let err = custom
            .quote(Marketplace::MercadoLivre, AnnouncementType::Premium, Decimal::MAX)
            .unwrap_err();
        assert!(matches!(err, CalculationError::DegenerateInput(_)));
    }

    #[test]
    fn test_overridden_shipping_support() {
        let mut custom = schedule();
        custom.mercado_livre.shipping_support = dec!(35.5);
        let fees = custom
            .quote(Marketplace::MercadoLivre, AnnouncementType::Classico, dec!(120))
            .unwrap();
        assert_eq!(fees.shipping_support, dec!(35.5));
    }
}

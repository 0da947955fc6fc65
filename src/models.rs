//! Input and output records of a landed-cost calculation
//!
//! The enums mirror the wire values used by JSON/TOML inputs
//! (`"MERCADO_LIVRE"`, `"SEM_FRETE_GRATIS"`, ...). [`CalculationInput`]
//! deserializes from camelCase with every field defaulted, so a partial file
//! is a valid input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency a supplier cost or freight is quoted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    #[default]
    Usd,
    Brl,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Brl => "BRL",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "BRL" => Ok(Currency::Brl),
            other => Err(format!("unknown currency: {}", other)),
        }
    }
}

/// Seller's output tax regime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxRegime {
    #[default]
    Mei,              // Microempreendedor Individual (fixed monthly DAS)
    SimplesNacional,  // Effective rate over gross sales
    LucroPresumido,   // Presumed profit
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Mei => "MEI",
            TaxRegime::SimplesNacional => "SIMPLES_NACIONAL",
            TaxRegime::LucroPresumido => "LUCRO_PRESUMIDO",
        }
    }
}

impl FromStr for TaxRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MEI" => Ok(TaxRegime::Mei),
            "SIMPLES_NACIONAL" | "SIMPLES" => Ok(TaxRegime::SimplesNacional),
            "LUCRO_PRESUMIDO" => Ok(TaxRegime::LucroPresumido),
            other => Err(format!("unknown tax regime: {}", other)),
        }
    }
}

/// Sales channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Marketplace {
    MercadoLivre,
    #[default]
    Shopee,
}

impl Marketplace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::MercadoLivre => "MERCADO_LIVRE",
            Marketplace::Shopee => "SHOPEE",
        }
    }
}

impl FromStr for Marketplace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MERCADO_LIVRE" | "ML" => Ok(Marketplace::MercadoLivre),
            "SHOPEE" => Ok(Marketplace::Shopee),
            other => Err(format!("unknown marketplace: {}", other)),
        }
    }
}

/// Listing type; valid values depend on the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementType {
    Classico,       // Mercado Livre
    Premium,        // Mercado Livre
    #[default]
    SemFreteGratis, // Shopee standard
    ComFreteGratis, // Shopee free-shipping program
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Classico => "CLASSICO",
            AnnouncementType::Premium => "PREMIUM",
            AnnouncementType::SemFreteGratis => "SEM_FRETE_GRATIS",
            AnnouncementType::ComFreteGratis => "COM_FRETE_GRATIS",
        }
    }
}

impl FromStr for AnnouncementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "CLASSICO" => Ok(AnnouncementType::Classico),
            "PREMIUM" => Ok(AnnouncementType::Premium),
            "SEM_FRETE_GRATIS" => Ok(AnnouncementType::SemFreteGratis),
            "COM_FRETE_GRATIS" => Ok(AnnouncementType::ComFreteGratis),
            other => Err(format!("unknown announcement type: {}", other)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Currency, TaxRegime, Marketplace, AnnouncementType);

/// Everything needed to price a single SKU.
///
/// Percent fields are expressed in percent (`17` means 17%). Missing fields
/// take the values from [`CalculationInput::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    pub product_cost_value: Decimal,
    pub product_currency: Currency,
    pub quantity: u32,
    /// Freight for the whole shipment, not per unit
    pub freight_value: Decimal,
    pub freight_currency: Currency,
    /// Flat BRL costs (customs clearance, etc.)
    pub extra_expenses: Decimal,

    /// Spot USD -> BRL rate
    pub exchange_rate: Decimal,
    pub spread_percent: Decimal,
    pub iof_percent: Decimal,

    pub icms_rate: Decimal,
    pub tax_regime: TaxRegime,
    pub simples_nacional_rate: Decimal,

    #[serde(rename = "salePriceBRL")]
    pub sale_price_brl: Decimal,
    pub marketplace: Marketplace,
    pub announcement_type: AnnouncementType,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            product_name: None,
            sku: None,
            product_cost_value: Decimal::ZERO,
            product_currency: Currency::Usd,
            quantity: 1,
            freight_value: Decimal::ZERO,
            freight_currency: Currency::Usd,
            extra_expenses: Decimal::ZERO,
            exchange_rate: Decimal::ZERO,
            spread_percent: Decimal::ZERO,
            iof_percent: Decimal::ZERO,
            icms_rate: Decimal::ZERO,
            tax_regime: TaxRegime::Mei,
            simples_nacional_rate: Decimal::ZERO,
            sale_price_brl: Decimal::ZERO,
            marketplace: Marketplace::Shopee,
            announcement_type: AnnouncementType::SemFreteGratis,
        }
    }
}

impl CalculationInput {
    /// True while neither a product cost nor a sale price has been entered
    pub fn is_blank(&self) -> bool {
        self.product_cost_value.is_zero() && self.sale_price_brl.is_zero()
    }

    /// Label used in logs and report headers
    pub fn label(&self) -> String {
        match (&self.product_name, &self.sku) {
            (Some(name), Some(sku)) => format!("{} ({})", name, sku),
            (Some(name), None) => name.clone(),
            (None, Some(sku)) => sku.clone(),
            (None, None) => "unnamed SKU".to_string(),
        }
    }
}

/// Derived unit economics for one [`CalculationInput`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    // Currency / exchange
    pub effective_exchange_rate: Decimal,
    #[serde(rename = "totalProductCostBRL")]
    pub total_product_cost_brl: Decimal,
    #[serde(rename = "totalFreightCostBRL")]
    pub total_freight_cost_brl: Decimal,
    #[serde(rename = "customsValueUSD")]
    pub customs_value_usd: Decimal,

    // Import taxation (BRL)
    pub import_tax: Decimal,
    pub icms_tax: Decimal,

    // Landed cost (BRL)
    pub landed_cost_unit: Decimal,
    pub landed_cost_total: Decimal,

    // Selling costs per unit (BRL)
    pub marketplace_commission: Decimal,
    pub marketplace_fixed_fee: Decimal,
    pub marketplace_shipping_support: Decimal,
    pub output_tax: Decimal,

    // Outcome
    pub total_cost_unit: Decimal,
    pub net_profit: Decimal,
    /// Percent of sale price
    pub net_margin: Decimal,
    /// Percent of landed unit cost
    pub roi: Decimal,
    pub break_even_price: Decimal,
}

impl CalculationResult {
    /// Commission + fixed fee + shipping support + output tax
    pub fn selling_costs(&self) -> Decimal {
        self.marketplace_commission
            + self.marketplace_fixed_fee
            + self.marketplace_shipping_support
            + self.output_tax
    }
}

//! Landed - import landed-cost and marketplace unit economics
//!
//! This library prices a single imported SKU for resale in Brazil: FX with
//! spread and IOF, Remessa Conforme import duty, ICMS gross-up, marketplace
//! fees (Mercado Livre, Shopee) and output tax, down to net profit, margin,
//! ROI and break-even price.
//!
//! ```
//! use landed::calculate_landed_cost;
//! use landed::models::CalculationInput;
//! use rust_decimal_macros::dec;
//!
//! let input = CalculationInput {
//!     product_cost_value: dec!(10),
//!     quantity: 10,
//!     freight_value: dec!(20),
//!     exchange_rate: dec!(5),
//!     icms_rate: dec!(17),
//!     sale_price_brl: dec!(50),
//!     ..CalculationInput::default()
//! };
//! let result = calculate_landed_cost(&input).unwrap();
//! assert_eq!(result.landed_cost_unit.round_dp(2), dec!(103.61));
//! ```

pub mod analysis;
pub mod calculator;
pub mod config;
pub mod error;
pub mod exchange;
pub mod marketplace;
pub mod models;
pub mod tax;
pub mod utils;

pub use calculator::{calculate_landed_cost, Calculator};
pub use error::CalculationError;

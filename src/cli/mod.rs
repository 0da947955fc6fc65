use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "landed")]
#[command(
    version,
    about = "Landed-cost and marketplace profit calculator for imported SKUs"
)]
#[command(
    long_about = "Compute the landed cost of an imported product (Remessa Conforme import duty, ICMS, FX spread and IOF) and its unit economics on Mercado Livre or Shopee: net profit, margin, ROI and break-even price."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Config file (default: <config dir>/landed/config.toml)
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides applied on top of an input file
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputOverrides {
    /// Sale price per unit in BRL
    #[arg(long = "sale-price", value_name = "BRL")]
    pub sale_price: Option<Decimal>,

    /// Units in the shipment
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Destination state (UF) whose ICMS rate replaces the file's icmsRate
    #[arg(long, value_name = "UF")]
    pub state: Option<String>,

    /// Spot USD -> BRL exchange rate
    #[arg(long = "exchange-rate", value_name = "RATE")]
    pub exchange_rate: Option<Decimal>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate landed cost and unit economics for an input file (TOML or JSON)
    Calc {
        /// Path to the input file
        file: PathBuf,

        #[command(flatten)]
        overrides: InputOverrides,
    },

    /// Show the break-even sale price and verify profit at that price
    BreakEven {
        /// Path to the input file
        file: PathBuf,

        #[command(flatten)]
        overrides: InputOverrides,
    },

    /// List ICMS rate presets by destination state
    States,

    /// Print a blank input file (TOML) with configured defaults
    Template,
}

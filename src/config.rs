//! User configuration
//!
//! Loaded from `<config_home>/landed/config.toml` (or an explicit path).
//! Every key is optional; a missing file means built-in defaults.
//!
//! ```toml
//! [fees.mercado_livre]
//! shipping_support = 24.50
//!
//! [defaults]
//! spread_percent = 4
//! iof_percent = 3.5
//! icms_state = "SP"
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::marketplace::FeeSchedule;
use crate::models::{CalculationInput, TaxRegime};
use crate::tax;

/// Defaults applied to new inputs (the `template` command)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InputDefaults {
    pub exchange_rate: Option<Decimal>,
    pub spread_percent: Option<Decimal>,
    pub iof_percent: Option<Decimal>,
    pub icms_rate: Option<Decimal>,
    /// UF code; used when `icms_rate` is not set
    pub icms_state: Option<String>,
    pub tax_regime: Option<TaxRegime>,
    pub simples_nacional_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub fees: FeeSchedule,
    pub defaults: InputDefaults,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dir_spec::config_home().map(|dir| dir.join("landed").join("config.toml"))
    }

    /// Load from an explicit path (must exist) or the default location
    /// (optional)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A blank input pre-filled with the configured defaults
    pub fn template_input(&self) -> Result<CalculationInput> {
        let d = &self.defaults;
        let mut input = CalculationInput::default();

        if let Some(rate) = d.exchange_rate {
            input.exchange_rate = rate;
        }
        if let Some(spread) = d.spread_percent {
            input.spread_percent = spread;
        }
        if let Some(iof) = d.iof_percent {
            input.iof_percent = iof;
        }
        input.icms_rate = match (d.icms_rate, d.icms_state.as_deref()) {
            (Some(rate), _) => rate,
            (None, Some(uf)) => tax::rate_for_state(uf)
                .with_context(|| format!("Invalid icms_state in config: {}", uf))?,
            (None, None) => input.icms_rate,
        };
        if let Some(regime) = d.tax_regime {
            input.tax_regime = regime;
        }
        if let Some(rate) = d.simples_nacional_rate {
            input.simples_nacional_rate = rate;
        }

        Ok(input)
    }
}

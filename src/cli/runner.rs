use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use landed::calculator::Calculator;
use landed::config::Config;
use landed::models::CalculationInput;
use landed::tax;

use crate::cli::{formatters, Cli, Commands, InputOverrides};

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let calculator = Calculator::new(config.fees.clone());

    match cli.command {
        Commands::Calc { file, overrides } => {
            let input = load_input(&file)?;
            let input = apply_overrides(input, &overrides)?;

            if input.is_blank() {
                println!("{}", formatters::format_awaiting_data());
                return Ok(());
            }

            info!("Calculating landed cost for {}", input.label());
            let result = calculator
                .calculate(&input)
                .with_context(|| format!("Failed to calculate {}", file.display()))?;

            if cli.json {
                println!("{}", formatters::format_result_json(&input, &result));
            } else {
                println!("{}", formatters::format_result_table(&input, &result));
            }
            Ok(())
        }

        Commands::BreakEven { file, overrides } => {
            let input = load_input(&file)?;
            let input = apply_overrides(input, &overrides)?;

            let check = calculator
                .break_even_check(&input)
                .with_context(|| format!("Failed to calculate {}", file.display()))?;

            if cli.json {
                println!("{}", formatters::format_break_even_json(&check));
            } else {
                println!("{}", formatters::format_break_even(&input, &check));
            }
            Ok(())
        }

        Commands::States => {
            if cli.json {
                println!("{}", formatters::format_states_json());
            } else {
                println!("{}", formatters::format_states_table());
            }
            Ok(())
        }

        Commands::Template => {
            let input = config.template_input()?;
            let rendered = if cli.json {
                serde_json::to_string_pretty(&input)?
            } else {
                toml::to_string(&input).context("Failed to render template")?
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}

/// Read a [`CalculationInput`] from a `.json` or `.toml` file
pub fn load_input(path: &Path) -> Result<CalculationInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let input = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON input {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML input {}", path.display()))?
    };

    debug!("Loaded input from {}", path.display());
    Ok(input)
}

/// Apply command-line overrides on top of a loaded input
pub fn apply_overrides(
    mut input: CalculationInput,
    overrides: &InputOverrides,
) -> Result<CalculationInput> {
    if let Some(price) = overrides.sale_price {
        input.sale_price_brl = price;
    }
    if let Some(quantity) = overrides.quantity {
        input.quantity = quantity;
    }
    if let Some(rate) = overrides.exchange_rate {
        input.exchange_rate = rate;
    }
    if let Some(uf) = overrides.state.as_deref() {
        input.icms_rate = tax::rate_for_state(uf)
            .with_context(|| format!("Failed to apply --state {}", uf))?;
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_toml_input() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
productCostValue = 10
quantity = 10
freightValue = 20
exchangeRate = 5.0
icmsRate = 17
salePriceBRL = 50
marketplace = "SHOPEE"
announcementType = "SEM_FRETE_GRATIS"
"#
        )
        .unwrap();

        let input = load_input(file.path()).unwrap();
        assert_eq!(input.quantity, 10);
        assert_eq!(input.sale_price_brl, dec!(50));
    }

    #[test]
    fn test_load_json_input() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"productCostValue": "12.5", "exchangeRate": 5}}"#).unwrap();

        let input = load_input(file.path()).unwrap();
        assert_eq!(input.product_cost_value, dec!(12.5));
    }

    #[test]
    fn test_overrides_replace_fields() {
        let overrides = InputOverrides {
            sale_price: Some(dec!(99.9)),
            quantity: Some(3),
            state: Some("ba".to_string()),
            exchange_rate: None,
        };
        let input = apply_overrides(CalculationInput::default(), &overrides).unwrap();
        assert_eq!(input.sale_price_brl, dec!(99.9));
        assert_eq!(input.quantity, 3);
        assert_eq!(input.icms_rate, dec!(20.5));
    }

    #[test]
    fn test_unknown_state_override_fails() {
        let overrides = InputOverrides {
            state: Some("QQ".to_string()),
            ..InputOverrides::default()
        };
        assert!(apply_overrides(CalculationInput::default(), &overrides).is_err());
    }
}

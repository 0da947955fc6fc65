//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use landed::analysis::{ProfitHealth, UnitBreakdown};
use landed::calculator::BreakEvenCheck;
use landed::models::{CalculationInput, CalculationResult};
use landed::tax::ICMS_STATE_RATES;
use landed::utils::{format_currency, format_percent, format_rate, format_usd};

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn line(item: &str, value: String) -> LineRow {
    LineRow {
        item: item.to_string(),
        value,
    }
}

fn render(rows: Vec<LineRow>) -> String {
    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

fn colored_money(value: Decimal, health: ProfitHealth) -> String {
    let text = format_currency(value);
    match health {
        ProfitHealth::Loss => text.red().bold().to_string(),
        ProfitHealth::Thin => text.yellow().bold().to_string(),
        ProfitHealth::Healthy => text.green().bold().to_string(),
    }
}

/// Message shown while the input has neither cost nor sale price
pub fn format_awaiting_data() -> String {
    format!(
        "\n{} Awaiting data\n\nFill in productCostValue and salePriceBRL to see the viability analysis.\n",
        "ℹ".blue().bold()
    )
}

/// Format a calculation for terminal table output
pub fn format_result_table(input: &CalculationInput, result: &CalculationResult) -> String {
    let health = ProfitHealth::classify(result);
    let breakdown = UnitBreakdown::from_result(input, result);
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {} - {} x{} on {} {}\n\n",
        "📦".cyan().bold(),
        input.label().bold(),
        input.product_currency,
        input.quantity,
        input.marketplace,
        input.announcement_type
    ));

    // Summary cards
    output.push_str(&render(vec![
        line("Landed cost (unit)", format_currency(result.landed_cost_unit)),
        line("Break-even price", format_currency(result.break_even_price)),
        line("Net profit (unit)", colored_money(result.net_profit, health)),
        line("Net margin", format_percent(result.net_margin)),
        line("ROI", format_percent(result.roi)),
    ]));

    // Import costing
    output.push_str(&format!("\n\n{} Import\n", "━".repeat(40).bright_black()));
    output.push_str(&render(vec![
        line("Exchange rate (spot)", format_rate(input.exchange_rate)),
        line(
            "Exchange rate (effective)",
            format_rate(result.effective_exchange_rate),
        ),
        line("Customs value", format_usd(result.customs_value_usd)),
        line("Product (shipment)", format_currency(result.total_product_cost_brl)),
        line("Freight (shipment)", format_currency(result.total_freight_cost_brl)),
        line("Import duty (II)", format_currency(result.import_tax)),
        line("ICMS", format_currency(result.icms_tax)),
        line("Extra expenses", format_currency(input.extra_expenses)),
        line("Landed cost (shipment)", format_currency(result.landed_cost_total)),
    ]));

    // Unit composition
    output.push_str(&format!(
        "\n\n{} Unit composition\n",
        "━".repeat(40).bright_black()
    ));
    output.push_str(&render(vec![
        line("Product + freight", format_currency(breakdown.base_cost_unit)),
        line("Import taxes (II + ICMS)", format_currency(breakdown.import_taxes_unit)),
        line("Extra expenses", format_currency(breakdown.extra_expenses_unit)),
        line("Landed cost", format_currency(breakdown.landed_cost_unit)),
        line("Commission", format_currency(-breakdown.commission)),
        line("Fixed fee / shipping", format_currency(-breakdown.fixed_and_shipping)),
        line(
            &format!("Output tax ({})", input.tax_regime),
            format_currency(-breakdown.output_tax),
        ),
        line("Total cost (unit)", format_currency(result.total_cost_unit)),
    ]));

    output.push_str(&format!("\n\n{:<14} {}\n", "Health:".bold(), health.as_str()));

    if health == ProfitHealth::Loss {
        output.push_str(&format!(
            "\n{} Operating at a loss: the sale price does not cover import and marketplace costs. Raise the price or negotiate the cost.\n",
            "⚠".red().bold()
        ));
    }

    output
}

/// Format a calculation as JSON: `{input, result, health, breakdown}`
pub fn format_result_json(input: &CalculationInput, result: &CalculationResult) -> String {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        input: &'a CalculationInput,
        result: &'a CalculationResult,
        health: ProfitHealth,
        breakdown: UnitBreakdown,
    }

    let report = JsonReport {
        input,
        result,
        health: ProfitHealth::classify(result),
        breakdown: UnitBreakdown::from_result(input, result),
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

pub fn format_break_even(input: &CalculationInput, check: &BreakEvenCheck) -> String {
    let residual = check.at_break_even.net_profit;
    let mut output = format!(
        "\n{} Break-even for {}: {}\n",
        "⚖".cyan().bold(),
        input.label().bold(),
        format_currency(check.break_even_price).bold()
    );
    output.push_str(&format!(
        "{:<14} {}\n",
        "Profit there:",
        format_currency(residual)
    ));

    if residual.round_dp(2).is_zero() {
        output.push_str(&format!("{} Verified\n", "✓".green().bold()));
    } else {
        output.push_str(&format!(
            "{} Fee tier changes at this price; profit is not zero\n",
            "⚠".yellow().bold()
        ));
    }
    output
}

pub fn format_break_even_json(check: &BreakEvenCheck) -> String {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonBreakEven<'a> {
        break_even_price: Decimal,
        net_profit_at_break_even: Decimal,
        result_at_break_even: &'a CalculationResult,
    }

    let report = JsonBreakEven {
        break_even_price: check.break_even_price,
        net_profit_at_break_even: check.at_break_even.net_profit,
        result_at_break_even: &check.at_break_even,
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

pub fn format_states_table() -> String {
    #[derive(Tabled)]
    struct StateRow {
        #[tabled(rename = "UF")]
        uf: String,
        #[tabled(rename = "State")]
        name: String,
        #[tabled(rename = "ICMS")]
        rate: String,
    }

    let rows: Vec<StateRow> = ICMS_STATE_RATES
        .iter()
        .map(|s| StateRow {
            uf: s.uf.to_string(),
            name: s.name.to_string(),
            rate: format_percent(s.rate),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..), Alignment::right());
    table.to_string()
}

pub fn format_states_json() -> String {
    #[derive(Serialize)]
    struct JsonState {
        uf: &'static str,
        name: &'static str,
        rate: Decimal,
    }

    let states: Vec<JsonState> = ICMS_STATE_RATES
        .iter()
        .map(|s| JsonState {
            uf: s.uf,
            name: s.name,
            rate: s.rate,
        })
        .collect();

    serde_json::to_string_pretty(&states)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

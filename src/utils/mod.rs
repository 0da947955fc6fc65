//! Brazilian-locale number formatting for reports
//!
//! `.` groups thousands and `,` separates decimals: "R$ 1.234,56".

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the integer digits of `value` and render `places` decimals
fn format_br(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let is_negative = rounded.is_sign_negative() && !rounded.is_zero();
    let formatted = format!("{:.*}", places as usize, rounded.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if is_negative { "-" } else { "" };
    match decimal_part {
        Some(dec) => format!("{}{},{}", sign, grouped, dec),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format as Brazilian Real with symbol: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use landed::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
/// assert_eq!(format_currency(dec!(-64.6144)), "R$ -64,61");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {}", format_br(value, 2))
}

/// Format a percentage with two decimals: "17,50%"
///
/// # Examples
/// ```
/// use landed::utils::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(17.5)), "17,50%");
/// ```
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_br(value, 2))
}

/// Format an exchange rate with four decimals: "5,3820"
pub fn format_rate(value: Decimal) -> String {
    format_br(value, 4)
}

/// Format a USD amount: "US$ 1.234,56"
pub fn format_usd(value: Decimal) -> String {
    format!("US$ {}", format_br(value, 2))
}

//! es-MX style rendering: comma thousands separators, dot decimal point.

/// Splits a value into sign, whole part, and rounded milli-fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn split_milli(value: f64) -> (bool, u128, u16) {
    let millis = (value * 1_000.0).round();
    let negative = millis < 0.0;
    let millis = millis.abs() as u128;
    (negative, millis / 1_000, (millis % 1_000) as u16)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders a number with grouped thousands and up to three fractional
/// digits, trailing zeros trimmed (`1500000` → `"1,500,000"`,
/// `12.5` → `"12.5"`).
#[must_use]
pub fn format_number(value: f64) -> String {
    let (negative, whole, frac_millis) = split_milli(value);
    let mut rendered = String::new();
    if negative && (whole > 0 || frac_millis > 0) {
        rendered.push('-');
    }
    rendered.push_str(&group_thousands(whole));
    if frac_millis > 0 {
        let frac = format!("{frac_millis:03}");
        rendered.push('.');
        rendered.push_str(frac.trim_end_matches('0'));
    }
    rendered
}

/// Renders a currency amount rounded to whole units before grouping
/// (`1562500.6` → `"1,562,501"`). Rounding, never truncation.
#[must_use]
pub fn format_currency(value: f64) -> String {
    format_number(value.round())
}

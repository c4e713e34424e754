//! Presentation helpers shared by every front end.
//!
//! All formatters are total: absent, non-finite, or non-numeric input renders
//! as [`NOT_AVAILABLE`]. Currency prefixes are the caller's business.

pub const NOT_AVAILABLE: &str = "N/A";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Large amounts with a B/M/K suffix, e.g. `1.50B`.
pub fn format_magnitude(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return NOT_AVAILABLE.to_owned();
    };

    let magnitude = value.abs();
    if magnitude >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if magnitude >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else if magnitude >= THOUSAND {
        format!("{:.2}K", value / THOUSAND)
    } else {
        group_thousands(&format!("{value:.2}"))
    }
}

pub fn format_price(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => format!("{value:.2}"),
        None => NOT_AVAILABLE.to_owned(),
    }
}

pub fn format_ratio(value: Option<f64>) -> String {
    format_price(value)
}

/// Fractions as percentages: `0.1534` renders `15.34%`.
pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Whole counts with thousands separators, e.g. `1,234,567`.
pub fn format_count(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => group_thousands(&format!("{value:.0}")),
        None => NOT_AVAILABLE.to_owned(),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Prefix `$` unless the value is absent.
pub fn with_currency(formatted: String) -> String {
    if formatted == NOT_AVAILABLE {
        formatted
    } else if let Some(unsigned) = formatted.strip_prefix('-') {
        format!("-${unsigned}")
    } else {
        format!("${formatted}")
    }
}

/// Cut `text` to at most `max_chars` characters and mark the cut with `...`.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Insert `,` separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

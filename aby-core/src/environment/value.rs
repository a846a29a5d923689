//! Runtime values are plain text. These helpers give that text its numeric,
//! boolean and array readings.

use once_cell::sync::Lazy;
use regex::Regex;

pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("numeric pattern compiles")
});

/// Whether the whole text is a plain decimal number such as `-12` or `3.50`.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

pub fn as_number(value: &str) -> Option<f64> {
    if !is_numeric(value) {
        return None;
    }

    value.parse::<f64>().ok()
}

/// Lenient reading used when rendering text: leading whitespace, a sign,
/// a fraction and an exponent are all accepted as long as nothing trails.
/// Text outside the range of a double is not a number.
pub fn read_number(value: &str) -> Option<f64> {
    let value = value.trim_start();

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return None;
    }

    let number = value.parse::<f64>().ok()?;

    let mantissa = value.split(['e', 'E']).next().unwrap_or(value);
    let underflowed = number == 0.0 && mantissa.chars().any(|c| matches!(c, '1'..='9'));

    if !number.is_finite() || underflowed {
        return None;
    }

    Some(number)
}

/// Text of a computed number, always with six decimals (`2` -> `2.000000`).
pub fn format_number(value: f64) -> String {
    format!("{value:.6}")
}

/// Six decimals, then trailing zeros and a dangling point removed
/// (`3.140000` -> `3.14`, `3.000000` -> `3`).
pub fn trim_number(value: f64) -> String {
    let fixed = format_number(value);
    let trimmed = fixed.trim_end_matches('0');

    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

/// How a value is shown to the user: numbers trimmed, anything else verbatim.
pub fn render(value: &str) -> String {
    match read_number(value) {
        Some(number) => trim_number(number),
        None => value.to_string(),
    }
}

pub fn is_truthy(value: &str) -> bool {
    value == TRUE
}

pub fn from_bool(value: bool) -> String {
    let text = if value { TRUE } else { FALSE };

    text.to_string()
}

/// Comma separated pieces of a value. An empty value has no pieces and a
/// single trailing comma does not produce an empty last piece.
pub fn split_items(value: &str) -> Vec<&str> {
    let mut items = value.split(',').collect::<Vec<&str>>();

    if items.last().is_some_and(|item| item.is_empty()) {
        items.pop();
    }

    items
}

/// Elements of a bracket encoded array (`[a,b,c]`), or `None` when the
/// value is not bracket delimited.
pub fn array_items(value: &str) -> Option<Vec<&str>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;

    Some(split_items(inner))
}

/// Integer part of numeric text, `None` if the text is not numeric or does
/// not fit.
pub fn truncate(value: &str) -> Option<i64> {
    let number = as_number(value)?.trunc();

    if number < i64::MIN as f64 || number > i64::MAX as f64 {
        return None;
    }

    Some(number as i64)
}

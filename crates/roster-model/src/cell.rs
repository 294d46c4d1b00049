//! Cell values and lazy coercion.
//!
//! Rows arrive untyped: a cell may hold text, a number, a boolean or nothing.
//! Validators never trust the stored type and coerce on read instead.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One record of a dataset, keyed by column name.
pub type Row = BTreeMap<String, CellValue>;

/// A single untyped cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Hashable identity of a raw cell, used for duplicate detection.
///
/// Numbers compare by value with `-0 == 0` and `NaN == NaN`; text and numbers
/// never compare equal to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Null,
    Bool(bool),
    Number(u64),
    Text(String),
}

impl CellValue {
    /// Text rendering of the cell (empty for `Null`).
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(true) => Cow::Borrowed("true"),
            CellValue::Bool(false) => Cow::Borrowed("false"),
            CellValue::Number(value) => Cow::Owned(format_number(*value)),
            CellValue::Text(text) => Cow::Borrowed(text),
        }
    }

    /// Numeric reading of the cell; NaN when the content is not a number.
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Null => 0.0,
            CellValue::Bool(flag) => f64::from(u8::from(*flag)),
            CellValue::Number(value) => *value,
            CellValue::Text(text) => parse_number(text),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(flag) => *flag,
            CellValue::Number(value) => *value != 0.0 && !value.is_nan(),
            CellValue::Text(text) => !text.is_empty(),
        }
    }

    pub fn key(&self) -> CellKey {
        match self {
            CellValue::Null => CellKey::Null,
            CellValue::Bool(flag) => CellKey::Bool(*flag),
            CellValue::Number(value) => CellKey::Number(number_bits(*value)),
            CellValue::Text(text) => CellKey::Text(text.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Text of `column` in `row`; an absent cell reads as empty.
pub fn text_of<'a>(row: &'a Row, column: &str) -> Cow<'a, str> {
    row.get(column)
        .map_or(Cow::Borrowed(""), CellValue::to_text)
}

/// Number of `column` in `row`; an absent cell reads as NaN.
pub fn number_of(row: &Row, column: &str) -> f64 {
    row.get(column).map_or(f64::NAN, CellValue::to_number)
}

/// Split a delimited list cell on `,` or `;`, trimming tokens and skipping
/// empty ones.
pub fn list_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Parse numeric text the way spreadsheet exports are usually read.
///
/// Blank text is zero. Decimal and exponent forms, signed `Infinity` and
/// `0x`/`0o`/`0b` integer literals are accepted; anything else is NaN.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |value| value as f64);
        }
    }
    // f64::from_str also takes "inf" and "nan"; reject every alphabetic form
    // except the exponent marker.
    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !plain {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a number without a trailing `.0` for integral values.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    value.to_string()
}

fn number_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_spreadsheet_forms() {
        assert_eq!(parse_number(" 42 "), 42.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn parse_number_rejects_words() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("1e").is_nan());
        assert!(parse_number("3 apples").is_nan());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(3.0).to_text(), "3");
        assert_eq!(CellValue::Number(-0.0).to_text(), "0");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
    }

    #[test]
    fn raw_keys_keep_types_apart() {
        assert_ne!(CellValue::from("1").key(), CellValue::from(1i64).key());
        assert_eq!(CellValue::Number(f64::NAN).key(), CellValue::Number(f64::NAN).key());
        assert_eq!(CellValue::Number(-0.0).key(), CellValue::Number(0.0).key());
    }

    #[test]
    fn list_tokens_skip_blanks() {
        let tokens: Vec<&str> = list_tokens(" a, ;b ;c,").collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }
}

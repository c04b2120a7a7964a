//! Explicit conversions from raw JSON payload values to stored field types.
//!
//! `price` accepts a JSON number or a string holding a decimal number
//! (surrounding whitespace ignored). Empty strings, `inf`/`NaN`, and every
//! other JSON type are not convertible. The value is kept as parsed, no
//! rounding is applied.
//!
//! `inStock` accepts only a real JSON boolean; truthy strings or numbers are
//! not coerced.

use serde_json::Value;

pub fn to_price(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

pub fn to_in_stock(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Non-empty string content, untrimmed.
pub fn to_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

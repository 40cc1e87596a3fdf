//! Duration and price label handling.
//!
//! Scraped transport legs carry human-facing labels like `"25h 6min"` and
//! `"R$8.659,00"`. This module parses them into raw numerics (fractional
//! hours, decimal currency) and formats numerics back into display labels.
//! Parsers are strict and return errors; the ingest layer decides how to
//! recover (it defaults the metric to 0.0 and records a warning).

/// Error returned when parsing an invalid label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid label: {reason}")]
pub struct LabelError {
    reason: &'static str,
}

impl LabelError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a duration label into fractional hours.
///
/// Accepted forms are `"25h 6min"`, `"3h"` and `"45min"` (case and
/// whitespace insensitive). Minutes are converted at 60 per hour, so
/// `"25h 6min"` parses to 25.1.
///
/// # Examples
///
/// ```
/// use trip_optimizer::domain::parse_duration_label;
///
/// assert_eq!(parse_duration_label("25h 6min").unwrap(), 25.1);
/// assert_eq!(parse_duration_label("3h").unwrap(), 3.0);
/// assert_eq!(parse_duration_label("45min").unwrap(), 0.75);
///
/// assert!(parse_duration_label("").is_err());
/// assert!(parse_duration_label("soon").is_err());
/// ```
pub fn parse_duration_label(label: &str) -> Result<f64, LabelError> {
    let s = label.trim().to_lowercase();
    if s.is_empty() {
        return Err(LabelError::new("empty duration label"));
    }

    let (hours_part, rest) = match s.split_once('h') {
        Some((hours, rest)) => (Some(hours.trim()), rest.trim()),
        None => (None, s.as_str()),
    };

    let hours = match hours_part {
        Some(hours) => {
            parse_component(hours).ok_or_else(|| LabelError::new("invalid hour component"))?
        }
        None => 0.0,
    };

    let minutes = if rest.is_empty() {
        // "3h" form; a bare empty remainder without an hour part was
        // rejected above as an empty label
        0.0
    } else {
        let digits = rest
            .strip_suffix("min")
            .ok_or_else(|| LabelError::new("expected minute component ending in 'min'"))?;
        parse_component(digits.trim()).ok_or_else(|| LabelError::new("invalid minute component"))?
    };

    let total = hours + minutes / 60.0;
    if !total.is_finite() {
        return Err(LabelError::new("duration overflows"));
    }
    Ok(total)
}

/// Parse a price label into a decimal amount.
///
/// Currency symbols and letters are stripped; `.` is a thousands
/// separator and `,` the decimal separator (Brazilian convention), so
/// `"R$8.659,00"` parses to 8659.0.
///
/// # Examples
///
/// ```
/// use trip_optimizer::domain::parse_price_label;
///
/// assert_eq!(parse_price_label("R$8.659,00").unwrap(), 8659.0);
/// assert_eq!(parse_price_label("R$ 1.234,56").unwrap(), 1234.56);
/// assert_eq!(parse_price_label("€89").unwrap(), 89.0);
///
/// assert!(parse_price_label("call us").is_err());
/// ```
pub fn parse_price_label(label: &str) -> Result<f64, LabelError> {
    let numeric: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return Err(LabelError::new("no digits in price label"));
    }

    let normalized = numeric.replace('.', "").replace(',', ".");
    let value = normalized
        .parse::<f64>()
        .map_err(|_| LabelError::new("malformed price digits"))?;
    // Digit strings past f64 range parse to infinity rather than failing
    if !value.is_finite() {
        return Err(LabelError::new("price overflows"));
    }
    Ok(value)
}

/// Format fractional hours as a duration label, e.g. `25.1` → `"25h 6 min"`.
///
/// Whole-hour values omit the minute component: `3.0` → `"3h"`.
pub fn format_duration_hours(hours: f64) -> String {
    let whole = hours.trunc() as i64;
    let minutes = ((hours - whole as f64) * 60.0).round() as i64;
    // Rounding can carry 59.6 minutes up to a full hour
    let (whole, minutes) = if minutes >= 60 {
        (whole + 1, 0)
    } else {
        (whole, minutes)
    };

    if minutes > 0 {
        format!("{whole}h {minutes} min")
    } else {
        format!("{whole}h")
    }
}

/// Format a decimal amount as a Brazilian-grouped price label,
/// e.g. `8659.0` → `"R$ 8.659,00"`.
pub fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let whole = (cents / 100).abs();
    let frac = (cents % 100).abs();

    let digits = whole.to_string();
    let bytes = digits.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*b as char);
    }

    format!("R$ {sign}{grouped},{frac:02}")
}

/// Parse a single numeric component, rejecting non-finite and negative
/// values ("inf" and "nan" are valid `f64` syntax but not valid labels).
fn parse_component(s: &str) -> Option<f64> {
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any h/min pair formats into a label the parser accepts
        #[test]
        fn duration_format_parse_roundtrip(hours in 0i64..200, minutes in 0i64..60) {
            let value = hours as f64 + minutes as f64 / 60.0;
            let label = format_duration_hours(value);
            let parsed = parse_duration_label(&label).unwrap();
            prop_assert!((parsed - value).abs() < 1.0 / 120.0);
        }

        /// Any cent amount survives a format/parse cycle exactly
        #[test]
        fn price_format_parse_roundtrip(cents in 0i64..1_000_000_000) {
            let value = cents as f64 / 100.0;
            let label = format_price(value);
            prop_assert_eq!(parse_price_label(&label).unwrap(), value);
        }

        /// Parsed durations are always non-negative and finite
        #[test]
        fn parsed_duration_non_negative(hours in 0u32..500, minutes in 0u32..600) {
            let label = format!("{hours}h {minutes}min");
            let parsed = parse_duration_label(&label).unwrap();
            prop_assert!(parsed.is_finite());
            prop_assert!(parsed >= 0.0);
        }

        /// The parser never panics, and never returns a value the
        /// alternative constructor would reject
        #[test]
        fn duration_parser_total(label in ".*") {
            if let Ok(value) = parse_duration_label(&label) {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }

        /// The price parser never panics, and never returns a value the
        /// alternative constructor would reject
        #[test]
        fn price_parser_total(label in ".*") {
            if let Ok(value) = parse_price_label(&label) {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }
    }
}

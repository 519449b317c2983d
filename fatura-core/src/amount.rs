//! Decimal-comma currency parsing ("R$ -10.823,97" -> -10823.97)
//!
//! Amount cells mix currency symbols, line breaks and, for foreign-currency
//! rows, a second figure. The first decimal-comma number in the text wins.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ScrapeError;

fn decimal_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d[\d.]*,\d{2}").expect("decimal-comma regex is valid"))
}

/// Find the first decimal-comma number in `text` and normalize it to
/// decimal-point notation without thousands separators.
///
/// Returns `None` when the text holds no such number.
pub fn extract_decimal_comma(text: &str) -> Option<String> {
    let m = decimal_comma_re().find(text)?;
    Some(m.as_str().replace('.', "").replace(',', "."))
}

/// Extract and parse a signed amount from free-form cell text.
pub fn parse_decimal_comma(text: &str) -> Result<f64, ScrapeError> {
    let normalized =
        extract_decimal_comma(text).ok_or_else(|| ScrapeError::parse("amount", text.trim()))?;
    normalized
        .parse::<f64>()
        .map_err(|_| ScrapeError::parse("amount", normalized.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_plain_amount() {
        assert_eq!(extract_decimal_comma("58,14").as_deref(), Some("58.14"));
        assert_eq!(parse_decimal_comma("58,14").unwrap(), 58.14);
        assert_eq!(parse_decimal_comma("R$ 15,00").unwrap(), 15.0);
    }

    #[test]
    fn test_strips_thousands_and_keeps_sign() {
        let noisy = "R$ -10.823,97\n\t\t10.823,97";
        assert_eq!(extract_decimal_comma(noisy).as_deref(), Some("-10823.97"));
        assert_eq!(parse_decimal_comma(noisy).unwrap(), -10823.97);
    }

    #[test]
    fn test_extraction_is_stable_on_its_own_output_meaning() {
        let first = extract_decimal_comma("R$ 1.234.567,89").unwrap();
        assert_eq!(first, "1234567.89");
        assert_eq!(first.parse::<f64>().unwrap(), 1234567.89);
    }

    #[test]
    fn test_no_match_is_a_parse_error() {
        assert_eq!(extract_decimal_comma("R$ --"), None);
        assert_eq!(extract_decimal_comma("12.50"), None);
        let err = parse_decimal_comma("  sem valor ").unwrap_err();
        assert_eq!(err, ScrapeError::parse("amount", "sem valor"));
    }
}

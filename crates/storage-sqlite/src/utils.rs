//! Helpers for values SQLite stores as TEXT.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Parses a decimal stored as TEXT. Unparsable text means the row is corrupt;
/// it is never silently read as zero.
pub fn parse_decimal(raw: &str, column: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::CorruptValue(format!("{} = '{}': {}", column, raw, e)))
}

/// Canonical TEXT form of a decimal. Trailing zeros are kept so the stored
/// scale matches what was written.
pub fn decimal_to_text(value: Decimal) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("9500.00", "cash").unwrap(), dec!(9500.00));
        assert_eq!(parse_decimal("-0.10", "cash").unwrap(), dec!(-0.10));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        let err = parse_decimal("12,50", "accounts.cash").unwrap_err();
        assert!(err.to_string().contains("accounts.cash"));
        assert!(parse_decimal("", "cash").is_err());
    }

    #[test]
    fn test_decimal_text_round_trip_keeps_scale() {
        let text = decimal_to_text(dec!(10000.00));
        assert_eq!(text, "10000.00");
        assert_eq!(parse_decimal(&text, "cash").unwrap(), dec!(10000.00));
    }
}

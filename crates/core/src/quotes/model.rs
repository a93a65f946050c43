use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_SYMBOL_LENGTH;

/// A price observation for one symbol. Valid only for the operation that
/// requested it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Decimal,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            price,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name to show to a user, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Canonical form of a user-entered symbol: trimmed and upper-cased.
///
/// Returns `None` for input that can never be a ticker (empty, too long, or
/// containing anything other than ASCII letters, digits, `.` and `-`).
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LENGTH {
        return None;
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return None;
    }
    Some(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("aapl"), Some("AAPL".to_string()));
        assert_eq!(normalize_symbol("  brk.b "), Some("BRK.B".to_string()));
        assert_eq!(normalize_symbol("rds-a"), Some("RDS-A".to_string()));
    }

    #[test]
    fn test_normalize_symbol_rejects_garbage() {
        assert_eq!(normalize_symbol(""), None);
        assert_eq!(normalize_symbol("   "), None);
        assert_eq!(normalize_symbol("A B"), None);
        assert_eq!(normalize_symbol("AAPL;DROP"), None);
        assert_eq!(normalize_symbol(&"X".repeat(MAX_SYMBOL_LENGTH + 1)), None);
    }

    #[test]
    fn test_display_name_falls_back_to_symbol() {
        let quote = Quote::new("AAPL", dec!(50));
        assert_eq!(quote.display_name(), "AAPL");
        let quote = quote.with_name("Apple Inc.");
        assert_eq!(quote.display_name(), "Apple Inc.");
    }
}

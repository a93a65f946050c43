//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a quote.
///
/// None of these are retried by the crate; callers decide what an unavailable
/// quote means for them.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429, or 403 on quota exhaustion).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the payload could not be turned into a quote.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that produced the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The provider is missing required configuration (e.g. an API key).
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl MarketDataError {
    /// True when the symbol itself is unknown, as opposed to the provider failing.
    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_classification() {
        let error = MarketDataError::SymbolNotFound("ZZZZ".to_string());
        assert!(error.is_symbol_not_found());

        let error = MarketDataError::Timeout {
            provider: "IEX".to_string(),
        };
        assert!(!error.is_symbol_not_found());
    }

    #[test]
    fn test_error_messages() {
        let error = MarketDataError::ProviderError {
            provider: "IEX".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(error.to_string(), "Provider error: IEX - HTTP 500");
    }
}

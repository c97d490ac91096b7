//! Error types for fetch and resolution operations.
//!
//! This module defines [`FiscalError`] which covers the hard failures that can
//! occur when fetching financial rows, decoding statement payloads, or talking
//! to a cache. A metric that simply cannot be found is not an error: the
//! resolver reports it as `None`.

use thiserror::Error;

use crate::statement::StatementKind;

/// Errors that can occur during fetch and resolution operations.
#[derive(Error, Debug)]
pub enum FiscalError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a source.
    #[error("Rate limited by {source_name}: retry after {retry_after:?}")]
    RateLimited {
        /// The source that rate limited the request.
        source_name: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested symbol was not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No annual filing is available for the requested symbol and year.
    #[error("Data not available for {symbol} in fiscal year {year}")]
    DataNotAvailable {
        /// The symbol that was requested.
        symbol: String,
        /// The fiscal year that was requested.
        year: i32,
    },

    /// Error parsing data from a source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A statement payload did not decode to a list of period reports.
    #[error("Malformed {kind} statement JSON: {reason}")]
    MalformedPeriodJson {
        /// Statement the payload belonged to.
        kind: StatementKind,
        /// Decoder message.
        reason: String,
    },

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The requested source is not configured.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for FiscalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias using [`FiscalError`].
pub type Result<T> = std::result::Result<T, FiscalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_statement() {
        let err = FiscalError::MalformedPeriodJson {
            kind: StatementKind::Balance,
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed balance sheet statement JSON: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_data_not_available_display() {
        let err = FiscalError::DataNotAvailable {
            symbol: "AAPL".to_string(),
            year: 2021,
        };
        assert_eq!(
            err.to_string(),
            "Data not available for AAPL in fiscal year 2021"
        );
    }
}

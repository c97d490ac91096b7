//! Core data types for financial rows.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`FinancialRow`] - One company-period row from the financials API
//! - [`CompanyInfo`] - Company reference information

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::statement::{PeriodType, StatementKind};

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation and deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One company-period row as served by the financials API.
///
/// Each statement field holds either a JSON-encoded string of
/// [`PeriodReport`](crate::PeriodReport)s, an inline array of them, or null.
/// Payloads are decoded lazily by the resolver so that one malformed
/// statement never prevents the others from resolving.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRow {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Company display name.
    #[serde(default, alias = "companyName")]
    pub company_name: Option<String>,
    /// Listing exchange.
    #[serde(default, alias = "listedExchange")]
    pub listed_exchange: Option<String>,
    /// Fiscal year of the filing.
    pub year: i32,
    /// Fiscal quarter; `0` is the annual filing.
    #[serde(default)]
    pub quarter: u8,
    /// Income statement payload.
    #[serde(default)]
    pub income_statement: Value,
    /// Balance sheet payload.
    #[serde(default)]
    pub balance_sheet: Value,
    /// Cash flow statement payload.
    #[serde(default)]
    pub cash_flow: Value,
}

impl FinancialRow {
    /// Creates an annual row with empty statements.
    #[must_use]
    pub fn annual(ticker: impl Into<Symbol>, year: i32) -> Self {
        Self {
            ticker: ticker.into(),
            year,
            ..Default::default()
        }
    }

    /// Sets the company name.
    #[must_use]
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Sets one statement payload.
    #[must_use]
    pub fn with_statement(mut self, kind: StatementKind, payload: Value) -> Self {
        *self.statement_mut(kind) = payload;
        self
    }

    /// Returns the period type of this row.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        PeriodType::from_quarter(self.quarter)
    }

    /// Returns true if this row is the annual (quarter `0`) filing.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        self.quarter == 0
    }

    /// Returns the raw payload of one statement.
    #[must_use]
    pub const fn statement(&self, kind: StatementKind) -> &Value {
        match kind {
            StatementKind::Income => &self.income_statement,
            StatementKind::Balance => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    fn statement_mut(&mut self, kind: StatementKind) -> &mut Value {
        match kind {
            StatementKind::Income => &mut self.income_statement,
            StatementKind::Balance => &mut self.balance_sheet,
            StatementKind::CashFlow => &mut self.cash_flow,
        }
    }

    /// Builds company reference information from this row.
    #[must_use]
    pub fn company_info(&self) -> CompanyInfo {
        let mut info = CompanyInfo::new(
            self.ticker.clone(),
            self.company_name
                .clone()
                .unwrap_or_else(|| self.ticker.to_string()),
        );
        info.exchange = self.listed_exchange.clone();
        info
    }
}

/// Company reference information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Company name.
    pub name: String,
    /// Listing exchange.
    pub exchange: Option<String>,
}

impl CompanyInfo {
    /// Creates new company info with required fields.
    #[must_use]
    pub fn new(symbol: Symbol, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
            exchange: None,
        }
    }

    /// Sets the listing exchange.
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("aapl ");
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn test_symbol_deserializes_uppercase() {
        let symbol: Symbol = serde_json::from_str(r#""msft""#).unwrap();
        assert_eq!(symbol, Symbol::new("MSFT"));
    }

    #[test]
    fn test_row_accepts_both_company_name_spellings() {
        let snake = r#"{"ticker": "AAPL", "company_name": "Apple Inc.", "year": 2021, "quarter": 0}"#;
        let camel = r#"{"ticker": "AAPL", "companyName": "Apple Inc.", "year": 2021, "quarter": 0}"#;
        let a: FinancialRow = serde_json::from_str(snake).unwrap();
        let b: FinancialRow = serde_json::from_str(camel).unwrap();
        assert_eq!(a.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(a, b);
        assert!(a.is_annual());
        assert!(a.income_statement.is_null());
    }

    #[test]
    fn test_company_info_falls_back_to_ticker() {
        let row = FinancialRow::annual("ibm", 2020);
        let info = row.company_info();
        assert_eq!(info.name, "IBM");
        assert_eq!(info.exchange, None);
    }
}

//! Statement kind and period type definitions.
//!
//! This module defines [`StatementKind`] for the three financial statements
//! carried by each row and [`PeriodType`] for the filing period.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three financial statements carried by a [`FinancialRow`](crate::FinancialRow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Income statement (revenue, expenses, net income).
    Income,
    /// Balance sheet (assets, liabilities, equity, share counts).
    Balance,
    /// Cash flow statement.
    CashFlow,
}

impl StatementKind {
    /// All statement kinds in resolution order.
    pub const ALL: [Self; 3] = [Self::Income, Self::Balance, Self::CashFlow];

    /// Returns the wire field name of this statement on a financial row.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Income => "income_statement",
            Self::Balance => "balance_sheet",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Income => "income",
            Self::Balance => "balance sheet",
            Self::CashFlow => "cash flow",
        };
        f.write_str(name)
    }
}

/// Period type for a filed row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual reporting period (quarter `0`).
    #[default]
    Annual,
    /// Quarterly reporting period (quarters `1`-`4`).
    Quarterly,
}

impl PeriodType {
    /// Classifies a row by its quarter number. Quarter `0` is the annual filing.
    #[must_use]
    pub const fn from_quarter(quarter: u8) -> Self {
        if quarter == 0 {
            Self::Annual
        } else {
            Self::Quarterly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_type_from_quarter() {
        assert_eq!(PeriodType::from_quarter(0), PeriodType::Annual);
        assert_eq!(PeriodType::from_quarter(3), PeriodType::Quarterly);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(StatementKind::Income.field_name(), "income_statement");
        assert_eq!(StatementKind::Balance.field_name(), "balance_sheet");
        assert_eq!(StatementKind::CashFlow.field_name(), "cash_flow");
    }
}

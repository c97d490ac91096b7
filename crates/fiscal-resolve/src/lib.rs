#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fiscal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Canonical metric resolution for XBRL-tagged financial statements.
//!
//! # Example
//!
//! ```
//! use fiscal_core::{Fact, FactMap};
//! use fiscal_resolve::{Metric, resolve_balance, resolve_metric};
//!
//! let facts = FactMap::new()
//!     .with("us-gaap_Assets", Fact::new("Total assets", 1000.0))
//!     .with("us-gaap_Liabilities", Fact::new("Total liabilities", 400.0));
//!
//! assert_eq!(resolve_metric(&facts, Metric::TotalAssets), Some(1000.0));
//!
//! let balance = resolve_balance(&facts);
//! assert_eq!(balance.total_equity, Some(600.0));
//! ```

/// Balance-sheet identity derivation.
pub mod balance;
/// Candidate tables for canonical metrics.
pub mod concepts;
/// Statement-level resolution for financial rows.
pub mod extract;
/// Statement payload parsing and fiscal-period selection.
pub mod period;
/// Ratios derived from resolved base metrics.
pub mod ratios;
/// Concept, exact-label and keyword resolution.
pub mod resolver;
/// Share-count extraction from balance-sheet labels.
pub mod shares;

pub use balance::{BalanceIdentity, BalanceLine, derive_balance_identity};
pub use concepts::{Metric, MetricCandidates, OPERATING_EXPENSE_COMPONENTS};
pub use extract::{
    annual_row_for_year, annual_rows, assemble_snapshot, available_years, build_series,
    resolve_balance, resolve_cash_flow, resolve_income, resolve_report, resolve_statement,
    resolve_year, series_from, snapshot,
};
pub use period::{parse_reports, select_report, try_parse_reports};
pub use ratios::{
    book_value_per_share, derive_ratios, effective_tax_rate, free_cash_flow, net_profit_margin,
};
pub use resolver::{
    resolve_by_concept, resolve_by_exact_label, resolve_by_label_keyword, resolve_metric,
    resolve_operating_expense,
};
pub use shares::{ShareCountMatch, SharePattern, extract_shares_outstanding, find_share_count};

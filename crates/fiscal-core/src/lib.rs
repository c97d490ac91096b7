#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fiscal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for canonical financial metric resolution.
//!
//! This crate provides the foundational abstractions shared by the resolver,
//! the cache and the HTTP source:
//!
//! - [`FactMap`](report::FactMap) - Ordered per-period mapping of concept keys to facts
//! - [`PeriodReport`](report::PeriodReport) - One filed statement for one fiscal period
//! - [`FinancialRow`](types::FinancialRow) - One company-year row from the financials API
//! - [`CanonicalMetricSet`](metrics::CanonicalMetricSet) - Resolved metrics for one year
//! - [`FinancialRowSource`](provider::FinancialRowSource) - Source of financial rows
//! - [`MetricsCache`](cache::MetricsCache) - Caching abstraction

/// Cache trait and types for storing fetched rows and resolved statements.
pub mod cache;
/// Error types for fetch and resolution operations.
pub mod error;
/// Resolved metric records and chart series points.
pub mod metrics;
/// Concept-key and label normalization.
pub mod normalize;
/// Provider traits for fetching financial rows.
pub mod provider;
/// Period reports and their fact maps.
pub mod report;
/// Statement kind and period type definitions.
pub mod statement;
/// Core data types (Symbol, FinancialRow, CompanyInfo).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{CacheStatus, MetricsCache};
pub use error::{FiscalError, Result};
pub use metrics::{
    BalanceMetrics, BalancePoint, CanonicalMetricSet, CashChangePoint, CashFlowMetrics,
    DerivedRatios, FinancialSnapshot, IncomeMetrics, MetricSeries, RevenueIncomePoint,
    StatementMetrics,
};
pub use normalize::{normalize_concept_key, normalize_label};
pub use provider::{DataProvider, FinancialRowSource};
pub use report::{Fact, FactMap, PeriodReport};
pub use statement::{PeriodType, StatementKind};
pub use types::{CompanyInfo, FinancialRow, Symbol};

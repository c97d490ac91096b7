//! Statement-level resolution for financial rows.
//!
//! Each statement kind of a row is decoded and resolved on its own, so a
//! malformed balance sheet never hides the income statement of the same year.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use fiscal_core::{
    BalanceMetrics, CanonicalMetricSet, CashFlowMetrics, FactMap, FinancialRow,
    FinancialSnapshot, IncomeMetrics, MetricSeries, PeriodReport, StatementKind,
    StatementMetrics, Symbol,
};

use crate::balance::derive_balance_identity;
use crate::concepts::Metric;
use crate::period::{parse_reports, select_report};
use crate::ratios::derive_ratios;
use crate::resolver::{resolve_metric, resolve_operating_expense};
use crate::shares::extract_shares_outstanding;

/// Resolves income statement metrics from one report's facts.
#[must_use]
pub fn resolve_income(facts: &FactMap) -> IncomeMetrics {
    IncomeMetrics {
        revenue: resolve_metric(facts, Metric::Revenue),
        cost_of_revenue: resolve_metric(facts, Metric::CostOfRevenue),
        gross_profit: resolve_metric(facts, Metric::GrossProfit),
        operating_expense: resolve_operating_expense(facts),
        operating_income: resolve_metric(facts, Metric::OperatingIncome),
        pre_tax_income: resolve_metric(facts, Metric::PreTaxIncome),
        income_tax: resolve_metric(facts, Metric::IncomeTax),
        net_income: resolve_metric(facts, Metric::NetIncome),
        eps_basic: resolve_metric(facts, Metric::EpsBasic),
        eps_diluted: resolve_metric(facts, Metric::EpsDiluted),
    }
}

/// Resolves balance sheet metrics from one report's facts.
///
/// Totals are resolved independently, then completed through the balance
/// identity. Shares come from labels first, then from tagged concepts.
#[must_use]
pub fn resolve_balance(facts: &FactMap) -> BalanceMetrics {
    let identity = derive_balance_identity(
        resolve_metric(facts, Metric::TotalAssets),
        resolve_metric(facts, Metric::TotalLiabilities),
        resolve_metric(facts, Metric::TotalEquity),
    );
    if let Some(line) = identity.derived {
        debug!(?line, "derived balance total from the identity");
    }

    BalanceMetrics {
        total_assets: identity.assets,
        total_liabilities: identity.liabilities,
        total_equity: identity.equity,
        preferred_equity: resolve_metric(facts, Metric::PreferredEquity),
        shares_outstanding: extract_shares_outstanding(facts)
            .or_else(|| resolve_metric(facts, Metric::SharesOutstanding)),
    }
}

/// Resolves cash flow metrics from one report's facts.
#[must_use]
pub fn resolve_cash_flow(facts: &FactMap) -> CashFlowMetrics {
    CashFlowMetrics {
        net_operating_cash_flow: resolve_metric(facts, Metric::OperatingCashFlow),
        net_investing_cash_flow: resolve_metric(facts, Metric::InvestingCashFlow),
        net_financing_cash_flow: resolve_metric(facts, Metric::FinancingCashFlow),
        net_cash_change: resolve_metric(facts, Metric::NetCashChange),
        capex_outflows: resolve_metric(facts, Metric::CapexOutflows),
        capex_proceeds: resolve_metric(facts, Metric::CapexProceeds),
    }
}

/// Resolves one report as the given statement kind.
#[must_use]
pub fn resolve_report(kind: StatementKind, report: &PeriodReport) -> StatementMetrics {
    match kind {
        StatementKind::Income => StatementMetrics::Income(resolve_income(&report.facts)),
        StatementKind::Balance => StatementMetrics::Balance(resolve_balance(&report.facts)),
        StatementKind::CashFlow => StatementMetrics::CashFlow(resolve_cash_flow(&report.facts)),
    }
}

/// Resolves one statement of a row for a fiscal year.
///
/// Returns `None` when the payload is missing or malformed, or when no
/// report ends in `year`.
#[must_use]
pub fn resolve_statement(
    row: &FinancialRow,
    kind: StatementKind,
    year: i32,
) -> Option<StatementMetrics> {
    let reports = parse_reports(kind, row.statement(kind));
    let Some(report) = select_report(&reports, year) else {
        debug!(ticker = %row.ticker, %kind, year, "no report for year");
        return None;
    };
    Some(resolve_report(kind, report))
}

/// Resolves all three statements of a row for a fiscal year.
#[instrument(skip(row), fields(ticker = %row.ticker))]
#[must_use]
pub fn resolve_year(row: &FinancialRow, year: i32) -> CanonicalMetricSet {
    let statements: Vec<StatementMetrics> = StatementKind::ALL
        .iter()
        .filter_map(|kind| resolve_statement(row, *kind, year))
        .collect();
    CanonicalMetricSet::from_statements(&statements)
}

/// Resolves a row's own fiscal year and derives ratios.
#[must_use]
pub fn snapshot(row: &FinancialRow) -> FinancialSnapshot {
    assemble_snapshot(row, row.year, resolve_year(row, row.year))
}

/// Wraps already-resolved metrics for `year` into a snapshot of `row`'s
/// company, deriving the ratios.
#[must_use]
pub fn assemble_snapshot(
    row: &FinancialRow,
    year: i32,
    metrics: CanonicalMetricSet,
) -> FinancialSnapshot {
    FinancialSnapshot {
        symbol: row.ticker.clone(),
        company_name: row.company_name.clone(),
        year,
        ratios: derive_ratios(&metrics),
        metrics,
    }
}

/// Returns the annual (quarter `0`) rows.
pub fn annual_rows(rows: &[FinancialRow]) -> impl Iterator<Item = &FinancialRow> {
    rows.iter().filter(|row| row.is_annual())
}

/// Returns the first annual row for `year`.
#[must_use]
pub fn annual_row_for_year(rows: &[FinancialRow], year: i32) -> Option<&FinancialRow> {
    annual_rows(rows).find(|row| row.year == year)
}

/// Fiscal years with an annual row, ascending and deduplicated.
#[must_use]
pub fn available_years(rows: &[FinancialRow]) -> Vec<i32> {
    annual_rows(rows)
        .map(|row| row.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Builds the chart series for one ticker from its rows.
///
/// One point per year with an annual row; duplicate years use the first row.
#[must_use]
pub fn build_series(symbol: &Symbol, rows: &[FinancialRow]) -> MetricSeries {
    series_from(
        symbol,
        available_years(rows).into_iter().filter_map(|year| {
            annual_row_for_year(rows, year).map(|row| (year, resolve_year(row, year)))
        }),
    )
}

/// Builds a chart series from per-year metrics, sorted by year.
#[must_use]
pub fn series_from(
    symbol: &Symbol,
    years: impl IntoIterator<Item = (i32, CanonicalMetricSet)>,
) -> MetricSeries {
    let mut series = MetricSeries {
        symbol: symbol.clone(),
        ..Default::default()
    };
    for (year, metrics) in years {
        series.push(year, &metrics);
    }
    series.sort();
    series
}

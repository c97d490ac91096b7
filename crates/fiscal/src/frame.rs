//! Polars views of chart series.
//!
//! Every frame has an `i32` `year` column followed by nullable `f64` columns;
//! unresolved metrics become nulls.

use polars::prelude::{Column, DataFrame};

use fiscal_core::{CanonicalMetricSet, FiscalError, MetricSeries, Result};

fn build(columns: Vec<Column>) -> Result<DataFrame> {
    DataFrame::new(columns).map_err(|e| FiscalError::Other(e.to_string()))
}

/// `year`, `revenue`, `net_income`.
///
/// # Errors
///
/// Returns an error if polars rejects the columns.
pub fn revenue_income_frame(series: &MetricSeries) -> Result<DataFrame> {
    let points = &series.revenue_income;
    build(vec![
        Column::new("year".into(), points.iter().map(|p| p.year).collect::<Vec<i32>>()),
        Column::new(
            "revenue".into(),
            points.iter().map(|p| p.revenue).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "net_income".into(),
            points.iter().map(|p| p.net_income).collect::<Vec<Option<f64>>>(),
        ),
    ])
}

/// `year`, `assets`, `liabilities`, `equity`.
///
/// # Errors
///
/// Returns an error if polars rejects the columns.
pub fn balance_frame(series: &MetricSeries) -> Result<DataFrame> {
    let points = &series.balance;
    build(vec![
        Column::new("year".into(), points.iter().map(|p| p.year).collect::<Vec<i32>>()),
        Column::new(
            "assets".into(),
            points.iter().map(|p| p.assets).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "liabilities".into(),
            points.iter().map(|p| p.liabilities).collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "equity".into(),
            points.iter().map(|p| p.equity).collect::<Vec<Option<f64>>>(),
        ),
    ])
}

/// `year`, `net_change`.
///
/// # Errors
///
/// Returns an error if polars rejects the columns.
pub fn cash_change_frame(series: &MetricSeries) -> Result<DataFrame> {
    let points = &series.cash_change;
    build(vec![
        Column::new("year".into(), points.iter().map(|p| p.year).collect::<Vec<i32>>()),
        Column::new(
            "net_change".into(),
            points.iter().map(|p| p.net_change).collect::<Vec<Option<f64>>>(),
        ),
    ])
}

/// One row per year with every canonical metric as a column.
///
/// # Errors
///
/// Returns an error if polars rejects the columns.
pub fn metrics_frame(years: &[(i32, CanonicalMetricSet)]) -> Result<DataFrame> {
    let column = |name: &str, get: fn(&CanonicalMetricSet) -> Option<f64>| {
        Column::new(
            name.into(),
            years.iter().map(|(_, m)| get(m)).collect::<Vec<Option<f64>>>(),
        )
    };

    build(vec![
        Column::new("year".into(), years.iter().map(|(y, _)| *y).collect::<Vec<i32>>()),
        column("revenue", |m| m.revenue),
        column("net_income", |m| m.net_income),
        column("total_assets", |m| m.total_assets),
        column("total_liabilities", |m| m.total_liabilities),
        column("total_equity", |m| m.total_equity),
        column("operating_expense", |m| m.operating_expense),
        column("income_tax", |m| m.income_tax),
        column("pre_tax_income", |m| m.pre_tax_income),
        column("earnings_per_share_basic", |m| m.earnings_per_share_basic),
        column("shares_outstanding", |m| m.shares_outstanding),
        column("net_operating_cash_flow", |m| m.net_operating_cash_flow),
        column("net_investing_cash_flow", |m| m.net_investing_cash_flow),
        column("net_financing_cash_flow", |m| m.net_financing_cash_flow),
        column("net_cash_change", |m| m.net_cash_change),
        column("capex", |m| m.capex),
    ])
}

//! Ratios derived from resolved base metrics.
//!
//! Every ratio is `None` when an input is unresolved or a denominator is zero.
//! Non-finite results never leave this module.

use fiscal_core::{CanonicalMetricSet, DerivedRatios};

/// Divides, returning `None` for a zero denominator or a non-finite result.
fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `numerator / denominator * 100`.
fn percent(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    checked_div(numerator? * 100.0, denominator?)
}

/// Net income over revenue, in percent.
#[must_use]
pub fn net_profit_margin(net_income: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    percent(net_income, revenue)
}

/// Income tax over pre-tax income, in percent.
///
/// The sign is kept: a tax benefit on a pre-tax profit yields a negative rate.
#[must_use]
pub fn effective_tax_rate(income_tax: Option<f64>, pre_tax_income: Option<f64>) -> Option<f64> {
    percent(income_tax, pre_tax_income)
}

/// Common equity per share. Preferred equity counts as zero when unresolved.
#[must_use]
pub fn book_value_per_share(
    total_equity: Option<f64>,
    preferred_equity: Option<f64>,
    shares_outstanding: Option<f64>,
) -> Option<f64> {
    let shares = shares_outstanding.filter(|s| *s > 0.0)?;
    checked_div(total_equity? - preferred_equity.unwrap_or(0.0), shares)
}

/// Operating cash flow less the magnitude of net capex.
///
/// `net_capex` is the signed sum of outflows and disposal proceeds; pass
/// `None` when neither component resolved.
#[must_use]
pub fn free_cash_flow(operating_cash_flow: Option<f64>, net_capex: Option<f64>) -> Option<f64> {
    finite(operating_cash_flow? - net_capex?.abs())
}

/// Computes every ratio available from a metric set.
#[must_use]
pub fn derive_ratios(metrics: &CanonicalMetricSet) -> DerivedRatios {
    DerivedRatios {
        net_profit_margin: net_profit_margin(metrics.net_income, metrics.revenue),
        effective_tax_rate: effective_tax_rate(metrics.income_tax, metrics.pre_tax_income),
        book_value_per_share: book_value_per_share(
            metrics.total_equity,
            metrics.preferred_equity,
            metrics.shares_outstanding,
        ),
        free_cash_flow: free_cash_flow(metrics.net_operating_cash_flow, metrics.capex),
        gross_margin: percent(metrics.gross_profit, metrics.revenue),
        operating_margin: percent(metrics.operating_income, metrics.revenue),
        return_on_equity: percent(metrics.net_income, metrics.total_equity),
        return_on_assets: percent(metrics.net_income, metrics.total_assets),
        debt_to_equity: metrics
            .total_liabilities
            .zip(metrics.total_equity)
            .and_then(|(liabilities, equity)| checked_div(liabilities, equity)),
    }
}

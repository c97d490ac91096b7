//! Resolved metric records and chart series points.
//!
//! Every metric is an `Option<f64>`: `None` means the metric could not be
//! resolved from the filing. Nothing at this layer defaults to zero; that is a
//! presentation decision.

use serde::{Deserialize, Serialize};

use crate::statement::StatementKind;
use crate::types::Symbol;

/// Metrics resolved from one income statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeMetrics {
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Cost of revenue (COGS).
    pub cost_of_revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Operating expense, reported total or sum of components.
    pub operating_expense: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Income before income taxes.
    pub pre_tax_income: Option<f64>,
    /// Income tax expense.
    pub income_tax: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Basic earnings per share.
    pub eps_basic: Option<f64>,
    /// Diluted earnings per share.
    pub eps_diluted: Option<f64>,
}

/// Metrics resolved from one balance sheet, after identity derivation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceMetrics {
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total stockholders' equity.
    pub total_equity: Option<f64>,
    /// Preferred stock carrying value.
    pub preferred_equity: Option<f64>,
    /// Common shares outstanding.
    pub shares_outstanding: Option<f64>,
}

/// Metrics resolved from one cash flow statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowMetrics {
    /// Net cash from operating activities.
    pub net_operating_cash_flow: Option<f64>,
    /// Net cash from investing activities.
    pub net_investing_cash_flow: Option<f64>,
    /// Net cash from financing activities.
    pub net_financing_cash_flow: Option<f64>,
    /// Net change in cash and equivalents.
    pub net_cash_change: Option<f64>,
    /// Payments for capital assets (conventionally negative).
    pub capex_outflows: Option<f64>,
    /// Proceeds from disposals of capital assets (conventionally positive).
    pub capex_proceeds: Option<f64>,
}

impl CashFlowMetrics {
    /// Signed sum of the capex components that resolved.
    ///
    /// Returns `None` only when neither component resolved.
    #[must_use]
    pub fn net_capex(&self) -> Option<f64> {
        match (self.capex_outflows, self.capex_proceeds) {
            (Some(out), Some(proceeds)) => Some(out + proceeds),
            (Some(out), None) => Some(out),
            (None, Some(proceeds)) => Some(proceeds),
            (None, None) => None,
        }
    }
}

/// Resolved metrics for one statement kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementMetrics {
    /// Income statement metrics.
    Income(IncomeMetrics),
    /// Balance sheet metrics.
    Balance(BalanceMetrics),
    /// Cash flow statement metrics.
    CashFlow(CashFlowMetrics),
}

impl StatementMetrics {
    /// Returns the statement kind these metrics came from.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Income(_) => StatementKind::Income,
            Self::Balance(_) => StatementKind::Balance,
            Self::CashFlow(_) => StatementKind::CashFlow,
        }
    }
}

/// Canonical metrics for one company and fiscal year.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMetricSet {
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total stockholders' equity.
    pub total_equity: Option<f64>,
    /// Operating expense.
    pub operating_expense: Option<f64>,
    /// Income tax expense.
    pub income_tax: Option<f64>,
    /// Income before income taxes.
    pub pre_tax_income: Option<f64>,
    /// Basic earnings per share.
    pub earnings_per_share_basic: Option<f64>,
    /// Common shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Net cash from operating activities.
    pub net_operating_cash_flow: Option<f64>,
    /// Net cash from investing activities.
    pub net_investing_cash_flow: Option<f64>,
    /// Net cash from financing activities.
    pub net_financing_cash_flow: Option<f64>,
    /// Net change in cash and equivalents.
    pub net_cash_change: Option<f64>,
    /// Net capital expenditure (outflows plus disposal proceeds, signed).
    pub capex: Option<f64>,
    /// Cost of revenue (COGS).
    pub cost_of_revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Diluted earnings per share.
    pub earnings_per_share_diluted: Option<f64>,
    /// Preferred stock carrying value.
    pub preferred_equity: Option<f64>,
}

impl CanonicalMetricSet {
    /// Merges one statement's metrics into this set.
    pub fn apply(&mut self, metrics: &StatementMetrics) {
        match metrics {
            StatementMetrics::Income(m) => {
                self.revenue = m.revenue;
                self.cost_of_revenue = m.cost_of_revenue;
                self.gross_profit = m.gross_profit;
                self.operating_expense = m.operating_expense;
                self.operating_income = m.operating_income;
                self.pre_tax_income = m.pre_tax_income;
                self.income_tax = m.income_tax;
                self.net_income = m.net_income;
                self.earnings_per_share_basic = m.eps_basic;
                self.earnings_per_share_diluted = m.eps_diluted;
            }
            StatementMetrics::Balance(m) => {
                self.total_assets = m.total_assets;
                self.total_liabilities = m.total_liabilities;
                self.total_equity = m.total_equity;
                self.preferred_equity = m.preferred_equity;
                self.shares_outstanding = m.shares_outstanding;
            }
            StatementMetrics::CashFlow(m) => {
                self.net_operating_cash_flow = m.net_operating_cash_flow;
                self.net_investing_cash_flow = m.net_investing_cash_flow;
                self.net_financing_cash_flow = m.net_financing_cash_flow;
                self.net_cash_change = m.net_cash_change;
                self.capex = m.net_capex();
            }
        }
    }

    /// Builds a set from per-statement metrics. Missing statements leave
    /// their fields unresolved.
    #[must_use]
    pub fn from_statements<'a>(statements: impl IntoIterator<Item = &'a StatementMetrics>) -> Self {
        let mut set = Self::default();
        for metrics in statements {
            set.apply(metrics);
        }
        set
    }
}

/// Ratios derived from a [`CanonicalMetricSet`].
///
/// Percentages are expressed as percent (15.0 means 15%).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRatios {
    /// Net income over revenue, in percent.
    pub net_profit_margin: Option<f64>,
    /// Income tax over pre-tax income, in percent, sign preserved.
    pub effective_tax_rate: Option<f64>,
    /// Common equity per share outstanding.
    pub book_value_per_share: Option<f64>,
    /// Operating cash flow less the magnitude of net capex.
    pub free_cash_flow: Option<f64>,
    /// Gross profit over revenue, in percent.
    pub gross_margin: Option<f64>,
    /// Operating income over revenue, in percent.
    pub operating_margin: Option<f64>,
    /// Net income over equity, in percent.
    pub return_on_equity: Option<f64>,
    /// Net income over assets, in percent.
    pub return_on_assets: Option<f64>,
    /// Total liabilities over equity.
    pub debt_to_equity: Option<f64>,
}

/// Everything resolved for one ticker and fiscal year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Company display name, when the row carried one.
    pub company_name: Option<String>,
    /// Fiscal year.
    pub year: i32,
    /// Canonical metrics.
    pub metrics: CanonicalMetricSet,
    /// Derived ratios.
    pub ratios: DerivedRatios,
}

/// Revenue and net income for one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueIncomePoint {
    /// Fiscal year.
    pub year: i32,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
}

/// Balance sheet totals for one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Fiscal year.
    pub year: i32,
    /// Total assets.
    pub assets: Option<f64>,
    /// Total liabilities.
    pub liabilities: Option<f64>,
    /// Total equity.
    pub equity: Option<f64>,
}

/// Net change in cash for one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashChangePoint {
    /// Fiscal year.
    pub year: i32,
    /// Net change in cash and equivalents.
    pub net_change: Option<f64>,
}

/// Multi-year chart series for one ticker, each sorted by year.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Revenue and net income per year.
    pub revenue_income: Vec<RevenueIncomePoint>,
    /// Assets, liabilities and equity per year.
    pub balance: Vec<BalancePoint>,
    /// Net cash change per year.
    pub cash_change: Vec<CashChangePoint>,
}

impl MetricSeries {
    /// Appends one year's points from a resolved metric set.
    pub fn push(&mut self, year: i32, metrics: &CanonicalMetricSet) {
        self.revenue_income.push(RevenueIncomePoint {
            year,
            revenue: metrics.revenue,
            net_income: metrics.net_income,
        });
        self.balance.push(BalancePoint {
            year,
            assets: metrics.total_assets,
            liabilities: metrics.total_liabilities,
            equity: metrics.total_equity,
        });
        self.cash_change.push(CashChangePoint {
            year,
            net_change: metrics.net_cash_change,
        });
    }

    /// Sorts all series by year.
    pub fn sort(&mut self) {
        self.revenue_income.sort_by_key(|p| p.year);
        self.balance.sort_by_key(|p| p.year);
        self.cash_change.sort_by_key(|p| p.year);
    }

    /// Returns the number of years covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revenue_income.len()
    }

    /// Returns true if no years are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revenue_income.is_empty()
    }
}

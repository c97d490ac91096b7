//! Candidate tables for canonical metrics.
//!
//! Different filers report the same figure under different taxonomy concepts
//! and different display labels. Each [`Metric`] owns one static table listing
//! its candidates in priority order: the first candidate present wins, so the
//! most specific concept comes first.

use fiscal_core::StatementKind;

/// A canonical metric the resolver knows how to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total revenue.
    Revenue,
    /// Cost of revenue.
    CostOfRevenue,
    /// Gross profit.
    GrossProfit,
    /// Reported total operating expense.
    OperatingExpense,
    /// Selling, general and administrative expense.
    SellingGeneralAdministrative,
    /// General and administrative expense reported on its own.
    GeneralAdministrative,
    /// Research and development expense.
    ResearchDevelopment,
    /// Selling, marketing and advertising expense.
    MarketingAdvertising,
    /// Amortization of intangible assets.
    Amortization,
    /// Restructuring charges.
    Restructuring,
    /// Operating income.
    OperatingIncome,
    /// Income before income taxes.
    PreTaxIncome,
    /// Income tax expense.
    IncomeTax,
    /// Net income.
    NetIncome,
    /// Basic earnings per share.
    EpsBasic,
    /// Diluted earnings per share.
    EpsDiluted,
    /// Total assets.
    TotalAssets,
    /// Total liabilities.
    TotalLiabilities,
    /// Total stockholders' equity.
    TotalEquity,
    /// Preferred stock carrying value.
    PreferredEquity,
    /// Common shares outstanding, as a tagged concept.
    SharesOutstanding,
    /// Net cash from operating activities.
    OperatingCashFlow,
    /// Net cash from investing activities.
    InvestingCashFlow,
    /// Net cash from financing activities.
    FinancingCashFlow,
    /// Net change in cash.
    NetCashChange,
    /// Payments for capital assets.
    CapexOutflows,
    /// Proceeds from disposal of capital assets.
    CapexProceeds,
}

/// Candidate lists for one metric.
#[derive(Debug)]
pub struct MetricCandidates {
    /// Taxonomy concept identifiers, most preferred first.
    pub concepts: &'static [&'static str],
    /// Exact display labels, most preferred first.
    pub labels: &'static [&'static str],
    /// Lowercase label substrings for the fuzzy fallback.
    pub keywords: &'static [&'static str],
    /// Whether a resolved zero keeps searching later tiers.
    pub zero_triggers_fallback: bool,
}

/// Components summed when no total operating expense line is reported.
pub const OPERATING_EXPENSE_COMPONENTS: &[Metric] = &[
    Metric::SellingGeneralAdministrative,
    Metric::GeneralAdministrative,
    Metric::ResearchDevelopment,
    Metric::MarketingAdvertising,
    Metric::Amortization,
    Metric::Restructuring,
];

impl Metric {
    /// Returns the statement this metric is reported on.
    #[must_use]
    pub const fn statement(self) -> StatementKind {
        match self {
            Self::TotalAssets
            | Self::TotalLiabilities
            | Self::TotalEquity
            | Self::PreferredEquity
            | Self::SharesOutstanding => StatementKind::Balance,
            Self::OperatingCashFlow
            | Self::InvestingCashFlow
            | Self::FinancingCashFlow
            | Self::NetCashChange
            | Self::CapexOutflows
            | Self::CapexProceeds => StatementKind::CashFlow,
            _ => StatementKind::Income,
        }
    }

    /// Returns the candidate table for this metric.
    #[must_use]
    pub fn candidates(self) -> &'static MetricCandidates {
        match self {
            Self::Revenue => &REVENUE,
            Self::CostOfRevenue => &COST_OF_REVENUE,
            Self::GrossProfit => &GROSS_PROFIT,
            Self::OperatingExpense => &OPERATING_EXPENSE,
            Self::SellingGeneralAdministrative => &SELLING_GENERAL_ADMINISTRATIVE,
            Self::GeneralAdministrative => &GENERAL_ADMINISTRATIVE,
            Self::ResearchDevelopment => &RESEARCH_DEVELOPMENT,
            Self::MarketingAdvertising => &MARKETING_ADVERTISING,
            Self::Amortization => &AMORTIZATION,
            Self::Restructuring => &RESTRUCTURING,
            Self::OperatingIncome => &OPERATING_INCOME,
            Self::PreTaxIncome => &PRE_TAX_INCOME,
            Self::IncomeTax => &INCOME_TAX,
            Self::NetIncome => &NET_INCOME,
            Self::EpsBasic => &EPS_BASIC,
            Self::EpsDiluted => &EPS_DILUTED,
            Self::TotalAssets => &TOTAL_ASSETS,
            Self::TotalLiabilities => &TOTAL_LIABILITIES,
            Self::TotalEquity => &TOTAL_EQUITY,
            Self::PreferredEquity => &PREFERRED_EQUITY,
            Self::SharesOutstanding => &SHARES_OUTSTANDING,
            Self::OperatingCashFlow => &OPERATING_CASH_FLOW,
            Self::InvestingCashFlow => &INVESTING_CASH_FLOW,
            Self::FinancingCashFlow => &FINANCING_CASH_FLOW,
            Self::NetCashChange => &NET_CASH_CHANGE,
            Self::CapexOutflows => &CAPEX_OUTFLOWS,
            Self::CapexProceeds => &CAPEX_PROCEEDS,
        }
    }
}

// =============================================================================
// Income Statement
// =============================================================================

static REVENUE: MetricCandidates = MetricCandidates {
    concepts: &[
        // Banks and utilities report their own totals
        "us-gaap_RevenuesNetOfInterestExpense",
        "us-gaap_RegulatedAndUnregulatedOperatingRevenue",
        "us-gaap_RevenueFromContractWithCustomerExcludingAssessedTax",
        "us-gaap_Revenues",
        "us-gaap_SalesRevenueNet",
        "us-gaap_RevenueFromContractWithCustomerIncludingAssessedTax",
        "us-gaap_SalesRevenueGoodsNet",
        "us-gaap_SalesRevenueServicesNet",
        "us-gaap_InterestAndDividendIncomeOperating",
        "us-gaap_ElectricUtilityRevenue",
        "us-gaap_OilAndGasRevenue",
        "us-gaap_RealEstateRevenueNet",
    ],
    labels: &[],
    keywords: &[
        "total revenue",
        "total net revenue",
        "net revenue",
        "total net sales",
        "net sales",
        "revenue",
        "sales",
    ],
    zero_triggers_fallback: true,
};

static COST_OF_REVENUE: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_CostOfRevenue",
        "us-gaap_CostOfGoodsAndServicesSold",
        "us-gaap_CostOfGoodsSold",
        "us-gaap_CostOfServices",
    ],
    labels: &[
        "Total cost of revenue",
        "Total cost of revenues",
        "Cost of revenue",
        "Cost of revenues",
        "Total cost of sales",
        "Cost of sales",
        "Cost of goods sold",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static GROSS_PROFIT: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_GrossProfit"],
    labels: &["Gross profit", "Gross margin", "Total gross profit"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static OPERATING_EXPENSE: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_OperatingExpenses",
        "us-gaap_OperatingCostsAndExpenses",
    ],
    labels: &[
        "Total operating expenses",
        "Operating expenses",
        "Total operating costs and expenses",
        "Total costs and operating expenses",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static SELLING_GENERAL_ADMINISTRATIVE: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_SellingGeneralAndAdministrativeExpense"],
    labels: &[
        "Selling, general and administrative",
        "Selling, general and administrative expenses",
        "Selling, general and administrative expense",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static GENERAL_ADMINISTRATIVE: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_GeneralAndAdministrativeExpense"],
    labels: &["General and administrative", "General and administrative expenses"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static RESEARCH_DEVELOPMENT: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_ResearchAndDevelopmentExpense",
        "us-gaap_ResearchAndDevelopmentExpenseExcludingAcquiredInProcessCost",
    ],
    labels: &["Research and development", "Research and development expenses"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static MARKETING_ADVERTISING: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_SellingAndMarketingExpense",
        "us-gaap_MarketingAndAdvertisingExpense",
        "us-gaap_AdvertisingExpense",
        "us-gaap_MarketingExpense",
    ],
    labels: &[
        "Sales and marketing",
        "Selling and marketing",
        "Marketing",
        "Advertising",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static AMORTIZATION: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_AmortizationOfIntangibleAssets"],
    labels: &[
        "Amortization of intangible assets",
        "Amortization of acquired intangible assets",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static RESTRUCTURING: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_RestructuringCharges",
        "us-gaap_RestructuringSettlementAndImpairmentProvisions",
    ],
    labels: &["Restructuring charges", "Restructuring"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static OPERATING_INCOME: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_OperatingIncomeLoss"],
    labels: &[
        "Operating income",
        "Operating income (loss)",
        "Income from operations",
        "Income (loss) from operations",
        "Operating loss",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static PRE_TAX_INCOME: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest",
        "us-gaap_IncomeLossFromContinuingOperationsBeforeIncomeTaxesMinorityInterestAndIncomeLossFromEquityMethodInvestments",
        "us-gaap_IncomeLossFromContinuingOperationsBeforeIncomeTaxesDomestic",
    ],
    labels: &[
        "Income before income taxes",
        "Income before provision for income taxes",
        "Income (loss) before income taxes",
        "Earnings before income taxes",
        "Loss before income taxes",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static INCOME_TAX: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_IncomeTaxExpenseBenefit"],
    labels: &[
        "Provision for income taxes",
        "Income tax expense",
        "Income tax expense (benefit)",
        "Income tax provision",
        "Provision for (benefit from) income taxes",
        "Benefit from income taxes",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static NET_INCOME: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_NetIncomeLoss",
        "us-gaap_NetIncomeLossAvailableToCommonStockholdersBasic",
        "us-gaap_ProfitLoss",
        "us-gaap_IncomeLossFromContinuingOperations",
    ],
    labels: &[],
    keywords: &[
        "net income",
        "net earnings",
        "net (loss) income",
        "net loss",
    ],
    zero_triggers_fallback: true,
};

static EPS_BASIC: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_EarningsPerShareBasic",
        "us-gaap_EarningsPerShareBasicAndDiluted",
        "us-gaap_IncomeLossFromContinuingOperationsPerBasicShare",
    ],
    labels: &[
        "Basic (in dollars per share)",
        "Basic (in usd per share)",
        "Basic earnings per share",
        "Earnings per share, basic",
        "Net income per share, basic",
        "Basic",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static EPS_DILUTED: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_EarningsPerShareDiluted",
        "us-gaap_EarningsPerShareBasicAndDiluted",
        "us-gaap_IncomeLossFromContinuingOperationsPerDilutedShare",
    ],
    labels: &[
        "Diluted (in dollars per share)",
        "Diluted (in usd per share)",
        "Diluted earnings per share",
        "Earnings per share, diluted",
        "Net income per share, diluted",
        "Diluted",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

// =============================================================================
// Balance Sheet
// =============================================================================

static TOTAL_ASSETS: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_Assets", "us-gaap_LiabilitiesAndStockholdersEquity"],
    labels: &["Total assets", "Assets, total"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static TOTAL_LIABILITIES: MetricCandidates = MetricCandidates {
    concepts: &["us-gaap_Liabilities"],
    labels: &["Total liabilities", "Liabilities, total"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static TOTAL_EQUITY: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_StockholdersEquity",
        "us-gaap_StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
    ],
    labels: &[
        "Total stockholders' equity",
        "Total shareholders' equity",
        "Total stockholders' equity (deficit)",
        "Total shareholders' equity (deficit)",
        "Total stockholders' deficit",
        "Total shareholders' deficit",
        "Total equity",
        "Stockholders' equity",
        "Shareholders' equity",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static PREFERRED_EQUITY: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_PreferredStockValue",
        "us-gaap_PreferredStockValueOutstanding",
    ],
    labels: &["Preferred stock", "Preferred stock, value"],
    keywords: &[],
    zero_triggers_fallback: false,
};

static SHARES_OUTSTANDING: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_CommonStockSharesOutstanding",
        "dei_EntityCommonStockSharesOutstanding",
    ],
    labels: &[],
    keywords: &[],
    zero_triggers_fallback: false,
};

// =============================================================================
// Cash Flow Statement
// =============================================================================

static OPERATING_CASH_FLOW: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_NetCashProvidedByUsedInOperatingActivities",
        "us-gaap_NetCashProvidedByUsedInOperatingActivitiesContinuingOperations",
    ],
    labels: &[
        "Net cash provided by (used in) operating activities",
        "Net cash provided by operating activities",
        "Net cash used in operating activities",
        "Net cash from operating activities",
        "Cash generated by operating activities",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static INVESTING_CASH_FLOW: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_NetCashProvidedByUsedInInvestingActivities",
        "us-gaap_NetCashProvidedByUsedInInvestingActivitiesContinuingOperations",
    ],
    labels: &[
        "Net cash provided by (used in) investing activities",
        "Net cash used in investing activities",
        "Net cash provided by investing activities",
        "Net cash from investing activities",
        "Cash generated by (used in) investing activities",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static FINANCING_CASH_FLOW: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_NetCashProvidedByUsedInFinancingActivities",
        "us-gaap_NetCashProvidedByUsedInFinancingActivitiesContinuingOperations",
    ],
    labels: &[
        "Net cash provided by (used in) financing activities",
        "Net cash used in financing activities",
        "Net cash provided by financing activities",
        "Net cash from financing activities",
        "Cash used in financing activities",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static NET_CASH_CHANGE: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalentsPeriodIncreaseDecreaseIncludingExchangeRateEffect",
        "us-gaap_CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalentsPeriodIncreaseDecreaseExcludingExchangeRateEffect",
        "us-gaap_CashAndCashEquivalentsPeriodIncreaseDecrease",
        "us-gaap_CashPeriodIncreaseDecrease",
    ],
    labels: &[
        "Net increase (decrease) in cash and cash equivalents",
        "Net change in cash and cash equivalents",
        "Increase (decrease) in cash and cash equivalents",
        "Net increase in cash and cash equivalents",
        "Net decrease in cash and cash equivalents",
        "Net increase (decrease) in cash, cash equivalents and restricted cash",
        "Net change in cash, cash equivalents and restricted cash",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static CAPEX_OUTFLOWS: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_PaymentsToAcquirePropertyPlantAndEquipment",
        "us-gaap_PaymentsToAcquireProductiveAssets",
        "us-gaap_PaymentsForCapitalImprovements",
        "us-gaap_PaymentsToAcquireOtherPropertyPlantAndEquipment",
    ],
    labels: &[
        "Capital expenditures",
        "Purchases of property and equipment",
        "Purchases of property, plant and equipment",
        "Payments for acquisition of property, plant and equipment",
        "Additions to property and equipment",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

static CAPEX_PROCEEDS: MetricCandidates = MetricCandidates {
    concepts: &[
        "us-gaap_ProceedsFromSaleOfPropertyPlantAndEquipment",
        "us-gaap_ProceedsFromSaleOfProductiveAssets",
    ],
    labels: &[
        "Proceeds from sale of property and equipment",
        "Proceeds from sales of property and equipment",
        "Proceeds from sale of property, plant and equipment",
        "Proceeds from sales of property, plant and equipment",
    ],
    keywords: &[],
    zero_triggers_fallback: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Metric] = &[
        Metric::Revenue,
        Metric::CostOfRevenue,
        Metric::GrossProfit,
        Metric::OperatingExpense,
        Metric::SellingGeneralAdministrative,
        Metric::GeneralAdministrative,
        Metric::ResearchDevelopment,
        Metric::MarketingAdvertising,
        Metric::Amortization,
        Metric::Restructuring,
        Metric::OperatingIncome,
        Metric::PreTaxIncome,
        Metric::IncomeTax,
        Metric::NetIncome,
        Metric::EpsBasic,
        Metric::EpsDiluted,
        Metric::TotalAssets,
        Metric::TotalLiabilities,
        Metric::TotalEquity,
        Metric::PreferredEquity,
        Metric::SharesOutstanding,
        Metric::OperatingCashFlow,
        Metric::InvestingCashFlow,
        Metric::FinancingCashFlow,
        Metric::NetCashChange,
        Metric::CapexOutflows,
        Metric::CapexProceeds,
    ];

    #[test]
    fn test_every_metric_has_concepts() {
        for metric in ALL {
            assert!(
                !metric.candidates().concepts.is_empty(),
                "{metric:?} has no concept candidates"
            );
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for metric in ALL {
            for keyword in metric.candidates().keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "{metric:?}");
            }
        }
    }

    #[test]
    fn test_only_headline_metrics_treat_zero_as_missing() {
        let flagged: Vec<&Metric> = ALL
            .iter()
            .filter(|m| m.candidates().zero_triggers_fallback)
            .collect();
        assert_eq!(flagged, vec![&Metric::Revenue, &Metric::NetIncome]);
    }

    #[test]
    fn test_statement_assignment() {
        assert_eq!(Metric::Revenue.statement(), StatementKind::Income);
        assert_eq!(Metric::TotalEquity.statement(), StatementKind::Balance);
        assert_eq!(Metric::CapexProceeds.statement(), StatementKind::CashFlow);
        for component in OPERATING_EXPENSE_COMPONENTS {
            assert_eq!(component.statement(), StatementKind::Income);
        }
    }
}

//! Balance-sheet identity derivation.
//!
//! `assets = liabilities + equity` holds by construction whenever at least two
//! of the three lines resolve on their own. With fewer than two the missing
//! lines stay unresolved.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Relative tolerance used when checking explicit lines against each other.
const IDENTITY_TOLERANCE: f64 = 1e-6;

/// A balance-sheet total line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceLine {
    /// Total assets.
    Assets,
    /// Total liabilities.
    Liabilities,
    /// Total equity.
    Equity,
}

/// Balance totals after identity derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceIdentity {
    /// Total assets.
    pub assets: Option<f64>,
    /// Total liabilities.
    pub liabilities: Option<f64>,
    /// Total equity.
    pub equity: Option<f64>,
    /// The line computed from the other two, if any.
    pub derived: Option<BalanceLine>,
}

impl BalanceIdentity {
    /// Returns true if all three lines are resolved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.assets.is_some() && self.liabilities.is_some() && self.equity.is_some()
    }
}

/// Fills in the missing total from the two that resolved explicitly.
///
/// Rules, in order:
/// 1. equity missing, assets and liabilities present: `equity = assets - liabilities`
/// 2. liabilities missing, assets and equity present: `liabilities = assets - equity`
/// 3. assets missing, liabilities and equity present: `assets = liabilities + equity`
///
/// Explicit values are never overwritten, even when they disagree.
#[must_use]
pub fn derive_balance_identity(
    assets: Option<f64>,
    liabilities: Option<f64>,
    equity: Option<f64>,
) -> BalanceIdentity {
    let mut identity = BalanceIdentity {
        assets,
        liabilities,
        equity,
        derived: None,
    };

    match (assets, liabilities, equity) {
        (Some(a), Some(l), None) => {
            identity.equity = Some(a - l);
            identity.derived = Some(BalanceLine::Equity);
        }
        (Some(a), None, Some(e)) => {
            identity.liabilities = Some(a - e);
            identity.derived = Some(BalanceLine::Liabilities);
        }
        (None, Some(l), Some(e)) => {
            identity.assets = Some(l + e);
            identity.derived = Some(BalanceLine::Assets);
        }
        (Some(a), Some(l), Some(e)) => {
            let gap = a - (l + e);
            if gap.abs() > IDENTITY_TOLERANCE * a.abs().max(1.0) {
                debug!(
                    assets = a,
                    liabilities = l,
                    equity = e,
                    gap,
                    "explicit balance totals do not satisfy the identity"
                );
            }
        }
        _ => {}
    }

    identity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equity_derived_from_assets_and_liabilities() {
        let identity = derive_balance_identity(Some(1000.0), Some(400.0), None);
        assert_eq!(identity.equity, Some(600.0));
        assert_eq!(identity.derived, Some(BalanceLine::Equity));
        assert!(identity.is_complete());
    }

    #[test]
    fn test_liabilities_derived_from_assets_and_equity() {
        let identity = derive_balance_identity(Some(1000.0), None, Some(650.0));
        assert_eq!(identity.liabilities, Some(350.0));
        assert_eq!(identity.derived, Some(BalanceLine::Liabilities));
    }

    #[test]
    fn test_assets_derived_from_liabilities_and_equity() {
        let identity = derive_balance_identity(None, Some(300.0), Some(200.0));
        assert_eq!(identity.assets, Some(500.0));
        assert_eq!(identity.derived, Some(BalanceLine::Assets));
    }

    #[test]
    fn test_single_line_is_not_extrapolated() {
        for (a, l, e) in [
            (Some(1.0), None, None),
            (None, Some(1.0), None),
            (None, None, Some(1.0)),
            (None, None, None),
        ] {
            let identity = derive_balance_identity(a, l, e);
            assert_eq!(identity.derived, None);
            assert_eq!((identity.assets, identity.liabilities, identity.equity), (a, l, e));
        }
    }

    #[test]
    fn test_explicit_values_are_kept_on_mismatch() {
        let identity = derive_balance_identity(Some(1000.0), Some(400.0), Some(500.0));
        assert_eq!(identity.equity, Some(500.0));
        assert_eq!(identity.liabilities, Some(400.0));
        assert_eq!(identity.derived, None);
    }

    #[test]
    fn test_identity_holds_for_any_two() {
        let cases = [
            (Some(2500.5), Some(1200.25), None),
            (Some(2500.5), None, Some(1300.25)),
            (None, Some(1200.25), Some(1300.25)),
            (Some(-10.0), Some(5.0), None),
        ];
        for (a, l, e) in cases {
            let identity = derive_balance_identity(a, l, e);
            let (Some(a), Some(l), Some(e)) =
                (identity.assets, identity.liabilities, identity.equity)
            else {
                panic!("identity incomplete for {a:?} {l:?} {e:?}");
            };
            assert!((a - (l + e)).abs() < 1e-9);
        }
    }
}

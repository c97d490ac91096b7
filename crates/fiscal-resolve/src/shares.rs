//! Share-count extraction from balance-sheet labels.
//!
//! Filers rarely tag the share count with a usable concept. It usually shows
//! up inside the common stock line's label instead, e.g. `"Common stock, $0.01
//! par value; 4,000 shares authorized; 2,211 and 2,345 shares issued and
//! outstanding"`. Counts written into labels are in millions unless the label
//! says `"in shares"`.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::trace;

use fiscal_core::{FactMap, normalize_label};

/// Multiplier for counts stated in millions.
const MILLIONS: f64 = 1_000_000.0;

static PAIR_ISSUED_OUTSTANDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)\s+and\s+(\d[\d,]*)\s+shares\s+issued\s+and\s+outstanding")
        .expect("valid share pair regex")
});

static ISSUED_OUTSTANDING_AS_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)\s+shares\s+issued\s+and\s+outstanding\s+as\s+of\b")
        .expect("valid share as-of regex")
});

static ISSUED_OUTSTANDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)\s+shares\s+issued\s+and\s+outstanding")
        .expect("valid share regex")
});

static OUTSTANDING_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"outstanding:\s*(\d[\d,]*)\s+shares").expect("valid outstanding regex")
});

/// The label pattern that produced a share count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePattern {
    /// `"<N1> and <N2> shares issued and outstanding"`, the larger count wins.
    IssuedAndOutstandingPair,
    /// `"<N> shares issued and outstanding as of <date>"`.
    IssuedAndOutstandingAsOf,
    /// `"<N> shares issued and outstanding"` on a label without "authorized".
    IssuedAndOutstanding,
    /// A "shares outstanding (in shares)" line; the fact value is the count.
    TaggedInShares,
    /// `"outstanding: <N> shares"`.
    OutstandingColon,
}

/// A share count found in a fact map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareCountMatch {
    /// Number of shares, already scaled.
    pub shares: f64,
    /// Which pattern matched.
    pub pattern: SharePattern,
    /// Key of the fact whose label matched.
    pub key: String,
}

/// Scans labels in map order and returns the first share count found.
///
/// Patterns are tried in priority order for each label; the first label
/// yielding a count ends the scan.
#[must_use]
pub fn find_share_count(facts: &FactMap) -> Option<ShareCountMatch> {
    facts.iter().find_map(|(key, fact)| {
        let label = normalize_label(fact.label.as_deref()?);
        let (shares, pattern) = match_label(&label, fact.value)?;
        trace!(key, ?pattern, shares, "share count from label");
        Some(ShareCountMatch {
            shares,
            pattern,
            key: key.to_string(),
        })
    })
}

/// Returns just the share count, if any label yields one.
#[must_use]
pub fn extract_shares_outstanding(facts: &FactMap) -> Option<f64> {
    find_share_count(facts).map(|m| m.shares)
}

/// Applies the label patterns to one normalized label.
///
/// Once a pattern's text matches, its counts decide the label: a count that
/// does not parse leaves the label unresolved rather than falling through to
/// a looser pattern.
fn match_label(label: &str, value: Option<f64>) -> Option<(f64, SharePattern)> {
    let in_shares = label.contains("in shares");
    let scale = |count: u64| {
        let count = count as f64;
        if in_shares { count } else { count * MILLIONS }
    };

    if let Some(caps) = PAIR_ISSUED_OUTSTANDING.captures(label) {
        let first = capture_count(&caps, 1)?;
        let second = capture_count(&caps, 2)?;
        return Some((scale(first.max(second)), SharePattern::IssuedAndOutstandingPair));
    }

    if let Some(caps) = ISSUED_OUTSTANDING_AS_OF.captures(label) {
        let count = capture_count(&caps, 1)?;
        return Some((scale(count), SharePattern::IssuedAndOutstandingAsOf));
    }

    if !label.contains("authorized")
        && let Some(caps) = ISSUED_OUTSTANDING.captures(label)
    {
        let count = capture_count(&caps, 1)?;
        return Some((scale(count), SharePattern::IssuedAndOutstanding));
    }

    if in_shares
        && label.contains("shares outstanding")
        && let Some(value) = value
    {
        return Some((value, SharePattern::TaggedInShares));
    }

    let caps = OUTSTANDING_COLON.captures(label)?;
    capture_count(&caps, 1).map(|count| (scale(count), SharePattern::OutstandingColon))
}

/// Parses a captured integer with thousands separators.
fn capture_count(caps: &Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group)?.as_str().replace(',', "").parse().ok()
}

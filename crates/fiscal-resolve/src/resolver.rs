//! Canonical metric resolution over a [`FactMap`].
//!
//! Three lookups, from strict to fuzzy:
//!
//! - [`resolve_by_concept`] - ordered taxonomy concept identifiers
//! - [`resolve_by_exact_label`] - ordered display labels, exact after normalization
//! - [`resolve_by_label_keyword`] - label substrings, facts scanned in source order
//!
//! [`resolve_metric`] chains them according to a metric's candidate table.

use fiscal_core::{Fact, FactMap, normalize_concept_key, normalize_label};
use tracing::trace;

use crate::concepts::{Metric, MetricCandidates, OPERATING_EXPENSE_COMPONENTS};

/// Returns the value of the first candidate concept present with a number.
///
/// Candidates are tried in order. Each is normalized and looked up directly;
/// if that yields no value, the alternate namespace separator form is tried
/// (`us-gaap_Assets` and `us-gaap:Assets` are equivalent).
#[must_use]
pub fn resolve_by_concept(facts: &FactMap, candidates: &[&str]) -> Option<f64> {
    candidates.iter().find_map(|candidate| {
        let key = normalize_concept_key(candidate);
        let value_at = |k: &str| facts.get_normalized(k).and_then(|f| f.value);
        value_at(&key).or_else(|| alternate_concept_form(&key).and_then(|alt| value_at(&alt)))
    })
}

/// Returns the value of the first fact (in map order) whose normalized label
/// contains any of the keywords.
///
/// Facts without a value are skipped. Keywords must be lowercase.
#[must_use]
pub fn resolve_by_label_keyword(facts: &FactMap, keywords: &[&str]) -> Option<f64> {
    scan_keywords(facts, keywords, false)
}

/// Keyword scan; with `skip_zero`, zero-valued facts are passed over like
/// headers so that a later non-zero line can match.
fn scan_keywords(facts: &FactMap, keywords: &[&str], skip_zero: bool) -> Option<f64> {
    if keywords.is_empty() {
        return None;
    }
    facts.iter().find_map(|(key, fact)| {
        let value = fact.value.filter(|v| !(skip_zero && *v == 0.0))?;
        let label = normalize_label(effective_label(key, fact));
        keywords
            .iter()
            .any(|keyword| label.contains(keyword))
            .then(|| {
                trace!(key, label = %label, value, "keyword match");
                value
            })
    })
}

/// Returns the value of the fact whose normalized label equals the most
/// preferred candidate label.
///
/// Candidates are tried in order, so an earlier candidate wins even when its
/// fact appears later in the map.
#[must_use]
pub fn resolve_by_exact_label(facts: &FactMap, labels: &[&str]) -> Option<f64> {
    if labels.is_empty() {
        return None;
    }
    let normalized: Vec<(String, Option<f64>)> = facts
        .iter()
        .map(|(key, fact)| (normalize_label(effective_label(key, fact)), fact.value))
        .collect();

    labels.iter().find_map(|candidate| {
        let wanted = normalize_label(candidate);
        normalized
            .iter()
            .filter(|(label, _)| *label == wanted)
            .find_map(|(_, value)| *value)
    })
}

/// Resolves one metric using its candidate table.
///
/// Tiers run concept, exact label, then keyword. For metrics whose table sets
/// `zero_triggers_fallback`, a zero keeps the search going and the keyword
/// scan passes over zero-valued lines; if no later tier finds anything the
/// zero is returned.
#[must_use]
pub fn resolve_metric(facts: &FactMap, metric: Metric) -> Option<f64> {
    let table = metric.candidates();
    let mut zero_seen = false;

    for tier in Tier::ALL {
        let Some(value) = tier.resolve(facts, table) else {
            continue;
        };
        if value == 0.0 && table.zero_triggers_fallback {
            trace!(?metric, ?tier, "zero value, trying next tier");
            zero_seen = true;
            continue;
        }
        trace!(?metric, ?tier, value, "resolved");
        return Some(value);
    }

    zero_seen.then_some(0.0)
}

/// Resolves operating expense: the reported total if any, otherwise the sum
/// of whichever components resolve.
#[must_use]
pub fn resolve_operating_expense(facts: &FactMap) -> Option<f64> {
    if let Some(total) = resolve_metric(facts, Metric::OperatingExpense) {
        return Some(total);
    }

    OPERATING_EXPENSE_COMPONENTS
        .iter()
        .filter_map(|component| resolve_metric(facts, *component))
        .fold(None, |sum, value| Some(sum.unwrap_or(0.0) + value))
}

#[derive(Clone, Copy, Debug)]
enum Tier {
    Concept,
    ExactLabel,
    Keyword,
}

impl Tier {
    const ALL: [Self; 3] = [Self::Concept, Self::ExactLabel, Self::Keyword];

    fn resolve(self, facts: &FactMap, table: &MetricCandidates) -> Option<f64> {
        match self {
            Self::Concept => resolve_by_concept(facts, table.concepts),
            Self::ExactLabel => resolve_by_exact_label(facts, table.labels),
            Self::Keyword => {
                scan_keywords(facts, table.keywords, table.zero_triggers_fallback)
            }
        }
    }
}

/// A fact's label, or its key when the filer supplied no label.
fn effective_label<'a>(key: &'a str, fact: &'a Fact) -> &'a str {
    fact.label.as_deref().unwrap_or(key)
}

/// Swaps the namespace separator of a normalized concept key.
fn alternate_concept_form(key: &str) -> Option<String> {
    if let Some((namespace, name)) = key.split_once(':') {
        Some(format!("{namespace}_{name}"))
    } else {
        key.split_once('_')
            .map(|(namespace, name)| format!("{namespace}:{name}"))
    }
}

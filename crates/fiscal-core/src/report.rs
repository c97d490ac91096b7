//! Period reports and their fact maps.
//!
//! This module defines the per-period statement data as it arrives from the
//! financials API:
//!
//! - [`Fact`] - A reported label and value
//! - [`FactMap`] - Ordered mapping from concept key to fact
//! - [`PeriodReport`] - One filed statement for one fiscal period

use chrono::{Datelike, NaiveDate};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::normalize::normalize_concept_key;

/// Date format of `period_end_date` (day-month-year).
pub const PERIOD_END_FORMAT: &str = "%d-%m-%Y";

/// A single reported fact: an optional display label and an optional value.
///
/// Label-only rows (section headers) carry no value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Fact {
    /// Filer-chosen display label.
    pub label: Option<String>,
    /// Reported numeric value.
    pub value: Option<f64>,
}

impl Fact {
    /// Creates a fact with both label and value.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(value),
        }
    }

    /// Creates a label-only fact (e.g. a section header).
    #[must_use]
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: None,
        }
    }

    /// Builds a fact from loosely-typed JSON.
    ///
    /// Objects contribute their `label` and `value` fields; a bare number or
    /// numeric string becomes a value-only fact. Anything else is empty.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self {
                label: obj.get("label").and_then(Value::as_str).map(str::to_string),
                value: obj.get("value").and_then(json_number),
            },
            other => Self {
                label: None,
                value: json_number(other),
            },
        }
    }

    /// Returns the label, or an empty string when absent.
    #[must_use]
    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

impl<'de> Deserialize<'de> for Fact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Reads a JSON number or a numeric string (thousands commas allowed).
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Ordered mapping from concept key to [`Fact`].
///
/// Keys are either taxonomy concept identifiers (`us-gaap_Assets`,
/// `defref_us-gaap_Assets`) or filer display labels. Entries keep the order
/// of the source JSON object. An index from normalized concept key backs
/// concept lookups; it points at the first entry carrying a value, or at the
/// first entry when none under that key has one.
#[derive(Clone, Debug, Default)]
pub struct FactMap {
    entries: Vec<(String, Fact)>,
    keys: HashSet<String>,
    index: HashMap<String, usize>,
}

impl FactMap {
    /// Creates an empty fact map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fact. A key already present is ignored.
    pub fn insert(&mut self, key: impl Into<String>, fact: Fact) {
        let key = key.into();
        if !self.keys.insert(key.clone()) {
            return;
        }
        let position = self.entries.len();
        let has_value = fact.value.is_some();
        self.index
            .entry(normalize_concept_key(&key))
            .and_modify(|indexed| {
                if has_value && self.entries[*indexed].1.value.is_none() {
                    *indexed = position;
                }
            })
            .or_insert(position);
        self.entries.push((key, fact));
    }

    /// Appends a fact, returning the map for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, fact: Fact) -> Self {
        self.insert(key, fact);
        self
    }

    /// Returns the number of facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the fact stored under the exact raw key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Fact> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    /// Returns the fact for `normalized_key`: the first one with a value, or
    /// the first one when none has a value.
    ///
    /// The argument must already be normalized with
    /// [`normalize_concept_key`].
    #[must_use]
    pub fn get_normalized(&self, normalized_key: &str) -> Option<&Fact> {
        self.index
            .get(normalized_key)
            .map(|&position| &self.entries[position].1)
    }

    /// Iterates `(key, fact)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fact)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }
}

impl PartialEq for FactMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>> FromIterator<(K, Fact)> for FactMap {
    fn from_iter<I: IntoIterator<Item = (K, Fact)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, fact) in iter {
            map.insert(key, fact);
        }
        map
    }
}

impl Serialize for FactMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, fact) in &self.entries {
            map.serialize_entry(key, fact)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FactMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FactMapVisitor)
    }
}

/// Visits map entries in source order so resolution order follows the JSON.
struct FactMapVisitor;

impl<'de> Visitor<'de> for FactMapVisitor {
    type Value = FactMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of concept keys to facts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FactMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, Fact::from_json(&value));
        }
        Ok(map)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(FactMap::new())
    }
}

/// One filed statement for one fiscal period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    /// Period-end date as reported, day-month-year (`31-12-2021`).
    #[serde(default, alias = "period_end_date", alias = "date")]
    pub period_end_date: String,
    /// Length of the period in months.
    #[serde(
        default,
        alias = "duration_months",
        alias = "months",
        deserialize_with = "lenient_months"
    )]
    pub duration_months: Option<u32>,
    /// Reported facts in source order.
    #[serde(default, alias = "map")]
    pub facts: FactMap,
}

impl PeriodReport {
    /// Creates a report ending on `period_end_date` (day-month-year).
    #[must_use]
    pub fn new(period_end_date: impl Into<String>, facts: FactMap) -> Self {
        Self {
            period_end_date: period_end_date.into(),
            duration_months: None,
            facts,
        }
    }

    /// Sets the period length in months.
    #[must_use]
    pub const fn with_duration_months(mut self, months: u32) -> Self {
        self.duration_months = Some(months);
        self
    }

    /// Parses the period-end date.
    #[must_use]
    pub fn period_end(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.period_end_date.trim(), PERIOD_END_FORMAT).ok()
    }

    /// Returns the year component of the period-end date.
    ///
    /// Falls back to the trailing `-` or `/` separated component when the
    /// date itself does not parse (e.g. `31-02-2021`).
    #[must_use]
    pub fn period_end_year(&self) -> Option<i32> {
        if let Some(date) = self.period_end() {
            return Some(date.year());
        }
        self.period_end_date
            .trim()
            .rsplit(['-', '/'])
            .next()
            .filter(|part| part.len() == 4)
            .and_then(|part| part.parse::<i32>().ok())
    }
}

fn lenient_months<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(json_number)
        .filter(|m| *m >= 0.0 && m.fract() == 0.0 && *m <= f64::from(u32::MAX))
        .map(|m| m as u32))
}

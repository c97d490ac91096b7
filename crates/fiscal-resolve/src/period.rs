//! Statement payload parsing and fiscal-period selection.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use fiscal_core::{FiscalError, PeriodReport, Result, StatementKind};

/// Returns the first report whose period-end year equals `year`.
///
/// Restatements can put several reports in the same year; array order decides
/// and no attempt is made to find the latest filing.
#[must_use]
pub fn select_report(reports: &[PeriodReport], year: i32) -> Option<&PeriodReport> {
    let mut matches = reports
        .iter()
        .filter(|report| report.period_end_year() == Some(year));
    let selected = matches.next();
    let extra = matches.count();
    if extra > 0 {
        debug!(year, extra, "several reports match the year, using the first");
    }
    selected
}

/// Parses one statement payload from a financial row.
///
/// The payload is normally a JSON-encoded string holding an array of
/// reports. A decoded array is accepted as well. `null` and the empty string
/// mean no reports.
///
/// # Errors
///
/// Returns [`FiscalError::MalformedPeriodJson`] when the payload is not valid
/// JSON or does not describe an array of reports.
pub fn try_parse_reports(kind: StatementKind, payload: &Value) -> Result<Vec<PeriodReport>> {
    match payload {
        Value::String(encoded) => {
            let encoded = encoded.trim();
            if encoded.is_empty() {
                return Ok(Vec::new());
            }
            let decoded: Value = serde_json::from_str(encoded).map_err(|e| malformed(kind, e))?;
            if decoded.is_string() {
                return Err(malformed(kind, "statement JSON is encoded twice"));
            }
            try_parse_reports(kind, &decoded)
        }
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => {
            Vec::<PeriodReport>::deserialize(payload).map_err(|e| malformed(kind, e))
        }
        other => Err(malformed(
            kind,
            format!("expected an array of reports, found {}", json_type(other)),
        )),
    }
}

/// Parses one statement payload, treating malformed JSON as no reports.
///
/// Failures are logged and do not affect the other statements of the row.
#[must_use]
pub fn parse_reports(kind: StatementKind, payload: &Value) -> Vec<PeriodReport> {
    try_parse_reports(kind, payload).unwrap_or_else(|e| {
        warn!(%kind, error = %e, "ignoring statement payload");
        Vec::new()
    })
}

fn malformed(kind: StatementKind, reason: impl ToString) -> FiscalError {
    FiscalError::MalformedPeriodJson {
        kind,
        reason: reason.to_string(),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_core::{Fact, FactMap};
    use serde_json::json;

    fn report(date: &str, value: f64) -> PeriodReport {
        PeriodReport::new(date, FactMap::new().with("k", Fact::new("K", value)))
    }

    #[test]
    fn test_select_first_match_in_array_order() {
        let reports = vec![
            report("31-12-2020", 1.0),
            report("31-12-2021", 2.0),
            report("30-06-2021", 3.0),
        ];
        let selected = select_report(&reports, 2021).unwrap();
        assert_eq!(selected.period_end_date, "31-12-2021");
        assert!(select_report(&reports, 2019).is_none());
        assert!(select_report(&[], 2021).is_none());
    }

    #[test]
    fn test_select_with_unparseable_day() {
        let reports = vec![report("31-02-2022", 1.0)];
        assert!(select_report(&reports, 2022).is_some());
    }

    #[test]
    fn test_parse_encoded_string() {
        let payload = json!(
            r#"[{"periodEndDate":"31-12-2021","durationMonths":12,"facts":{"us-gaap_Assets":{"label":"Total assets","value":1000}}}]"#
        );
        let reports = try_parse_reports(StatementKind::Balance, &payload).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].duration_months, Some(12));
        assert_eq!(
            reports[0].facts.get("us-gaap_Assets").unwrap().value,
            Some(1000.0)
        );
    }

    #[test]
    fn test_parse_decoded_array() {
        let payload = json!([{"period_end_date": "31-12-2021", "map": {}}]);
        let reports = try_parse_reports(StatementKind::Income, &payload).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].facts.is_empty());
    }

    #[test]
    fn test_empty_payloads() {
        for payload in [json!(null), json!(""), json!("   "), json!("[]"), json!([])] {
            assert!(
                try_parse_reports(StatementKind::CashFlow, &payload)
                    .unwrap()
                    .is_empty()
            );
        }
    }

    #[test]
    fn test_malformed_payload() {
        let err = try_parse_reports(StatementKind::Balance, &json!("[{not json")).unwrap_err();
        assert!(matches!(
            err,
            FiscalError::MalformedPeriodJson {
                kind: StatementKind::Balance,
                ..
            }
        ));
        assert!(try_parse_reports(StatementKind::Balance, &json!(42)).is_err());
        assert!(try_parse_reports(StatementKind::Balance, &json!("\"[]\"")).is_err());
        assert!(parse_reports(StatementKind::Balance, &json!("[{not json")).is_empty());
    }
}

//! Concept-key and label normalization.
//!
//! Filers key facts either by a taxonomy concept identifier (often carrying a
//! `defref_` prefix from the rendered filing) or by a free-text display label.
//! Both forms are normalized before any comparison.

const DEFREF_PREFIX: &str = "defref_";

/// Normalizes a concept key: lowercases it and strips a leading `defref_`.
///
/// # Example
/// ```
/// use fiscal_core::normalize_concept_key;
///
/// assert_eq!(normalize_concept_key("defref_us-gaap_Assets"), "us-gaap_assets");
/// assert_eq!(normalize_concept_key("Total assets"), "total assets");
/// ```
#[must_use]
pub fn normalize_concept_key(key: &str) -> String {
    let lowered = key.to_lowercase();
    match lowered.strip_prefix(DEFREF_PREFIX) {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Normalizes a display label for comparison.
///
/// Lowercases, folds curly single quotes to `'`, collapses whitespace runs
/// (non-breaking spaces included) to one space and trims.
///
/// # Example
/// ```
/// use fiscal_core::normalize_label;
///
/// assert_eq!(
///     normalize_label("Total Stockholders\u{2019}  Equity"),
///     normalize_label("total stockholders' equity"),
/// );
/// ```
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let folded: String = label
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

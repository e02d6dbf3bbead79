//! Record normalizer: one loosely typed `RawRow` → one canonical `Record`.
//!
//! Header lookup happens on the trimmed header text. The SP and SB schemas
//! differ only in a few aliases; each alias list is tried in order.
//!
//! Coercion never fails. Numbers pass through (non-finite → 0), text is
//! trimmed and parsed as a decimal, `true` is 1, anything else is 0.
//! Metrics are clamped at 0 and counts are rounded to the nearest integer.
//!
//! A row without a truthy search term yields `None`; such rows are dropped
//! silently by [`normalize_rows`].

use ppc_core::{CellValue, RawRow, Record, SourceKind, TrimmedRow};

use crate::classify::classify_ad_type;

// ---- Header aliases (first truthy / first non-zero wins) ----

pub const SEARCH_TERM_HEADERS: &[&str] = &["Customer Search Term", "Search Term"];
pub const SALES_HEADERS: &[&str] = &["14 Day Total Sales", "7 Day Total Sales"];
pub const ORDERS_HEADERS: &[&str] = &["14 Day Total Orders (#)", "7 Day Total Orders (#)"];
pub const IMPRESSIONS_HEADER: &str = "Impressions";
pub const CLICKS_HEADER: &str = "Clicks";
pub const SPEND_HEADER: &str = "Spend";
pub const CAMPAIGN_HEADER: &str = "Campaign Name";

/// Numeric-or-zero coercion of a cell (absent cell → 0).
pub fn number_or_zero(v: Option<&CellValue>) -> f64 {
    let n = match v {
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(CellValue::Bool(true)) => 1.0,
        Some(CellValue::Bool(false)) | Some(CellValue::Empty) | None => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Truthy cell rendered as text: non-empty text verbatim, non-zero finite
/// number in shortest form, or `true`.
fn truthy_text(v: Option<&CellValue>) -> Option<String> {
    match v? {
        CellValue::Text(s) if !s.is_empty() => Some(s.clone()),
        CellValue::Number(n) if *n != 0.0 && n.is_finite() => Some(n.to_string()),
        CellValue::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn first_truthy(t: &TrimmedRow<'_>, headers: &[&str]) -> Option<String> {
    headers.iter().find_map(|h| truthy_text(t.get(h)))
}

/// Positional fallback: the first header whose coerced value is non-zero.
fn first_nonzero(t: &TrimmedRow<'_>, headers: &[&str]) -> f64 {
    headers
        .iter()
        .map(|h| number_or_zero(t.get(h)))
        .find(|n| *n != 0.0)
        .unwrap_or(0.0)
}

#[inline]
fn non_negative(n: f64) -> f64 {
    if n > 0.0 { n } else { 0.0 }
}

#[inline]
fn count(n: f64) -> u64 {
    // Saturating float→int cast; input is finite and non-negative here.
    non_negative(n).round() as u64
}

/// Normalize one row for the given source schema.
pub fn normalize_row(row: &RawRow, kind: SourceKind) -> Option<Record> {
    let t = row.trimmed();
    let search_term = first_truthy(&t, SEARCH_TERM_HEADERS)?;
    let campaign = truthy_text(t.get(CAMPAIGN_HEADER)).unwrap_or_default();

    Some(Record {
        search_term,
        impressions: count(number_or_zero(t.get(IMPRESSIONS_HEADER))),
        clicks: count(number_or_zero(t.get(CLICKS_HEADER))),
        spend: non_negative(number_or_zero(t.get(SPEND_HEADER))),
        sales: non_negative(first_nonzero(&t, SALES_HEADERS)),
        orders: count(first_nonzero(&t, ORDERS_HEADERS)),
        ad_type: classify_ad_type(kind, &campaign),
    })
}

/// Normalize a whole file's rows, dropping rows without a search term.
pub fn normalize_rows(rows: &[RawRow], kind: SourceKind) -> Vec<Record> {
    rows.iter().filter_map(|r| normalize_row(r, kind)).collect()
}

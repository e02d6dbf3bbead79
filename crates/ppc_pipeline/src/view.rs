//! View projection: filter → search → sort. Stateless; recomputed per call.

use serde_json::Value;

use ppc_core::{AggregatedRow, Preferences, SortKey};

/// Number text as a JavaScript engine prints it: plain decimal in
/// `[1e-6, 1e21)`, exponent form (`1e-7`, `1.5e+21`) outside it.
fn js_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let a = x.abs();
    if (1e-6..1e21).contains(&a) {
        return x.to_string();
    }
    let exp = format!("{x:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Structural text dump of a row, as a compact JSON-style object with the
/// keys in field order. Free-text search runs over this (lower-cased), so
/// numbers and even key names match.
pub fn search_text(r: &AggregatedRow) -> String {
    // `Value::String` display escapes like JSON.
    format!(
        "{{\"searchTerm\":{},\"impressions\":{},\"clicks\":{},\"spend\":{},\"sales\":{},\"orders\":{},\
         \"adType\":{},\"cpc\":{},\"conv\":{},\"roas\":{},\"pSpend\":{},\"pSales\":{}}}",
        Value::String(r.search_term.clone()),
        r.impressions,
        r.clicks,
        js_number(r.spend),
        js_number(r.sales),
        r.orders,
        Value::String(r.ad_type.as_str().to_string()),
        js_number(r.cpc),
        js_number(r.conv),
        js_number(r.roas),
        js_number(r.p_spend),
        js_number(r.p_sales),
    )
}

fn sort_value(r: &AggregatedRow, key: SortKey) -> f64 {
    match key {
        SortKey::Sales => r.sales,
        SortKey::Spend => r.spend,
    }
}

/// Ordered subset of `rows` for display.
///
/// 1. Ad-type filter (exact equality unless ALL).
/// 2. Search: when the query has non-whitespace text, keep rows whose
///    lower-cased dump contains the lower-cased query.
/// 3. Stable descending sort on the preferred key.
pub fn project<'a>(rows: &'a [AggregatedRow], prefs: &Preferences, search: &str) -> Vec<&'a AggregatedRow> {
    let mut out: Vec<&AggregatedRow> = rows.iter().filter(|r| prefs.ad_filter.admits(r.ad_type)).collect();

    if !search.trim().is_empty() {
        let q = search.to_lowercase();
        out.retain(|r| search_text(r).to_lowercase().contains(&q));
    }

    let key = prefs.sort_by;
    out.sort_by(|a, b| sort_value(b, key).total_cmp(&sort_value(a, key)));
    out
}

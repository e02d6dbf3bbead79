//! crates/ppc_io/src/prefs_store.rs
//! Preferences persistence: a small JSON object merged over the defaults.
//!
//! Loading never fails on content. A missing file, malformed JSON or any
//! field that does not parse yields the default for that part, with a
//! warning. Only real filesystem errors surface as `IoError`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use ppc_core::{AdFilter, Column, Preferences, SortKey};

use crate::canonical_json::write_canonical_file;
use crate::IoResult;

const K_VISIBLE: &str = "visible";
const K_SORT_BY: &str = "sortBy";
const K_AD_FILTER: &str = "adFilter";

/// Load preferences from `path`. Missing file → defaults.
pub fn load_preferences(path: &Path) -> IoResult<Preferences> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Preferences::default()),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(v) => Ok(preferences_from_value(&v)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preferences file is not valid JSON; using defaults");
            Ok(Preferences::default())
        }
    }
}

/// Shallow merge of a saved object over [`Preferences::default`].
///
/// A present `visible` object replaces the default map wholesale.
pub fn preferences_from_value(v: &Value) -> Preferences {
    let mut prefs = Preferences::default();
    let obj = match v {
        Value::Object(o) => o,
        Value::Null => return prefs,
        _ => {
            warn!("preferences blob is not an object; using defaults");
            return prefs;
        }
    };

    for (key, val) in obj {
        match key.as_str() {
            K_VISIBLE => match parse_visible(val) {
                Some(map) => prefs.visible = map,
                None => warn!(field = K_VISIBLE, "expected an object of column → bool; keeping default"),
            },
            K_SORT_BY => match val.as_str().and_then(|s| s.parse::<SortKey>().ok()) {
                Some(k) => prefs.sort_by = k,
                None => warn!(field = K_SORT_BY, value = %val, "unknown sort key; keeping default"),
            },
            K_AD_FILTER => match val.as_str().and_then(|s| s.parse::<AdFilter>().ok()) {
                Some(f) => prefs.ad_filter = f,
                None => warn!(field = K_AD_FILTER, value = %val, "unknown ad filter; keeping default"),
            },
            other => warn!(field = other, "ignoring unknown preferences field"),
        }
    }
    prefs
}

fn parse_visible(val: &Value) -> Option<BTreeMap<Column, bool>> {
    let obj: &Map<String, Value> = val.as_object()?;
    let mut map = BTreeMap::new();
    for (label, on) in obj {
        match (label.parse::<Column>(), on.as_bool()) {
            (Ok(col), Some(b)) => {
                map.insert(col, b);
            }
            _ => warn!(column = %label, "skipping unrecognised visibility entry"),
        }
    }
    Some(map)
}

/// Persist preferences as canonical JSON (atomic replace).
pub fn save_preferences(path: &Path, prefs: &Preferences) -> IoResult<()> {
    let v = serde_json::to_value(prefs)?;
    write_canonical_file(path, &v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::AdType;
    use serde_json::json;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = load_preferences(&dir.path().join("absent.json")).unwrap();
        assert_eq!(p, Preferences::default());
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let p = preferences_from_value(&json!({ "sortBy": "spend" }));
        assert_eq!(p.sort_by, SortKey::Spend);
        assert_eq!(p.ad_filter, AdFilter::All);
        assert_eq!(p.visible_columns(), Column::ALL.to_vec());
    }

    #[test]
    fn saved_visible_replaces_default_map() {
        let p = preferences_from_value(&json!({
            "visible": { "Search Term": true, "Conv%": true, "ROAS": false, "Bogus": true }
        }));
        assert_eq!(p.visible_columns(), vec![Column::SearchTerm, Column::ConversionRate]);
    }

    #[test]
    fn bad_fields_fall_back_to_defaults() {
        let p = preferences_from_value(&json!({
            "sortBy": "impressions",
            "adFilter": 7,
            "visible": "all",
            "theme": "dark"
        }));
        assert_eq!(p, Preferences::default());
        assert_eq!(preferences_from_value(&json!([1, 2])), Preferences::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_preferences(&path).unwrap(), Preferences::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = Preferences::default();
        prefs.sort_by = SortKey::Spend;
        prefs.ad_filter = AdFilter::Only(AdType::SponsoredBrandsVideo);
        prefs.toggle(Column::Impressions);
        save_preferences(&path, &prefs).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(r#"{"adFilter":"SPONSORED BRANDS VIDEO","sortBy":"spend""#));
        assert_eq!(load_preferences(&path).unwrap(), prefs);
    }
}

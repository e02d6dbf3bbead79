//! Loosely typed decoded rows (one per spreadsheet line).

use std::collections::BTreeMap;

/// Scalar value of a decoded cell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// One decoded line: `(header, value)` pairs in sheet column order.
///
/// Headers are kept exactly as exported (possibly padded with whitespace).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Builder form of [`RawRow::push`].
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(header, value);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }

    /// Header-trimmed lookup view. When two headers collide after trimming,
    /// the later column wins.
    pub fn trimmed(&self) -> TrimmedRow<'_> {
        let mut map = BTreeMap::new();
        for (h, v) in &self.cells {
            map.insert(h.trim(), v);
        }
        TrimmedRow(map)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

/// Borrowed view of a [`RawRow`] keyed by trimmed header.
#[derive(Clone, Debug)]
pub struct TrimmedRow<'a>(BTreeMap<&'a str, &'a CellValue>);

impl<'a> TrimmedRow<'a> {
    pub fn get(&self, header: &str) -> Option<&'a CellValue> {
        self.0.get(header).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_view_strips_padding() {
        let row = RawRow::new().with("  Spend ", 5.0).with("Clicks\t", "10");
        let t = row.trimmed();
        assert_eq!(t.get("Spend"), Some(&CellValue::Number(5.0)));
        assert_eq!(t.get("Clicks"), Some(&CellValue::Text("10".into())));
        assert_eq!(t.get("  Spend "), None);
    }

    #[test]
    fn later_column_wins_on_trim_collision() {
        let row: RawRow = [("Spend", 1.0), (" Spend", 2.0)].into_iter().collect();
        assert_eq!(row.trimmed().get("Spend"), Some(&CellValue::Number(2.0)));
        assert_eq!(row.len(), 2);
    }
}

//! crates/ppc_io/src/sheet.rs
//! Spreadsheet decoding into `RawRow`s.
//!
//! Rules (first worksheet only):
//! - Row 0 is the header row; every later line becomes one `RawRow`.
//! - Empty cells decode to `Number(0)`; lines with no non-empty cell are skipped.
//! - Blank headers are named `__EMPTY`; repeated headers get `_1`, `_2`, … suffixes.
//! - Header text is kept untrimmed; lookup trimming happens in the normalizer.

use ppc_core::{CellValue, RawRow};

use crate::IoResult;

/// Name given to a header cell with no text.
pub const BLANK_HEADER: &str = "__EMPTY";

/// Decoder seam: bytes of one uploaded file → ordered rows.
pub trait SheetDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> IoResult<Vec<RawRow>>;
}

/// Build unique header names from the raw header cells.
pub(crate) fn unique_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut out = Vec::new();
    for h in raw {
        let base = if h.trim().is_empty() { BLANK_HEADER.to_string() } else { h };
        let n = seen.entry(base.clone()).or_insert(0);
        let name = if *n == 0 { base.clone() } else { format!("{base}_{n}") };
        *n += 1;
        out.push(name);
    }
    out
}

/// Zip one line of cells with the headers. Returns `None` for a blank line.
pub(crate) fn zip_row(headers: &[String], cells: Vec<CellValue>) -> Option<RawRow> {
    if cells.iter().all(|c| matches!(c, CellValue::Empty)) {
        return None;
    }
    let mut row = RawRow::new();
    for (i, h) in headers.iter().enumerate() {
        let v = match cells.get(i) {
            Some(CellValue::Empty) | None => CellValue::Number(0.0),
            Some(v) => v.clone(),
        };
        row.push(h.clone(), v);
    }
    Some(row)
}

// ---- calamine backend ----

#[cfg(feature = "xlsx")]
mod xlsx {
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};
    use ppc_core::{CellValue, RawRow};
    use tracing::debug;

    use super::{unique_headers, zip_row, SheetDecoder};
    use crate::{IoError, IoResult};

    /// `.xlsx` decoder backed by calamine.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct XlsxDecoder;

    impl XlsxDecoder {
        pub fn new() -> Self {
            XlsxDecoder
        }
    }

    fn cell_value(d: &Data) -> CellValue {
        match d {
            Data::Empty => CellValue::Empty,
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => {
                if s.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(s.clone())
                }
            }
            // Dates keep their serial number, like any other numeric cell.
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }

    fn header_text(d: &Data) -> String {
        match d {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    impl SheetDecoder for XlsxDecoder {
        fn decode(&self, bytes: &[u8]) -> IoResult<Vec<RawRow>> {
            let mut wb: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
                .map_err(|e| IoError::Decode(e.to_string()))?;
            let range = match wb.worksheet_range_at(0) {
                Some(r) => r.map_err(|e| IoError::Decode(e.to_string()))?,
                None => return Err(IoError::Decode("workbook has no worksheets".into())),
            };

            let mut lines = range.rows();
            let headers = match lines.next() {
                Some(h) => unique_headers(h.iter().map(header_text)),
                None => {
                    debug!(rows = 0, "decoded empty worksheet");
                    return Ok(Vec::new());
                }
            };

            let rows: Vec<RawRow> = lines
                .filter_map(|line| zip_row(&headers, line.iter().map(cell_value).collect()))
                .collect();
            debug!(rows = rows.len(), columns = headers.len(), "decoded worksheet");
            Ok(rows)
        }
    }
}

#[cfg(feature = "xlsx")]
pub use xlsx::XlsxDecoder;

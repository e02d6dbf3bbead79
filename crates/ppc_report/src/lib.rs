//! ppc_report/src/lib.rs — Pure report model + renderers (text/JSON).
//!
//! Rules:
//! - No I/O here. Callers pass rows already projected by the view.
//! - Only visible columns are emitted, always in the fixed column order.
//! - Cells are pre-formatted strings; renderers never touch the numbers.

#![deny(unsafe_code)]

use core::fmt;

use ppc_core::{AggregatedRow, Column, Preferences};

pub mod format;
pub mod render_text;
#[cfg(feature = "render_json")]
pub mod render_json;

pub use format::{cell_text, money, percent, ratio_2dp};
pub use render_text::render_text;
#[cfg(feature = "render_json")]
pub use render_json::{render_json, report_json};

/// Shown when no slot holds any rows.
pub const MSG_NO_DATA: &str = "No data loaded. Please upload your SP and/or SB reports above.";
/// Shown when rows exist but none survive filter and search.
pub const MSG_NO_MATCH: &str = "No rows match the current filters.";

// ===== Errors =====
#[derive(Debug)]
pub enum ReportError {
    Serialize(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Serialize(m) => write!(f, "serialize: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,          // one cell per visible column
    pub message: Option<&'static str>,   // set iff `rows` is empty
}

impl ReportModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ===== API =====

/// Build the display model.
///
/// `has_data` is whether any aggregated rows exist before the view was
/// applied; it picks the empty-table message.
pub fn build_model(shown: &[&AggregatedRow], prefs: &Preferences, has_data: bool) -> ReportModel {
    let columns = prefs.visible_columns();
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|r| columns.iter().map(|c| cell_text(*c, r)).collect())
        .collect();
    let message = match (rows.is_empty(), has_data) {
        (false, _) => None,
        (true, false) => Some(MSG_NO_DATA),
        (true, true) => Some(MSG_NO_MATCH),
    };
    ReportModel { columns, rows, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::AdType;

    pub(crate) fn sample() -> AggregatedRow {
        AggregatedRow {
            search_term: "red shoes".into(),
            impressions: 400,
            clicks: 20,
            spend: 30.0,
            sales: 45.5,
            orders: 3,
            ad_type: AdType::SponsoredProducts,
            cpc: 1.5,
            conv: 0.15,
            roas: 45.5 / 30.0,
            p_spend: 0.75,
            p_sales: 1.0,
        }
    }

    #[test]
    fn model_respects_visibility_and_order() {
        let r = sample();
        let mut prefs = Preferences::default();
        prefs.set_visible(Column::Impressions, false);
        prefs.set_visible(Column::Cpc, false);
        let m = build_model(&[&r], &prefs, true);
        assert_eq!(m.columns.len(), 10);
        assert_eq!(m.columns[1], Column::Clicks);
        assert_eq!(m.rows[0][0], "red shoes");
        assert_eq!(m.rows[0][1], "20");
        assert_eq!(m.message, None);
    }

    #[test]
    fn empty_messages() {
        let prefs = Preferences::default();
        assert_eq!(build_model(&[], &prefs, false).message, Some(MSG_NO_DATA));
        assert_eq!(build_model(&[], &prefs, true).message, Some(MSG_NO_MATCH));
    }
}

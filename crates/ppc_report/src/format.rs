//! Cell text per column.
//!
//! Money and ROAS use two decimals, percentages one decimal of `x * 100`.

use ppc_core::{AggregatedRow, Column};

pub fn money(x: f64) -> String {
    format!("${x:.2}")
}

pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn ratio_2dp(x: f64) -> String {
    format!("{x:.2}")
}

pub fn cell_text(col: Column, r: &AggregatedRow) -> String {
    match col {
        Column::SearchTerm => r.search_term.clone(),
        Column::Impressions => r.impressions.to_string(),
        Column::Clicks => r.clicks.to_string(),
        Column::Spend => money(r.spend),
        Column::Sales => money(r.sales),
        Column::Orders => r.orders.to_string(),
        Column::AdType => r.ad_type.to_string(),
        Column::Cpc => money(r.cpc),
        Column::ConversionRate => percent(r.conv),
        Column::PctSpend => percent(r.p_spend),
        Column::PctSales => percent(r.p_sales),
        Column::Roas => ratio_2dp(r.roas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample;

    #[test]
    fn every_column_formats() {
        let r = sample();
        let cells: Vec<String> = Column::ALL.iter().map(|c| cell_text(*c, &r)).collect();
        assert_eq!(
            cells,
            vec![
                "red shoes", "400", "20", "$30.00", "$45.50", "3", "SPONSORED PRODUCTS",
                "$1.50", "15.0%", "75.0%", "100.0%", "1.52",
            ]
        );
    }

    #[test]
    fn zeros() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(ratio_2dp(0.0), "0.00");
    }
}

//! Derived ratios over the aggregated set.
//!
//! - `cpc  = spend / clicks`  (0 when clicks == 0)
//! - `conv = orders / clicks` (0 when clicks == 0)
//! - `roas = sales / spend`   (0 when spend == 0)
//! - `p_spend`, `p_sales`: share of the set total; a zero total is replaced
//!   by 1, so every share is 0 in that case.
//!
//! Shares depend on the whole set, so this always runs over all groups.

use ppc_core::{AggregatedRow, GroupTotals, Record};

use crate::aggregate::aggregate;

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

/// Attach derived metrics to every group, preserving input order.
pub fn derive_metrics(groups: Vec<GroupTotals>) -> Vec<AggregatedRow> {
    let total_spend: f64 = groups.iter().map(|g| g.spend).sum();
    let total_sales: f64 = groups.iter().map(|g| g.sales).sum();
    let spend_den = if total_spend == 0.0 { 1.0 } else { total_spend };
    let sales_den = if total_sales == 0.0 { 1.0 } else { total_sales };

    groups
        .into_iter()
        .map(|g| {
            let clicks = g.clicks as f64;
            AggregatedRow {
                cpc: ratio(g.spend, clicks),
                conv: ratio(g.orders as f64, clicks),
                roas: ratio(g.sales, g.spend),
                p_spend: g.spend / spend_den,
                p_sales: g.sales / sales_den,
                search_term: g.search_term,
                impressions: g.impressions,
                clicks: g.clicks,
                spend: g.spend,
                sales: g.sales,
                orders: g.orders,
                ad_type: g.ad_type,
            }
        })
        .collect()
}

/// Whole chain from records: aggregate, then derive.
pub fn build_rows<I>(records: I) -> Vec<AggregatedRow>
where
    I: IntoIterator<Item = Record>,
{
    derive_metrics(aggregate(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::AdType;

    fn group(term: &str, spend: f64, sales: f64, clicks: u64, orders: u64) -> GroupTotals {
        GroupTotals {
            search_term: term.into(),
            ad_type: AdType::SponsoredProducts,
            impressions: 0,
            clicks,
            spend,
            sales,
            orders,
        }
    }

    #[test]
    fn ratios_on_normal_group() {
        let rows = derive_metrics(vec![group("a", 10.0, 40.0, 4, 1)]);
        let r = &rows[0];
        assert_eq!(r.cpc, 2.5);
        assert_eq!(r.conv, 0.25);
        assert_eq!(r.roas, 4.0);
        assert_eq!(r.p_spend, 1.0);
        assert_eq!(r.p_sales, 1.0);
    }

    #[test]
    fn zero_denominators_yield_exact_zero() {
        let rows = derive_metrics(vec![group("a", 0.0, 5.0, 0, 3)]);
        let r = &rows[0];
        assert_eq!(r.cpc, 0.0);
        assert_eq!(r.conv, 0.0);
        assert_eq!(r.roas, 0.0);
        assert!(r.p_spend == 0.0 && r.p_sales == 1.0);
    }

    #[test]
    fn all_zero_totals_give_zero_shares() {
        let rows = derive_metrics(vec![group("a", 0.0, 0.0, 0, 0), group("b", 0.0, 0.0, 0, 0)]);
        assert!(rows.iter().all(|r| r.p_spend == 0.0 && r.p_sales == 0.0));
    }

    #[test]
    fn shares_split_the_total() {
        let rows = derive_metrics(vec![group("a", 30.0, 0.0, 1, 0), group("b", 10.0, 0.0, 1, 0)]);
        assert_eq!(rows[0].p_spend, 0.75);
        assert_eq!(rows[1].p_spend, 0.25);
        assert_eq!(rows[0].search_term, "a");
    }

    #[test]
    fn build_rows_end_to_end() {
        let rec = |spend: f64, clicks: u64| Record {
            search_term: "red shoes".into(),
            impressions: 0,
            clicks,
            spend,
            sales: 0.0,
            orders: 0,
            ad_type: AdType::SponsoredProducts,
        };
        let rows = build_rows(vec![rec(10.0, 5), rec(20.0, 15)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spend, 30.0);
        assert_eq!(rows[0].clicks, 20);
        assert_eq!(rows[0].roas, 0.0);
        assert_eq!(rows[0].cpc, 1.5);
    }
}

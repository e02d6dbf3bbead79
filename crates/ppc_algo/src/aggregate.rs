//! Aggregation by structural `(search_term, ad_type)` key.
//!
//! Contract:
//! - The first record of a key seeds its group; later records add the five
//!   additive fields (impressions, clicks, spend, sales, orders).
//! - Output groups are in first-seen order.
//! - Counts saturate instead of wrapping.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use ppc_core::{GroupKey, GroupTotals, Record};

/// Fold records into per-key totals. Retains nothing between calls.
pub fn aggregate<I>(records: I) -> Vec<GroupTotals>
where
    I: IntoIterator<Item = Record>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<GroupTotals> = Vec::new();

    for r in records {
        match index.entry(r.key()) {
            Entry::Occupied(slot) => {
                let g = &mut groups[*slot.get()];
                g.impressions = g.impressions.saturating_add(r.impressions);
                g.clicks = g.clicks.saturating_add(r.clicks);
                g.spend += r.spend;
                g.sales += r.sales;
                g.orders = g.orders.saturating_add(r.orders);
            }
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(GroupTotals::from(r));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::AdType;

    fn rec(term: &str, ad: AdType, spend: f64, clicks: u64) -> Record {
        Record {
            search_term: term.into(),
            impressions: 10,
            clicks,
            spend,
            sales: 0.0,
            orders: 1,
            ad_type: ad,
        }
    }

    #[test]
    fn same_key_merges() {
        let out = aggregate(vec![
            rec("red shoes", AdType::SponsoredProducts, 10.0, 5),
            rec("red shoes", AdType::SponsoredProducts, 20.0, 15),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].spend, 30.0);
        assert_eq!(out[0].clicks, 20);
        assert_eq!(out[0].impressions, 20);
        assert_eq!(out[0].orders, 2);
    }

    #[test]
    fn ad_type_and_case_split_groups_in_first_seen_order() {
        let out = aggregate(vec![
            rec("b", AdType::SponsoredBrands, 1.0, 1),
            rec("a", AdType::SponsoredProducts, 1.0, 1),
            rec("b", AdType::SponsoredBrandsVideo, 1.0, 1),
            rec("B", AdType::SponsoredBrands, 1.0, 1),
            rec("a", AdType::SponsoredProducts, 1.0, 1),
        ]);
        let keys: Vec<(&str, AdType)> =
            out.iter().map(|g| (g.search_term.as_str(), g.ad_type)).collect();
        assert_eq!(
            keys,
            vec![
                ("b", AdType::SponsoredBrands),
                ("a", AdType::SponsoredProducts),
                ("b", AdType::SponsoredBrandsVideo),
                ("B", AdType::SponsoredBrands),
            ]
        );
        assert_eq!(out[1].clicks, 2);
    }

    #[test]
    fn zero_groups_are_kept() {
        let out = aggregate(vec![rec("x", AdType::SponsoredProducts, 0.0, 0)]);
        assert_eq!(out.len(), 1);
        assert!(aggregate(Vec::new()).is_empty());
    }
}

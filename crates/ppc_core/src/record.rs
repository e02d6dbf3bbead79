//! Canonical records and their aggregated form.

use crate::kinds::AdType;

/// Canonical per-line fact produced by the normalizer. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Record {
    pub search_term: String,          // never empty
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,                   // >= 0
    pub sales: f64,                   // >= 0; 14-day, else 7-day
    pub orders: u64,
    pub ad_type: AdType,
}

impl Record {
    pub fn key(&self) -> GroupKey {
        GroupKey { search_term: self.search_term.clone(), ad_type: self.ad_type }
    }
}

/// Structural aggregation identity. Exact, case-sensitive on `search_term`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub search_term: String,
    pub ad_type: AdType,
}

/// Running additive totals for one `GroupKey`. Seeded from the first record
/// of the group; later records add into it.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupTotals {
    pub search_term: String,
    pub ad_type: AdType,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub sales: f64,
    pub orders: u64,
}

impl GroupTotals {
    pub fn key(&self) -> GroupKey {
        GroupKey { search_term: self.search_term.clone(), ad_type: self.ad_type }
    }
}

impl From<Record> for GroupTotals {
    fn from(r: Record) -> Self {
        GroupTotals {
            search_term: r.search_term,
            ad_type: r.ad_type,
            impressions: r.impressions,
            clicks: r.clicks,
            spend: r.spend,
            sales: r.sales,
            orders: r.orders,
        }
    }
}

/// Aggregated totals plus derived ratios. Frozen once built.
///
/// Field order matches the structural text dump used by free-text search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AggregatedRow {
    pub search_term: String,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub sales: f64,
    pub orders: u64,
    pub ad_type: AdType,
    pub cpc: f64,                     // spend / clicks, 0 when clicks == 0
    pub conv: f64,                    // orders / clicks, 0 when clicks == 0
    pub roas: f64,                    // sales / spend, 0 when spend == 0
    pub p_spend: f64,                 // share of total spend
    pub p_sales: f64,                 // share of total sales
}

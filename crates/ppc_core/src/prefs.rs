//! View preferences: column visibility, sort key, ad-type filter.
//!
//! The core treats this as an opaque value owned by the consumer; storage
//! lives in `ppc_io::prefs_store`.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use crate::columns::Column;
use crate::errors::CoreError;
use crate::kinds::AdType;

label_enum! {
    /// Metric the view sorts by (always descending).
    SortKey => {
        Sales = "sales",
        Spend = "spend",
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Sales
    }
}

/// Ad-type filter: everything, or exactly one variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdFilter {
    #[default]
    All,
    Only(AdType),
}

impl AdFilter {
    pub const ALL_LABEL: &'static str = "ALL";

    pub fn as_str(self) -> &'static str {
        match self {
            AdFilter::All => Self::ALL_LABEL,
            AdFilter::Only(t) => t.as_str(),
        }
    }

    /// Exact-equality filter rule.
    #[inline]
    pub fn admits(self, ad_type: AdType) -> bool {
        match self {
            AdFilter::All => true,
            AdFilter::Only(t) => t == ad_type,
        }
    }
}

impl fmt::Display for AdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(AdFilter::All);
        }
        s.parse::<AdType>()
            .map(AdFilter::Only)
            .map_err(|_| CoreError::UnknownLabel("AdFilter"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AdFilter {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AdFilter {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as DeError, Unexpected};
        let s = String::deserialize(d)?;
        s.parse().map_err(|_| {
            D::Error::invalid_value(Unexpected::Str(&s), &"ALL or an ad-type label")
        })
    }
}

/// Consumer-owned view preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Preferences {
    /// Column label → visible. A column missing from the map is hidden.
    pub visible: BTreeMap<Column, bool>,
    pub sort_by: SortKey,
    pub ad_filter: AdFilter,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            visible: Column::ALL.iter().map(|c| (*c, true)).collect(),
            sort_by: SortKey::default(),
            ad_filter: AdFilter::default(),
        }
    }
}

impl Preferences {
    pub fn is_visible(&self, col: Column) -> bool {
        self.visible.get(&col).copied().unwrap_or(false)
    }

    pub fn set_visible(&mut self, col: Column, on: bool) {
        self.visible.insert(col, on);
    }

    pub fn toggle(&mut self, col: Column) {
        let on = self.is_visible(col);
        self.set_visible(col, !on);
    }

    /// Visible columns in fixed display order.
    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL.iter().copied().filter(|c| self.is_visible(*c)).collect()
    }
}

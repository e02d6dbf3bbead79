//! ppc_core — Core types for the PPC report engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`ppc_io`, `ppc_algo`, `ppc_pipeline`, `ppc_report`, `ppc_cli`):
//!
//! - Closed label enumerations: `SourceKind`, `AdType`, `Column`, `SortKey`
//! - Loosely typed decoded rows: `CellValue`, `RawRow`
//! - Canonical facts: `Record`, `GroupKey`, `GroupTotals`, `AggregatedRow`
//! - View preferences: `Preferences`, `AdFilter`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod columns;
pub mod errors;
pub mod kinds;
pub mod prefs;
pub mod raw;
pub mod record;

pub use columns::Column;
pub use errors::CoreError;
pub use kinds::{AdType, SourceKind};
pub use prefs::{AdFilter, Preferences, SortKey};
pub use raw::{CellValue, RawRow, TrimmedRow};
pub use record::{AggregatedRow, GroupKey, GroupTotals, Record};

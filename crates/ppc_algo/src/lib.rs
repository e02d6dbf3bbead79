// crates/ppc_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure transformation stages, in pipeline order:
//! normalize → classify → aggregate → derive metrics.
//!
//! Nothing here retains state between calls; the caller owns the records and
//! re-runs the whole chain whenever its inputs change.

pub mod aggregate;
pub mod classify;
pub mod metrics;
pub mod normalize;

// Convenience re-exports (pipeline imports these from crate root)
pub use aggregate::aggregate;
pub use classify::classify_ad_type;
pub use metrics::{build_rows, derive_metrics};
pub use normalize::{normalize_row, normalize_rows, number_or_zero};

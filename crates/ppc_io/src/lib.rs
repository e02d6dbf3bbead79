//! crates/ppc_io/src/lib.rs
//! I/O crate for the report engine. Everything that touches bytes or the
//! filesystem lives here; the algorithm crates stay pure.
//!
//! - `sheet`: first-sheet `.xlsx` decoding into `RawRow`s (`SheetDecoder` seam)
//! - `precheck`: file eligibility rule and the `UploadedFile` carrier
//! - `prefs_store`: lenient preferences load (merge over defaults) and save
//! - `canonical_json`: sorted-key compact JSON and atomic file writes

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for ppc_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// The sheet decoder rejected the bytes of a file.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json doesn't keep a pointer; default to root.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod precheck;
pub mod prefs_store;
pub mod sheet;

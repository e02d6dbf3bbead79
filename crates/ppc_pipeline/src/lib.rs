//! ppc_pipeline — report pipeline surface (precheck → decode → normalize → aggregate → metrics → view).
//! Bytes come in through `ppc_io`, math is delegated to `ppc_algo`. The only
//! state kept here is the per-slot `ReportSession`; the view is a pure projection.

#![forbid(unsafe_code)]

use core::fmt;
use std::path::Path;

use tracing::warn;

use ppc_io::precheck::{display_name, UploadedFile};

pub mod load;
pub mod view;

#[cfg(feature = "async")]
pub mod concurrent;

pub use load::{prepare_records, Completion, LoadFailure, LoadSummary, ReportSession, SlotTicket, Upload};
pub use view::{project, search_text};

#[cfg(feature = "async")]
pub use concurrent::{load_blocking, load_concurrent};

/// Single error surface for pipeline orchestration (runtime setup). Per-file
/// problems are not errors here; they become [`LoadFailure`]s inside the
/// session alert.
#[derive(Debug)]
pub enum PipelineError {
    Io(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::Io(e.to_string())
    }
}

/// Read a local file into an upload buffer. A read error is kept as the
/// slot's failure so the other slot still loads.
pub fn open_upload(path: &Path) -> Upload {
    UploadedFile::read_from_path(path).map_err(|e| {
        let name = display_name(path);
        warn!(file = %name, error = %e, "could not read file");
        LoadFailure::ReadFailed { name, reason: e.to_string() }
    })
}

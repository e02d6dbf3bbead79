//! crates/ppc_io/src/precheck.rs
//! Upload eligibility, checked before any decode is attempted.

use std::fs;
use std::path::Path;

use crate::IoResult;

/// A file must be strictly larger than this to be considered.
pub const MIN_SPREADSHEET_BYTES: u64 = 100;

/// `.xlsx` suffix (case-insensitive) and more than [`MIN_SPREADSHEET_BYTES`] bytes.
pub fn is_valid_spreadsheet(name: &str, len: u64) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xlsx") && len > MIN_SPREADSHEET_BYTES
}

/// Name shown in alerts: the final path component, else the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A named byte buffer handed to a session slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        UploadedFile { name: name.into(), bytes }
    }

    /// Read a local file; the name is [`display_name`] of the path.
    pub fn read_from_path(path: &Path) -> IoResult<Self> {
        let bytes = fs::read(path)?;
        Ok(UploadedFile { name: display_name(path), bytes })
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_eligible(&self) -> bool {
        is_valid_spreadsheet(&self.name, self.len())
    }
}

//! Upload slots and the report session.
//!
//! A session holds one slot per source kind. Loading a file into a slot goes
//! through a ticket: `assign` bumps the slot generation and hands out a
//! `SlotTicket`; `complete` applies a result only if the ticket is still the
//! newest for that slot. Older results are discarded as stale.
//!
//! After every applied completion the row set is rebuilt from all loaded
//! slots (SP records first, then SB).

use core::fmt;

use tracing::{debug, warn};

use ppc_algo::{build_rows, normalize_rows};
use ppc_core::{AggregatedRow, Record, SourceKind};
use ppc_io::precheck::UploadedFile;
use ppc_io::sheet::SheetDecoder;

/// Per-file failure. `Display` is the user-facing alert text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadFailure {
    /// The file could not be read from disk.
    ReadFailed { name: String, reason: String },
    /// Rejected by the precheck; never reached the decoder.
    InvalidFile { name: String },
    /// The decoder could not read the file.
    DecodeFailed { name: String, reason: String },
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::ReadFailed { name, .. } => write!(f, "Could not read file: {name}"),
            LoadFailure::InvalidFile { name } => {
                write!(f, "{name} is not a valid, non-empty .xlsx file.")
            }
            LoadFailure::DecodeFailed { name, .. } => write!(f, "Failed to parse file: {name}"),
        }
    }
}

impl std::error::Error for LoadFailure {}

/// A file handed to a slot, or the reason it never made it into memory.
pub type Upload = Result<UploadedFile, LoadFailure>;

/// Precheck, decode and normalize one upload. Pure apart from decoding.
pub fn prepare_records(
    decoder: &dyn SheetDecoder,
    kind: SourceKind,
    file: &UploadedFile,
) -> Result<Vec<Record>, LoadFailure> {
    if !file.is_eligible() {
        return Err(LoadFailure::InvalidFile { name: file.name.clone() });
    }
    let raw = decoder.decode(&file.bytes).map_err(|e| {
        debug!(file = %file.name, error = %e, "decode failed");
        LoadFailure::DecodeFailed { name: file.name.clone(), reason: e.to_string() }
    })?;
    let records = normalize_rows(&raw, kind);
    debug!(file = %file.name, kind = %kind, records = records.len(), "normalized");
    Ok(records)
}

/// Claim on the result slot for one decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotTicket {
    kind: SourceKind,
    generation: u64,
}

impl SlotTicket {
    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

/// What `complete` did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Loaded,
    Failed,
    /// A newer ticket exists for the slot; the result was dropped.
    Stale,
}

/// Per-attempt tally, by slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: Vec<SourceKind>,
    pub failed: Vec<SourceKind>,
    pub stale: Vec<SourceKind>,
}

impl LoadSummary {
    pub fn record(&mut self, kind: SourceKind, c: Completion) {
        match c {
            Completion::Loaded => self.loaded.push(kind),
            Completion::Failed => self.failed.push(kind),
            Completion::Stale => self.stale.push(kind),
        }
    }

    pub fn any_failed(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
struct SlotState {
    generation: u64,
    pending: bool,
    records: Option<Vec<Record>>,
}

/// Single logical session: two slots, the derived rows, and the current alert.
#[derive(Clone, Debug, Default)]
pub struct ReportSession {
    sp: SlotState,
    sb: SlotState,
    rows: Vec<AggregatedRow>,
    failures: Vec<LoadFailure>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: SourceKind) -> &SlotState {
        match kind {
            SourceKind::Sp => &self.sp,
            SourceKind::Sb => &self.sb,
        }
    }

    fn slot_mut(&mut self, kind: SourceKind) -> &mut SlotState {
        match kind {
            SourceKind::Sp => &mut self.sp,
            SourceKind::Sb => &mut self.sb,
        }
    }

    /// Start a new load attempt: the previous alert is cleared.
    pub fn begin_attempt(&mut self) {
        self.failures.clear();
    }

    /// Hand out the newest ticket for `kind`; any older ticket becomes stale.
    pub fn assign(&mut self, kind: SourceKind) -> SlotTicket {
        let slot = self.slot_mut(kind);
        slot.generation += 1;
        slot.pending = true;
        SlotTicket { kind, generation: slot.generation }
    }

    /// Apply a decode result for `ticket`, unless a newer ticket superseded it.
    pub fn complete(
        &mut self,
        ticket: SlotTicket,
        outcome: Result<Vec<Record>, LoadFailure>,
    ) -> Completion {
        let slot = self.slot_mut(ticket.kind);
        if ticket.generation != slot.generation {
            warn!(
                kind = %ticket.kind,
                ticket = ticket.generation,
                current = slot.generation,
                "discarding stale decode result"
            );
            return Completion::Stale;
        }
        slot.pending = false;
        let done = match outcome {
            Ok(records) => {
                slot.records = Some(records);
                Completion::Loaded
            }
            Err(failure) => {
                slot.records = None;
                self.failures.push(failure);
                Completion::Failed
            }
        };
        self.rebuild();
        done
    }

    /// Empty one slot. Outstanding tickets for it become stale.
    pub fn clear(&mut self, kind: SourceKind) {
        let slot = self.slot_mut(kind);
        slot.generation += 1;
        slot.pending = false;
        slot.records = None;
        self.rebuild();
    }

    /// Empty both slots and the alert.
    pub fn reset(&mut self) {
        for kind in SourceKind::ALL {
            self.clear(*kind);
        }
        self.failures.clear();
    }

    fn rebuild(&mut self) {
        let records = [&self.sp, &self.sb]
            .into_iter()
            .filter_map(|s| s.records.as_ref())
            .flat_map(|r| r.iter().cloned());
        self.rows = build_rows(records);
        debug!(rows = self.rows.len(), "aggregated rows rebuilt");
    }

    /// Whether any slot still waits for a decode result.
    pub fn is_pending(&self) -> bool {
        self.sp.pending || self.sb.pending
    }

    /// Final aggregated rows; `None` while any ticket is outstanding.
    pub fn rows(&self) -> Option<&[AggregatedRow]> {
        if self.is_pending() {
            None
        } else {
            Some(&self.rows)
        }
    }

    /// Whether a slot currently holds records (possibly zero of them).
    pub fn is_loaded(&self, kind: SourceKind) -> bool {
        self.slot(kind).records.is_some()
    }

    /// Failures of the current attempt.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// All failure messages of the current attempt joined with `"; "`.
    pub fn alert(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let msgs: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        Some(msgs.join("; "))
    }

    /// One synchronous load attempt over the given uploads, in order.
    pub fn load_sync(
        &mut self,
        decoder: &dyn SheetDecoder,
        uploads: Vec<(SourceKind, Upload)>,
    ) -> LoadSummary {
        self.begin_attempt();
        let mut summary = LoadSummary::default();
        for (kind, upload) in uploads {
            let ticket = self.assign(kind);
            let outcome = upload.and_then(|file| prepare_records(decoder, kind, &file));
            summary.record(kind, self.complete(ticket, outcome));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::{AdType, RawRow};
    use ppc_io::IoResult;

    /// Decoder returning a fixed row set regardless of input.
    struct Fixed(Vec<RawRow>);

    impl SheetDecoder for Fixed {
        fn decode(&self, _bytes: &[u8]) -> IoResult<Vec<RawRow>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl SheetDecoder for Broken {
        fn decode(&self, _bytes: &[u8]) -> IoResult<Vec<RawRow>> {
            Err(ppc_io::IoError::Decode("zip".into()))
        }
    }

    fn xlsx(name: &str) -> UploadedFile {
        UploadedFile::new(name, vec![0u8; 200])
    }

    fn upload(name: &str) -> Upload {
        Ok(xlsx(name))
    }

    fn rec(term: &str, spend: f64) -> Record {
        Record {
            search_term: term.into(),
            impressions: 0,
            clicks: 1,
            spend,
            sales: 0.0,
            orders: 0,
            ad_type: AdType::SponsoredProducts,
        }
    }

    #[test]
    fn invalid_file_never_reaches_decoder() {
        let err = prepare_records(&Broken, SourceKind::Sp, &UploadedFile::new("a.csv", vec![0; 500]))
            .unwrap_err();
        assert_eq!(err.to_string(), "a.csv is not a valid, non-empty .xlsx file.");
        let err = prepare_records(&Broken, SourceKind::Sp, &xlsx("tiny.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse file: tiny.xlsx");
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut s = ReportSession::new();
        let old = s.assign(SourceKind::Sp);
        let new = s.assign(SourceKind::Sp);
        assert!(s.rows().is_none());

        assert_eq!(s.complete(new, Ok(vec![rec("new", 1.0)])), Completion::Loaded);
        assert_eq!(s.complete(old, Ok(vec![rec("old", 1.0)])), Completion::Stale);

        let rows = s.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].search_term, "new");
    }

    #[test]
    fn rows_hidden_while_any_slot_pending() {
        let mut s = ReportSession::new();
        let sp = s.assign(SourceKind::Sp);
        let sb = s.assign(SourceKind::Sb);
        s.complete(sp, Ok(vec![rec("a", 1.0)]));
        assert!(s.rows().is_none());
        s.complete(sb, Ok(vec![]));
        assert_eq!(s.rows().map(<[_]>::len), Some(1));
    }

    #[test]
    fn failures_are_isolated_and_joined() {
        let mut s = ReportSession::new();
        let good = Fixed(vec![RawRow::new().with("Search Term", "x").with("Spend", 2.0)]);
        s.load_sync(&good, vec![(SourceKind::Sb, upload("sb.xlsx"))]);
        assert!(s.is_loaded(SourceKind::Sb));

        let summary = s.load_sync(
            &Broken,
            vec![
                (SourceKind::Sp, Ok(UploadedFile::new("sp.txt", vec![0; 500]))),
                (SourceKind::Sb, upload("sb2.xlsx")),
            ],
        );
        assert_eq!(summary.failed, vec![SourceKind::Sp, SourceKind::Sb]);
        assert_eq!(
            s.alert().as_deref(),
            Some("sp.txt is not a valid, non-empty .xlsx file.; Failed to parse file: sb2.xlsx")
        );
        assert!(!s.is_loaded(SourceKind::Sb));
        assert_eq!(s.rows().map(<[_]>::len), Some(0));
    }

    #[test]
    fn failed_slot_keeps_other_slot_rows() {
        let mut s = ReportSession::new();
        let good = Fixed(vec![RawRow::new().with("Customer Search Term", "x").with("Spend", 2.0)]);
        s.load_sync(&good, vec![(SourceKind::Sp, upload("sp.xlsx"))]);
        s.load_sync(&Broken, vec![(SourceKind::Sb, upload("sb.xlsx"))]);
        let rows = s.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ad_type, AdType::SponsoredProducts);
        assert_eq!(s.alert().as_deref(), Some("Failed to parse file: sb.xlsx"));
    }

    #[test]
    fn unreadable_file_is_a_slot_failure() {
        let mut s = ReportSession::new();
        let good = Fixed(vec![RawRow::new().with("Search Term", "hat").with("Spend", 3.0)]);
        let unreadable = LoadFailure::ReadFailed { name: "sp.xlsx".into(), reason: "permission denied".into() };
        let summary = s.load_sync(
            &good,
            vec![(SourceKind::Sp, Err(unreadable)), (SourceKind::Sb, upload("sb.xlsx"))],
        );
        assert_eq!(summary.failed, vec![SourceKind::Sp]);
        assert_eq!(summary.loaded, vec![SourceKind::Sb]);
        assert_eq!(s.alert().as_deref(), Some("Could not read file: sp.xlsx"));
        assert!(!s.is_loaded(SourceKind::Sp));
        let rows = s.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ad_type, AdType::SponsoredBrands);
    }

    #[test]
    fn alert_clears_on_next_attempt() {
        let mut s = ReportSession::new();
        s.load_sync(&Broken, vec![(SourceKind::Sp, upload("sp.xlsx"))]);
        assert!(s.alert().is_some());
        s.load_sync(&Fixed(vec![]), vec![(SourceKind::Sp, upload("sp.xlsx"))]);
        assert_eq!(s.alert(), None);
    }

    #[test]
    fn clear_and_reset() {
        let mut s = ReportSession::new();
        let t = s.assign(SourceKind::Sb);
        s.clear(SourceKind::Sb);
        assert_eq!(s.complete(t, Ok(vec![rec("late", 1.0)])), Completion::Stale);
        assert_eq!(s.rows().map(<[_]>::len), Some(0));

        let t = s.assign(SourceKind::Sp);
        s.complete(t, Ok(vec![rec("a", 1.0)]));
        s.reset();
        assert!(!s.is_loaded(SourceKind::Sp));
        assert_eq!(s.rows().map(<[_]>::len), Some(0));
    }
}

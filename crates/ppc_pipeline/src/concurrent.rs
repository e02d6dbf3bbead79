//! Concurrent two-slot loading on tokio's blocking pool.
//!
//! Both decodes are in flight together; the session only exposes rows once
//! both have resolved. Uses the same ticket protocol as `load_sync`. An upload
//! that already failed to read settles its slot without spawning a task.

use std::sync::Arc;

use tokio::task::JoinError;
use tracing::warn;

use ppc_core::{Record, SourceKind};
use ppc_io::precheck::UploadedFile;
use ppc_io::sheet::SheetDecoder;

use crate::load::{prepare_records, LoadFailure, LoadSummary, ReportSession, SlotTicket, Upload};
use crate::PipelineError;

type Outcome = Result<Vec<Record>, LoadFailure>;

async fn decode_in_background<D>(
    decoder: Arc<D>,
    kind: SourceKind,
    upload: Option<Upload>,
) -> Option<Result<Outcome, (String, JoinError)>>
where
    D: SheetDecoder + 'static,
{
    let file: UploadedFile = match upload? {
        Ok(file) => file,
        Err(failure) => return Some(Ok(Err(failure))),
    };
    let name = file.name.clone();
    let res = tokio::task::spawn_blocking(move || prepare_records(decoder.as_ref(), kind, &file)).await;
    Some(res.map_err(|e| (name, e)))
}

fn settle(
    session: &mut ReportSession,
    summary: &mut LoadSummary,
    ticket: Option<SlotTicket>,
    res: Option<Result<Outcome, (String, JoinError)>>,
) {
    let (Some(ticket), Some(res)) = (ticket, res) else { return };
    let outcome = res.unwrap_or_else(|(name, e)| {
        warn!(file = %name, error = %e, "decode task did not finish");
        Err(LoadFailure::DecodeFailed { name, reason: e.to_string() })
    });
    let kind = ticket.kind();
    summary.record(kind, session.complete(ticket, outcome));
}

/// One load attempt for whichever of `sp` / `sb` is given.
pub async fn load_concurrent<D>(
    session: &mut ReportSession,
    decoder: Arc<D>,
    sp: Option<Upload>,
    sb: Option<Upload>,
) -> LoadSummary
where
    D: SheetDecoder + 'static,
{
    session.begin_attempt();
    let sp_ticket = sp.as_ref().map(|_| session.assign(SourceKind::Sp));
    let sb_ticket = sb.as_ref().map(|_| session.assign(SourceKind::Sb));

    let (sp_res, sb_res) = tokio::join!(
        decode_in_background(Arc::clone(&decoder), SourceKind::Sp, sp),
        decode_in_background(decoder, SourceKind::Sb, sb),
    );

    let mut summary = LoadSummary::default();
    settle(session, &mut summary, sp_ticket, sp_res);
    settle(session, &mut summary, sb_ticket, sb_res);
    summary
}

/// [`load_concurrent`] on a fresh multi-thread runtime, for callers that do
/// not run one themselves.
pub fn load_blocking<D>(
    session: &mut ReportSession,
    decoder: Arc<D>,
    sp: Option<Upload>,
    sb: Option<Upload>,
) -> Result<LoadSummary, PipelineError>
where
    D: SheetDecoder + 'static,
{
    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    Ok(rt.block_on(load_concurrent(session, decoder, sp, sb)))
}

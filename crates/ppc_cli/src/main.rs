// crates/ppc_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, CLI parsing, logging, and the
// single run path: prefs → load (both slots concurrently) → view → render.

mod args; // sibling module in this crate

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    /// At least one report was rejected; the other slot's rows were still printed.
    pub const REJECTED: i32 = 3;
    pub const IO: i32 = 4;
}

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, Format};

use ppc_core::{Preferences, SourceKind};
use ppc_io::prefs_store::{load_preferences, save_preferences};
use ppc_io::sheet::XlsxDecoder;
use ppc_pipeline::{load_blocking, open_upload, project, LoadSummary, PipelineError, ReportSession};
use ppc_report::{build_model, render_text};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad flag values or unusable preference JSON.
    Validation(String),
    /// Read/write/path errors, runtime setup.
    Io(String),
    /// Report serialization.
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "{m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

impl From<ppc_io::IoError> for MainError {
    fn from(e: ppc_io::IoError) -> Self {
        use ppc_io::IoError::*;
        match e {
            Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
            Path(m) | Decode(m) => MainError::Io(m),
        }
    }
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Io(m) => MainError::Io(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ppc: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_tracing(args.quiet);

    let rc = match run_once(&args) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("ppc: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// `RUST_LOG` wins unless `--quiet`; default level is `warn`. Logs go to stderr.
fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => IO,
    }
}

/// Loaded preferences with flag overrides applied on top.
fn effective_preferences(args: &Args) -> Result<Preferences, MainError> {
    let mut prefs = match &args.prefs {
        Some(p) => load_preferences(p)?,
        None => Preferences::default(),
    };
    if let Some(k) = args.sort {
        prefs.sort_by = k;
    }
    if let Some(f) = args.ad_filter {
        prefs.ad_filter = f;
    }
    for c in &args.hide {
        prefs.set_visible(*c, false);
    }
    for c in &args.show {
        prefs.set_visible(*c, true);
    }
    Ok(prefs)
}

fn load_reports(args: &Args, session: &mut ReportSession) -> Result<LoadSummary, MainError> {
    // Read errors stay per slot and end up in the joined alert.
    let sp = args.sp.as_deref().map(open_upload);
    let sb = args.sb.as_deref().map(open_upload);
    if sp.is_none() && sb.is_none() {
        return Ok(LoadSummary::default());
    }

    #[cfg(feature = "progress")]
    let spinner = (!args.quiet).then(|| {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_message("Loading report(s)...");
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    });

    let summary = load_blocking(session, Arc::new(XlsxDecoder::new()), sp, sb);

    #[cfg(feature = "progress")]
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    summary.map_err(MainError::from)
}

fn run_once(args: &Args) -> Result<i32, MainError> {
    let prefs = effective_preferences(args)?;

    let mut session = ReportSession::new();
    let summary = load_reports(args, &mut session)?;
    if let Some(alert) = session.alert() {
        eprintln!("{alert}");
    }

    let rows = session.rows().unwrap_or_default();
    let shown = project(rows, &prefs, &args.search);
    info!(
        sp = session.is_loaded(SourceKind::Sp),
        sb = session.is_loaded(SourceKind::Sb),
        aggregated = rows.len(),
        shown = shown.len(),
        "report ready"
    );

    let model = build_model(&shown, &prefs, !rows.is_empty());
    match args.format {
        Format::Text => print!("{}", render_text(&model)),
        #[cfg(feature = "report-json")]
        Format::Json => {
            let out = ppc_report::render_json(&model).map_err(|e| MainError::Render(e.to_string()))?;
            println!("{out}");
        }
        #[cfg(not(feature = "report-json"))]
        Format::Json => return Err(MainError::Validation("--format json is not supported by this build".into())),
    }

    if args.save_prefs {
        if let Some(path) = &args.prefs {
            save_preferences(path, &prefs)?;
            info!(path = %path.display(), "preferences saved");
        }
    }

    Ok(if summary.any_failed() { exitcodes::REJECTED } else { exitcodes::OK })
}

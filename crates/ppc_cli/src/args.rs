// crates/ppc_cli/src/args.rs
//
// CLI argument surface and validation.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - --sp / --sb must name existing local files when given; both are optional
// - --prefs may name a file that does not exist yet (defaults are used)
// - --save-prefs requires --prefs
// - Column names for --hide/--show use the display labels ("% Spend", "Conv%", ...)

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use ppc_core::{AdFilter, Column, SortKey};

/// Output format for the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ppc",
    disable_help_subcommand = true,
    about = "Merge Sponsored Products / Sponsored Brands search-term reports into one table"
)]
pub struct Args {
    // --- Inputs ---
    /// Sponsored Products search-term report (.xlsx).
    #[arg(long)]
    pub sp: Option<PathBuf>,
    /// Sponsored Brands search-term report (.xlsx).
    #[arg(long)]
    pub sb: Option<PathBuf>,

    // --- Preferences ---
    /// Preferences JSON file (column visibility, sort key, ad-type filter).
    #[arg(long)]
    pub prefs: Option<PathBuf>,
    /// Write the effective preferences back to --prefs.
    #[arg(long, requires = "prefs")]
    pub save_prefs: bool,

    // --- View overrides (applied on top of the loaded preferences) ---
    /// Sort key, always descending: sales | spend.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,
    /// Ad-type filter: ALL, "SPONSORED PRODUCTS", "SPONSORED BRANDS", "SPONSORED BRANDS VIDEO".
    #[arg(long, value_parser = parse_ad_filter)]
    pub ad_filter: Option<AdFilter>,
    /// Free-text search over every field of a row (case-insensitive).
    #[arg(long, default_value = "")]
    pub search: String,
    /// Hide a column (repeatable).
    #[arg(long, value_parser = parse_column)]
    pub hide: Vec<Column>,
    /// Show a column (repeatable; applied after --hide).
    #[arg(long, value_parser = parse_column)]
    pub show: Vec<Column>,

    // --- Output & control ---
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only log errors.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    Unsupported(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            Unsupported(s) => write!(f, "not supported by this build: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse().map_err(|_| format!("unknown sort key '{s}' (expected sales or spend)"))
}

fn parse_ad_filter(s: &str) -> Result<AdFilter, String> {
    s.parse().map_err(|_| format!("unknown ad type '{s}'"))
}

fn parse_column(s: &str) -> Result<Column, String> {
    s.parse().map_err(|_| format!("unknown column '{s}'"))
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

/// Ensure a provided path string is local (no scheme).
#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(args: Args) -> Result<Args, CliError> {
    if let Some(p) = &args.sp {
        ensure_local_exists(p, "--sp")?;
    }
    if let Some(p) = &args.sb {
        ensure_local_exists(p, "--sb")?;
    }
    if let Some(p) = &args.prefs {
        ensure_local_path(p)?;
    }
    if args.format == Format::Json && !cfg!(feature = "report-json") {
        return Err(CliError::Unsupported("--format json"));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_core::AdType;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("ppc").chain(argv.iter().copied()))
    }

    #[test]
    fn view_flags_parse() {
        let a = parse(&[
            "--sort", "spend",
            "--ad-filter", "sponsored_brands_video",
            "--hide", "Impressions",
            "--hide", "Conv%",
            "--show", "% Spend",
            "--format", "json",
        ])
        .unwrap();
        assert_eq!(a.sort, Some(SortKey::Spend));
        assert_eq!(a.ad_filter, Some(AdFilter::Only(AdType::SponsoredBrandsVideo)));
        assert_eq!(a.hide, vec![Column::Impressions, Column::ConversionRate]);
        assert_eq!(a.show, vec![Column::PctSpend]);
        assert_eq!(a.format, Format::Json);
        assert!(a.search.is_empty());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse(&["--sort", "clicks"]).is_err());
        assert!(parse(&["--hide", "Nope"]).is_err());
        assert!(parse(&["--ad-filter", "SBV"]).is_err());
        assert!(parse(&["--save-prefs"]).is_err(), "--save-prefs needs --prefs");
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.xlsx")).is_err());
        assert!(ensure_local_path(Path::new("https://x/y.xlsx")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\file.xlsx")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/file.xlsx")).is_ok());
    }

    #[test]
    fn validate_checks_inputs_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("sp.xlsx");
        let a = parse(&["--sp", missing.to_str().unwrap()]).unwrap();
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));

        std::fs::write(&missing, b"x").unwrap();
        let prefs = dir.path().join("not-yet.json");
        let a = parse(&["--sp", missing.to_str().unwrap(), "--prefs", prefs.to_str().unwrap()]).unwrap();
        assert!(validate(a).is_ok());

        let a = parse(&["--prefs", "https://example.com/p.json"]).unwrap();
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));
    }
}

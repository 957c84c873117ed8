//! charset-audit — checks that HTML documents declare their charset early.
//!
//! A document passes when its Content-Type header carries a `charset`
//! parameter, when it starts with a byte-order mark, or when a complete
//! `<meta>` charset declaration fits in the first 1024 bytes.
//!
//! ```text
//! charset-audit index.html
//! charset-audit -H "Content-Type: text/html; charset=utf-8" index.html
//! charset-audit --records-json records.json --final-url https://example.com/ page.html
//! ```

mod records;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use charset_core::document::{DocumentContent, MainDocument, ResponseHeader, ResponseHeaders};
use charset_core::options::AuditOptions;
use charset_core::report::AuditReport;

#[derive(Parser)]
#[command(
    name = "charset-audit",
    version,
    about = "Check that HTML documents declare their character encoding early enough"
)]
struct Cli {
    /// HTML documents to audit
    #[arg(required_unless_present = "dump_config")]
    files: Vec<PathBuf>,

    /// Response header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// JSON file with response headers: [{"name": ..., "value": ...}]
    #[arg(long, conflicts_with = "records_json")]
    headers_json: Option<PathBuf>,

    /// JSON file with network records; the main document is picked by --final-url
    #[arg(long, requires = "final_url")]
    records_json: Option<PathBuf>,

    /// Final URL of the page, used to find the main document record
    #[arg(long)]
    final_url: Option<String>,

    /// Treat files as UTF-8 text that was decoded from this transfer encoding
    #[arg(long)]
    decoded_from: Option<String>,

    /// Number of leading bytes scanned for a <meta> declaration
    #[arg(long)]
    window_bytes: Option<usize>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dump effective merged config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Load config from global and project-local TOML files.
/// Later files override earlier ones. Missing files are silently ignored.
fn load_config() -> AuditOptions {
    let mut opts = AuditOptions::default();

    // 1. Global config: ~/.config/charset-audit/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("charset-audit").join("config.toml");
        if let Some(parsed) = read_config(&global_path) {
            opts = parsed;
        }
    }

    // 2. Project-local config: ./.charset-audit.toml
    if let Some(parsed) = read_config(Path::new(".charset-audit.toml")) {
        opts = parsed;
    }

    opts
}

fn read_config(path: &Path) -> Option<AuditOptions> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AuditOptions>(&contents) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the CLI flag was explicitly provided.
fn apply_cli_overrides(opts: &mut AuditOptions, cli: &Cli) {
    if cli.verbose > 0 {
        opts.verbose = cli.verbose;
    }
    if let Some(window) = cli.window_bytes {
        opts.window_bytes = window;
    }
    if cli.decoded_from.is_some() {
        opts.transfer_encoding = cli.decoded_from.clone();
    }
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let level = log_filter(verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();

    let mut opts = load_config();
    apply_cli_overrides(&mut opts, &cli);
    init_logging(opts.verbose);

    if cli.dump_config {
        match toml::to_string_pretty(&opts) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    match run(&cli, &opts) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Audit every file. Returns whether all of them passed.
fn run(cli: &Cli, opts: &AuditOptions) -> Result<bool> {
    opts.validate()?;

    let headers = resolve_headers(cli)?;
    let documents = cli
        .files
        .iter()
        .map(|path| -> Result<MainDocument> {
            Ok(MainDocument::new(headers.clone(), read_content(path, opts)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let engine = charset_detectors::standard_engine()?;
    let reports: Vec<AuditReport> = engine
        .determine_batch(&documents, opts)
        .into_iter()
        .map(|d| AuditReport::from_determination(d, opts))
        .collect();

    if cli.json {
        let entries: Vec<serde_json::Value> = cli
            .files
            .iter()
            .zip(&reports)
            .map(|(path, report)| {
                serde_json::json!({ "file": path.display().to_string(), "report": report })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (path, report) in cli.files.iter().zip(&reports) {
            let status = if report.passed { "PASS" } else { "FAIL" };
            println!("{}\t{}\t{}", status, path.display(), report.explanation);
        }
    }

    Ok(reports.iter().all(|r| r.passed))
}

/// Main-document headers from the JSON inputs, followed by any `-H` flags.
fn resolve_headers(cli: &Cli) -> Result<ResponseHeaders> {
    let mut headers = match (&cli.headers_json, &cli.records_json, &cli.final_url) {
        (Some(path), _, _) => records::load_headers(path)?,
        (None, Some(path), Some(final_url)) => {
            let records = records::load_records(path)?;
            records::main_document_headers(&records, final_url)?
        }
        _ => ResponseHeaders::new(),
    };

    for line in &cli.headers {
        let header: ResponseHeader = line
            .parse()
            .with_context(|| format!("Invalid --header '{}'", line))?;
        headers.push(header.name, header.value);
    }
    Ok(headers)
}

/// Read a document as transfer bytes.
///
/// With a transfer encoding configured the file holds decoded UTF-8 text,
/// which is re-encoded so the byte window matches what was transferred.
fn read_content(path: &Path, opts: &AuditOptions) -> Result<DocumentContent> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;

    if opts.transfer_encoding.is_none() {
        return Ok(DocumentContent::from_bytes(bytes));
    }

    let encoding = opts.encoding()?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not UTF-8 text", path.display()))?;
    log::debug!("Re-encoding {} as {}", path.display(), encoding.name());
    Ok(DocumentContent::from_decoded(&text, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("charset-audit").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_overrides() {
        let cli = cli(&["--window-bytes", "512", "--decoded-from", "latin1", "-vv", "a.html"]);
        let mut opts = AuditOptions::default();
        apply_cli_overrides(&mut opts, &cli);

        assert_eq!(opts.window_bytes, 512);
        assert_eq!(opts.transfer_encoding.as_deref(), Some("latin1"));
        assert_eq!(opts.verbose, 2);
    }

    #[test]
    fn test_cli_keeps_config_when_flags_absent() {
        let cli = cli(&["a.html"]);
        let mut opts = AuditOptions {
            window_bytes: 2048,
            ..Default::default()
        };
        apply_cli_overrides(&mut opts, &cli);
        assert_eq!(opts.window_bytes, 2048);
        assert_eq!(opts.transfer_encoding, None);
    }

    #[test]
    fn test_config_verbosity_sets_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "verbose = 2\n").unwrap();

        let mut opts = read_config(&path).unwrap();
        apply_cli_overrides(&mut opts, &cli(&["a.html"]));
        assert_eq!(opts.verbose, 2);
        assert_eq!(log_filter(opts.verbose), "debug");

        apply_cli_overrides(&mut opts, &cli(&["-v", "a.html"]));
        assert_eq!(log_filter(opts.verbose), "info");
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(3), "trace");
        assert_eq!(log_filter(9), "trace");
    }

    #[test]
    fn test_header_flags_append_in_order() {
        let cli = cli(&[
            "-H",
            "Content-Type: text/html; charset=utf-8",
            "--header",
            "content-type: text/plain",
            "a.html",
        ]);
        let headers = resolve_headers(&cli).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type"), Some("text/html; charset=utf-8"));
    }

    #[test]
    fn test_bad_header_flag() {
        let cli = cli(&["-H", "no-colon", "a.html"]);
        assert!(resolve_headers(&cli).is_err());
    }

    #[test]
    fn test_run_reports_pass_and_fail() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        let late = dir.path().join("late.html");
        std::fs::write(&good, r#"<meta charset="utf-8"><p>hi</p>"#).unwrap();
        std::fs::write(&late, format!("{}<meta charset=\"utf-8\">", " ".repeat(1100))).unwrap();

        let good_str = good.to_str().unwrap();
        let late_str = late.to_str().unwrap();
        let opts = AuditOptions::default();

        assert!(run(&cli(&[good_str]), &opts).unwrap());
        assert!(!run(&cli(&[good_str, late_str]), &opts).unwrap());
        let with_header = cli(&["-H", "Content-Type: text/html;charset=utf-8", late_str]);
        assert!(run(&with_header, &opts).unwrap());
    }

    #[test]
    fn test_read_content_re_encodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "café").unwrap();

        let raw = read_content(&path, &AuditOptions::default()).unwrap();
        assert_eq!(raw.len(), 5);

        let opts = AuditOptions {
            transfer_encoding: Some("windows-1252".to_string()),
            ..Default::default()
        };
        let decoded = read_content(&path, &opts).unwrap();
        assert_eq!(decoded.as_bytes(), b"caf\xE9");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let opts = AuditOptions::default();
        assert!(run(&cli(&["/nonexistent/page.html"]), &opts).is_err());
    }
}

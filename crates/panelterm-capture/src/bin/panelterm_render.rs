use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use panelterm_capture::{Capture, CaptureError, FieldSpec, ReadbackProfile, log_record};
use panelterm_core::ScreenConfig;
use tracing_subscriber::EnvFilter;

/// Reconstruct the screen of a raw instrument console capture.
#[derive(Parser, Debug)]
#[command(name = "panelterm-render")]
#[command(about = "Render a raw VT100 console capture to plain text", long_about = None)]
#[command(version)]
struct Args {
    /// Raw capture file
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Write the rendered text here instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Initial row count (overrides PANELTERM_ROWS)
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Column count (overrides PANELTERM_COLS)
    #[arg(long, value_name = "N")]
    cols: Option<usize>,

    /// Built-in field layout to read back
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Extra field to read back; may be repeated
    #[arg(long = "field", value_name = "NAME=ROW:COL:WIDTH")]
    fields: Vec<String>,

    /// Append the readback to this log file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Helium level and shield temperature
    Magnet,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn screen_config(args: &Args) -> ScreenConfig {
    let parsed = ScreenConfig::from_env_with_diagnostics();
    for err in &parsed.errors {
        tracing::warn!(%err, "ignoring invalid environment setting");
    }
    let mut config = parsed.config;
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    config
}

fn profile(args: &Args) -> Result<ReadbackProfile, CaptureError> {
    let mut profile = match args.preset {
        Some(Preset::Magnet) => ReadbackProfile::magnet(),
        None => ReadbackProfile::default(),
    };
    for spec in &args.fields {
        profile.push(FieldSpec::parse(spec)?);
    }
    Ok(profile)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = screen_config(&args);
    let profile = profile(&args)?;
    let capture = Capture::load(&args.input, &config)?;
    let text = capture.render();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.output {
        Some(path) => fs::write(path, &text).map_err(|e| CaptureError::Io {
            path: path.clone(),
            source: e,
        })?,
        None => out.write_all(text.as_bytes())?,
    }

    if profile.is_empty() {
        if args.log.is_some() {
            tracing::warn!("--log given without --preset or --field; nothing to record");
        }
        return Ok(());
    }

    let readback = capture.readback(&profile);
    for (field, value) in readback.iter() {
        tracing::debug!(field, value = value.unwrap_or("<blank>"), "readback");
    }
    writeln!(out, "{}", readback.to_json()?)?;
    if let Some(path) = &args.log {
        log_record::append_record(path, &readback)?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("panelterm-render error: {err}");
        std::process::exit(1);
    }
}

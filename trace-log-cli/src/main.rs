//! Trace Log Analyzer CLI Application
//!
//! This is the command-line interface for the protocol trace decoder.
//! It uses the trace-log-decoder library and adds:
//! - Loading exported text traces from disk
//! - KPI threshold evaluation
//! - Report generation (TXT/JSON)

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use trace_log_decoder::TraceDecoder;

mod config;
mod report;
mod thresholds;

use config::{AppConfig, OutputFormat};
use report::{Report, TraceReport};

/// Trace Log Analyzer - Extract KPIs from exported modem protocol traces
#[derive(Parser, Debug)]
#[command(name = "trace-log-cli")]
#[command(about = "Extract RF, call setup and handover KPIs from protocol trace logs", long_about = None)]
#[command(version)]
struct Args {
    /// Text trace file(s) to analyze
    #[arg(value_name = "FILE")]
    logs: Vec<PathBuf>,

    /// Additional trace file (can be repeated)
    #[arg(short, long, value_name = "FILE")]
    log: Vec<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Handover lookahead horizon in RRC events
    #[arg(long, value_name = "EVENTS")]
    lookahead: Option<usize>,

    /// Exit with an error if any KPI check fails
    #[arg(long)]
    strict: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Trace Log Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", trace_log_decoder::VERSION);

    let config = resolve_config(&args)?;

    if config.input.files.is_empty() {
        println!("Trace Log Analyzer - No input specified");
        println!("\nQuick Start:");
        println!("  trace-log-cli drive_test.txt");
        println!("  trace-log-cli --log a.txt --log b.txt --format json");
        println!("\nWith KPI thresholds:");
        println!("  trace-log-cli --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    let report = analyze(&config)?;
    let rendered = match config.output.format {
        OutputFormat::Txt => report.to_txt(),
        OutputFormat::Json => report.to_json()?,
    };

    match &config.output.file {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    let failed = report.failed_checks();
    if config.output.strict && failed > 0 {
        bail!("{} KPI check(s) failed", failed);
    }

    Ok(())
}

/// Merge the optional config file with command line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    config.input.files.extend(args.logs.iter().cloned());
    config.input.files.extend(args.log.iter().cloned());

    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = &args.output {
        config.output.file = Some(output.clone());
    }
    if let Some(lookahead) = args.lookahead {
        config.decoder.handover_lookahead = lookahead;
    }
    config.output.strict |= args.strict;

    config
        .decoder
        .validate()
        .context("Invalid decoder settings")?;

    Ok(config)
}

/// Decode every input trace in parallel, keeping input order in the report
fn analyze(config: &AppConfig) -> Result<Report> {
    let decoder = TraceDecoder::new(config.decoder.clone());

    let traces = config
        .input
        .files
        .par_iter()
        .map(|path| -> Result<TraceReport> {
            let log = decoder
                .decode_file(path)
                .with_context(|| format!("Failed to decode trace: {:?}", path))?;
            Ok(TraceReport::build(path.clone(), &log, &config.thresholds))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Report::new(traces))
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_trace(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "trace-log-cli",
            "a.txt",
            "--log",
            "b.txt",
            "--format",
            "json",
            "--lookahead",
            "3",
            "--strict",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(
            config.input.files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.decoder.handover_lookahead, 3);
        assert!(config.output.strict);
    }

    #[test]
    fn test_zero_lookahead_rejected() {
        let args = Args::parse_from(["trace-log-cli", "a.txt", "--lookahead", "0"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_analyze_keeps_input_order() {
        let ok = write_trace(
            "2026-02-03 10:00:00.000  [RRC] RRC Reconfiguration (Handover Command) - Source Cell: 123\n\
             2026-02-03 10:00:00.050  [RRC] RRC Reconfiguration Complete - Target Cell: 456\n",
        );
        let failed = write_trace(
            "2026-02-03 10:10:00.000  [RRC] RRC Reconfiguration (Handover Command) - Source Cell: 111\n\
             2026-02-03 10:10:02.000  [RRC] RRC Connection Re-establishment Request\n",
        );

        let mut config = AppConfig::default();
        config.input.files = vec![ok.path().to_path_buf(), failed.path().to_path_buf()];
        let report = analyze(&config).unwrap();

        assert_eq!(report.traces.len(), 2);
        assert_eq!(report.traces[0].file, ok.path());
        assert!(report.traces[0].handovers[0].success);
        assert!(!report.traces[1].handovers[0].success);
        assert_eq!(report.overall_handovers.successes, 1);
    }

    #[test]
    fn test_analyze_surfaces_bad_timestamp() {
        let bad = write_trace("2026-02-31 10:00:00.000  [RRC] RRC Connection Request\n");
        let mut config = AppConfig::default();
        config.input.files = vec![bad.path().to_path_buf()];
        let err = analyze(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid timestamp on line 1"));
    }
}

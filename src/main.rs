//! wp2md - Convert a blog export post to markdown
//!
//! Usage:
//!   wp2md post.txt                 # writes post.md
//!   wp2md ./post.txt --report report.json
//!   wp2md post.txt -vv --debuglogfile wp2md.log

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use wp2md::config;
use wp2md::converter::{output_path_for, ConversionReport, LineConverter};

#[derive(ValueEnum, Clone, Debug)]
enum ReportFormat {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert a blog export post to markdown",
    long_about = "Converts a single exported post to markdown.\n\n\
                  The output is written next to the input: everything from the first '.'\n\
                  of the file name is replaced by '.md'."
)]
struct Cli {
    /// Post to convert
    #[arg(value_name = "FILE")]
    file: String,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/wp2md/wp2md.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write a conversion report
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    report_format: ReportFormat,

    /// debug log file
    #[arg(short, long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<PathBuf>) -> anyhow::Result<()> {
    let mut loggers = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) as Box<dyn simplelog::SharedLogger>];
    if let Some(filename) = logfile {
        let file = File::create(&filename)
            .with_context(|| format!("cannot create log file {}", filename.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            filter_level,
            simplelog::Config::default(),
            file,
        ) as Box<dyn simplelog::SharedLogger>);
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.clone())?;

    let loaded = config::load_config(args.config.as_deref())?;
    if let Some(path) = &loaded.path {
        log::info!("Using config {}", path.display());
    }

    let converter = LineConverter::new(loaded.options)?;
    let paths = output_path_for(&args.file);

    let report = converter
        .convert_file(&paths.input, &paths.output)
        .with_context(|| format!("cannot convert {}", paths.input.display()))?;

    if let Some(report_path) = &args.report {
        write_report(&report, report_path, &args.report_format)?;
        log::info!("Report written to {}", report_path.display());
    }

    Ok(())
}

fn write_report(
    report: &ConversionReport,
    path: &Path,
    format: &ReportFormat,
) -> anyhow::Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Text => report.to_text(),
    };
    fs::write(path, content)
        .with_context(|| format!("cannot write report {}", path.display()))?;
    Ok(())
}

//! dirsift - per-directory file metadata reports.
//!
//! Thin binary entry point. The engine lives in `dirsift-core`, the report
//! passes in `dirsift-report`; this layer parses arguments, initialises
//! logging, drives the run, and maps failures to documented exit codes.

use clap::Parser;
use dirsift_core::{ProgressEvent, ProgressSink};
use dirsift_report::{ReportConfig, ReportError, ReportFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dirsift",
    version,
    about = "Walk a directory tree and write per-directory file metadata reports"
)]
struct Cli {
    /// Directory to scan
    #[arg(short = 'i', long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory to write reports into (mirrors the input hierarchy)
    #[arg(short = 'o', long)]
    output_dir: PathBuf,

    /// Keep only files whose relative path contains this substring
    #[arg(long, value_name = "SUBSTR")]
    input_file: Option<String>,

    /// Within each directory, keep only files whose path contains this
    /// substring before selecting one
    #[arg(short = 'e', long, value_name = "EXT")]
    extension: Option<String>,

    /// Which surviving file to analyse per directory: f(irst), m(iddle),
    /// l(ast), or a zero-based index
    #[arg(long, default_value = "f", value_name = "SPEC")]
    file_index: String,

    /// Base name for report files; %field tokens substitute record values
    #[arg(long, default_value = "report", value_name = "STEM")]
    output_file_stem: String,

    /// Report formats to write: json, csv, col, raw, html
    #[arg(
        long,
        default_value = "json",
        value_delimiter = ',',
        value_name = "FMT[,FMT...]"
    )]
    output_file_type: Vec<String>,

    /// Restrict reports to these record fields, in order
    #[arg(long, value_delimiter = ',', value_name = "FIELD[,FIELD...]")]
    fields: Option<Vec<String>>,

    /// Read the field list from a file instead, one name per line
    #[arg(long, value_name = "FILE", conflicts_with = "fields")]
    fields_file: Option<PathBuf>,

    /// Echo each raw report to stdout
    #[arg(long)]
    print_to_screen: bool,

    /// Suppress the per-directory progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Star-bar progress on stderr, one line per completed directory.
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, event: ProgressEvent) {
        eprintln!(
            "[{:3}/{:3}: {:5.2}%] {}",
            event.index,
            event.total,
            event.percent,
            "*".repeat(event.percent as usize)
        );
    }
}

impl Cli {
    fn into_config(self) -> Result<(ReportConfig, bool), ReportError> {
        let file_index = self.file_index.parse()?;
        let formats = self
            .output_file_type
            .iter()
            .map(|spec| spec.parse::<ReportFormat>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            ReportConfig {
                input_dir: self.input_dir,
                output_dir: self.output_dir,
                input_file: self.input_file,
                extension: self.extension,
                file_index,
                output_stem: self.output_file_stem,
                formats,
                fields: self.fields,
                fields_file: self.fields_file,
                print_to_screen: self.print_to_screen,
            },
            self.quiet,
        ))
    }
}

/// Print the structured fatal block and return the documented exit code.
fn report_fatal(err: &ReportError) -> i32 {
    let code = err.exit_code();
    eprintln!();
    eprintln!(":: FATAL ERROR ::");
    eprintln!();
    eprintln!("\tWhile {},", err.action());
    eprintln!("\t{err}");
    eprintln!();
    eprintln!("Returning to system with error code {code}");
    code
}

fn run(cli: Cli) -> Result<(), ReportError> {
    let (config, quiet) = cli.into_config()?;

    let summary = if quiet {
        dirsift_report::run(&config, &mut dirsift_core::NullProgress)?
    } else {
        dirsift_report::run(&config, &mut ConsoleProgress)?
    };

    println!(
        "{} directories analysed, {} report files written",
        summary.directories, summary.reports_written
    );
    Ok(())
}

fn main() {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        std::process::exit(report_fatal(&err));
    }
}

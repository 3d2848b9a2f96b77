//! Report-driver error kinds.
//!
//! Each kind carries what the CLI's fatal block needs: a human phrasing of
//! the action that was underway (`action`) and the documented process exit
//! code (`exit_code`). Pass failures surfacing through the engine are
//! downcast back to `ReportError` where possible; anything else rides in
//! the `Pass` variant untouched.

use dirsift_core::EngineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Engine-side failure (missing root, mixed-parent grouping).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Unparseable `--file-index` specifier, or an index past the end of a
    /// directory's filtered file list.
    #[error("file index '{spec}' not usable, expected f, m, l, or an in-range number")]
    InvalidFileIndex { spec: String },

    /// Unknown report format name.
    #[error("output format '{spec}' not recognised, expected json, csv, col, raw, or html")]
    UnknownFormat { spec: String },

    /// A selected file's metadata could not be read.
    #[error("could not read metadata for '{path}': {source}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `--fields-file` could not be read.
    #[error("could not read field list file '{path}': {source}")]
    FieldListFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory's file group was emptied by the extension filter.
    #[error("no file in '{dir}' survives the extension filter")]
    EmptySelection { dir: PathBuf },

    /// A report file or its directory could not be written.
    #[error("could not write report '{path}': {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON rendering failure.
    #[error("could not render json report: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering failure.
    #[error("could not render csv report: {0}")]
    Csv(#[from] csv::Error),

    /// An analysis or output pass failed with an error the driver does not
    /// own. Carried verbatim; the engine never wraps pass failures.
    #[error("{0}")]
    Pass(anyhow::Error),
}

impl ReportError {
    /// The documented process exit code for this kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::MetadataRead { .. } => 10,
            ReportError::FieldListFile { .. } => 20,
            _ => 1,
        }
    }

    /// Human phrasing of the action underway when the failure hit, for the
    /// CLI's fatal block ("While <action>, ...").
    pub fn action(&self) -> &'static str {
        match self {
            ReportError::Engine(EngineError::MissingInputDir { .. }) => {
                "checking on the input directory"
            }
            ReportError::Engine(EngineError::MixedParentGrouping { .. }) => {
                "grouping files by parent directory"
            }
            ReportError::InvalidFileIndex { .. } => "parsing the file index specifier",
            ReportError::UnknownFormat { .. } => "parsing the output format list",
            ReportError::MetadataRead { .. } => "reading file metadata",
            ReportError::FieldListFile { .. } => "reading the field list file",
            ReportError::EmptySelection { .. } => "selecting a file to analyse",
            ReportError::WriteReport { .. } => "writing report output",
            ReportError::Json(_) | ReportError::Csv(_) => "rendering a report",
            ReportError::Pass(_) => "running an analysis pass",
        }
    }

    /// Downcast a pass failure back to its `ReportError` if it is one.
    pub fn from_pass(err: anyhow::Error) -> Self {
        match err.downcast::<ReportError>() {
            Ok(report) => report,
            Err(other) => ReportError::Pass(other),
        }
    }
}

//! Report run configuration.
//!
//! One explicit struct with named, typed fields and spelled-out defaults.
//! The CLI populates it; the passes read from it at construction time, so
//! nothing downstream ever inspects a dynamic bag of options.

use crate::error::ReportError;
use std::path::PathBuf;
use std::str::FromStr;

/// Which file of a directory's (filtered) group gets analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileIndex {
    /// The first file in discovery order (the default).
    #[default]
    First,
    /// The file at the midpoint of the group.
    Middle,
    /// The last file in discovery order.
    Last,
    /// An explicit zero-based position.
    Nth(usize),
}

impl FileIndex {
    /// Position into a group of `len` files, if the policy fits the group.
    pub fn position(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            FileIndex::First => Some(0),
            FileIndex::Middle => Some(len / 2),
            FileIndex::Last => Some(len - 1),
            FileIndex::Nth(n) => (n < len).then_some(n),
        }
    }
}

impl FromStr for FileIndex {
    type Err = ReportError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec {
            "f" | "first" => Ok(FileIndex::First),
            "m" | "middle" => Ok(FileIndex::Middle),
            "l" | "last" => Ok(FileIndex::Last),
            other => other
                .parse::<usize>()
                .map(FileIndex::Nth)
                .map_err(|_| ReportError::InvalidFileIndex {
                    spec: spec.to_string(),
                }),
        }
    }
}

/// A report rendering format and its file naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Col,
    Raw,
    Html,
}

impl ReportFormat {
    /// Report file name for a substituted stem.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ReportFormat::Json => format!("{stem}.json"),
            ReportFormat::Csv => format!("{stem}-csv.txt"),
            ReportFormat::Col => format!("{stem}-col.txt"),
            ReportFormat::Raw => format!("{stem}-raw.txt"),
            ReportFormat::Html => format!("{stem}.html"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "col" => Ok(ReportFormat::Col),
            "raw" => Ok(ReportFormat::Raw),
            "html" => Ok(ReportFormat::Html),
            other => Err(ReportError::UnknownFormat {
                spec: other.to_string(),
            }),
        }
    }
}

/// Everything one report run needs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Scan root. Must exist and be a directory.
    pub input_dir: PathBuf,
    /// Where the mirrored report hierarchy is written.
    pub output_dir: PathBuf,
    /// Keep only files whose root-relative path contains this substring.
    pub input_file: Option<String>,
    /// Within each directory, keep only files whose path contains this
    /// substring before selecting (e.g. an extension).
    pub extension: Option<String>,
    /// Which surviving file to analyse per directory.
    pub file_index: FileIndex,
    /// Report base name; `%field` tokens are substituted from the record.
    pub output_stem: String,
    /// Formats to render, one file each.
    pub formats: Vec<ReportFormat>,
    /// Restrict the record to these fields, in this order.
    pub fields: Option<Vec<String>>,
    /// Load the field list from a file instead (one name per line).
    /// Takes precedence over `fields`.
    pub fields_file: Option<PathBuf>,
    /// Echo each raw rendering to stdout as it is produced.
    pub print_to_screen: bool,
}

impl ReportConfig {
    /// A minimal run: scan `input_dir`, write JSON reports named `report`
    /// into `output_dir`, first file per directory, all fields.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            input_file: None,
            extension: None,
            file_index: FileIndex::default(),
            output_stem: "report".to_string(),
            formats: vec![ReportFormat::Json],
            fields: None,
            fields_file: None,
            print_to_screen: false,
        }
    }
}

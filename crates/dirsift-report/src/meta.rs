//! Stage-2 analysis pass: build the metadata record for a selected file.
//!
//! The input slot holds the path stage 1 committed (or, for single-pass
//! use, a raw group, in which case the first file stands in). The record is
//! a flat mapping of named fields in a fixed order; an optional field list
//! restricts and re-orders it.

use crate::config::ReportConfig;
use crate::error::ReportError;
use chrono::{DateTime, Utc};
use dirsift_core::{AnalysisPass, AnalysisResult, Slot};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Placeholder value for a requested field the record does not carry.
const NO_ATTRIBUTE: &str = "no attribute";

pub struct MetadataTags {
    root: PathBuf,
    fields: Option<Vec<String>>,
}

impl MetadataTags {
    /// Build the pass, loading the field list file if one is configured
    /// (it takes precedence over an inline list).
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        let fields = match &config.fields_file {
            Some(path) => Some(load_field_list(path)?),
            None => config.fields.clone(),
        };
        Ok(Self {
            root: config.input_dir.clone(),
            fields,
        })
    }
}

/// Read a field list file: one field name per line, blanks skipped.
pub fn load_field_list(path: &Path) -> Result<Vec<String>, ReportError> {
    let raw = fs::read_to_string(path).map_err(|source| ReportError::FieldListFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

impl AnalysisPass for MetadataTags {
    fn analyze(&mut self, _dir: &Path, input: &Slot) -> anyhow::Result<AnalysisResult> {
        let rel = selected_file(input)?;
        let full = self.root.join(&rel);

        let meta = fs::metadata(&full).map_err(|source| ReportError::MetadataRead {
            path: full.clone(),
            source,
        })?;

        let name = rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = rel
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = rel
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| ".".to_string(), |p| p.display().to_string());

        let mut record = AnalysisResult::new();
        record.insert("name".into(), json!(name));
        record.insert("dir".into(), json!(dir));
        record.insert("path".into(), json!(rel.display().to_string()));
        record.insert("size_bytes".into(), json!(meta.len()));
        record.insert("extension".into(), json!(extension));
        record.insert("category".into(), json!(categorise_extension(&extension)));
        record.insert("modified".into(), timestamp(meta.modified().ok()));
        record.insert("created".into(), timestamp(meta.created().ok()));
        record.insert("accessed".into(), timestamp(meta.accessed().ok()));
        record.insert("readonly".into(), json!(meta.permissions().readonly()));

        Ok(match &self.fields {
            Some(fields) => restrict_fields(&record, fields),
            None => record,
        })
    }
}

/// The file committed by the selection pass, or the head of a raw group.
fn selected_file(input: &Slot) -> anyhow::Result<PathBuf> {
    match input {
        Slot::Value(Value::String(path)) => Ok(PathBuf::from(path)),
        Slot::Files(files) => files
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("empty file group")),
        other => anyhow::bail!("metadata pass expects a selected file, got {other:?}"),
    }
}

fn timestamp(time: Option<SystemTime>) -> Value {
    match time {
        Some(time) => json!(DateTime::<Utc>::from(time).to_rfc3339()),
        None => Value::Null,
    }
}

/// Keep only the requested fields, in request order. A requested field the
/// record does not have still appears, holding a placeholder, so reports
/// stay column-stable across files.
fn restrict_fields(record: &AnalysisResult, fields: &[String]) -> AnalysisResult {
    let mut restricted = AnalysisResult::new();
    for field in fields {
        let value = record.get(field).cloned().unwrap_or(json!(NO_ATTRIBUTE));
        restricted.insert(field.clone(), value);
    }
    restricted
}

/// Broad category for a file extension, for the `category` record field.
pub fn categorise_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "doc" | "docx" | "pdf" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "ppt" | "pptx"
        | "md" | "epub" => "document",
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" | "tiff" | "tif"
        | "dcm" | "heic" => "image",
        "mp4" | "mkv" | "avi" | "mov" | "webm" | "mpg" | "mpeg" => "video",
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "opus" => "audio",
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "zst" | "iso" => "archive",
        "rs" | "py" | "js" | "ts" | "c" | "cpp" | "h" | "go" | "rb" | "java" | "html" | "css"
        | "json" | "xml" | "yaml" | "yml" | "toml" | "sql" | "sh" => "code",
        "exe" | "msi" | "dll" | "so" | "dylib" | "app" => "executable",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, rel: &str, bytes: usize) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![0u8; bytes]).unwrap();
    }

    fn pass(root: &Path, fields: Option<Vec<String>>) -> MetadataTags {
        MetadataTags {
            root: root.to_path_buf(),
            fields,
        }
    }

    #[test]
    fn record_carries_the_expected_fields() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/scan.dcm", 128);

        let record = pass(tmp.path(), None)
            .analyze(Path::new("a"), &Slot::Value(json!("a/scan.dcm")))
            .unwrap();

        assert_eq!(record["name"], "scan.dcm");
        assert_eq!(record["dir"], "a");
        assert_eq!(record["path"], "a/scan.dcm");
        assert_eq!(record["size_bytes"], 128);
        assert_eq!(record["extension"], "dcm");
        assert_eq!(record["category"], "image");
        assert!(record["modified"].is_string());
        assert_eq!(record["readonly"], false);
    }

    #[test]
    fn field_list_restricts_and_orders() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/x.bin", 10);

        let fields = vec!["size_bytes".to_string(), "name".to_string(), "bogus".to_string()];
        let record = pass(tmp.path(), Some(fields))
            .analyze(Path::new("a"), &Slot::Value(json!("a/x.bin")))
            .unwrap();

        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, ["size_bytes", "name", "bogus"]);
        assert_eq!(record["bogus"], NO_ATTRIBUTE);
    }

    #[test]
    fn missing_file_is_a_metadata_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = pass(tmp.path(), None)
            .analyze(Path::new("a"), &Slot::Value(json!("a/gone.bin")))
            .unwrap_err();
        let report = ReportError::from_pass(err);
        assert!(matches!(report, ReportError::MetadataRead { .. }));
        assert_eq!(report.exit_code(), 10);
    }

    #[test]
    fn field_list_file_loads_one_name_per_line() {
        let tmp = TempDir::new().unwrap();
        let list = tmp.path().join("fields.txt");
        fs::write(&list, "name\n\n  size_bytes  \n").unwrap();

        let fields = load_field_list(&list).unwrap();
        assert_eq!(fields, ["name", "size_bytes"]);

        let err = load_field_list(&tmp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ReportError::FieldListFile { .. }));
        assert_eq!(err.exit_code(), 20);
    }

    #[test]
    fn raw_group_falls_back_to_its_first_file() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/first.txt", 5);

        let slot = Slot::Files(vec![PathBuf::from("a/first.txt")]);
        let record = pass(tmp.path(), None).analyze(Path::new("a"), &slot).unwrap();
        assert_eq!(record["name"], "first.txt");
        assert_eq!(record["category"], "document");
    }

    #[test]
    fn categories_cover_the_common_extensions() {
        assert_eq!(categorise_extension("DCM"), "image");
        assert_eq!(categorise_extension("rs"), "code");
        assert_eq!(categorise_extension("tar"), "archive");
        assert_eq!(categorise_extension(""), "other");
        assert_eq!(categorise_extension("weird"), "other");
    }
}

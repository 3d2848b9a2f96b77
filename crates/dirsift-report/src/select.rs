//! Stage-1 analysis pass: pick one representative file per directory.
//!
//! Runs against the raw file groups, filters by the configured extension
//! substring, and selects a single file by positional policy. Driven with
//! `apply_key = "file"` into the input tree, it rewrites each directory's
//! entry from a file list down to the one path stage 2 will analyse.

use crate::config::{FileIndex, ReportConfig};
use crate::error::ReportError;
use dirsift_core::{AnalysisPass, AnalysisResult, Slot};
use serde_json::json;
use std::path::Path;
use tracing::debug;

pub struct SelectFile {
    extension: Option<String>,
    index: FileIndex,
}

impl SelectFile {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            index: config.file_index,
        }
    }
}

impl AnalysisPass for SelectFile {
    fn analyze(&mut self, dir: &Path, input: &Slot) -> anyhow::Result<AnalysisResult> {
        let files = input
            .as_files()
            .ok_or_else(|| anyhow::anyhow!("selection pass expects a file group"))?;

        let surviving: Vec<&Path> = files
            .iter()
            .map(|p| p.as_path())
            .filter(|f| match &self.extension {
                Some(ext) if !ext.is_empty() => f.to_string_lossy().contains(ext.as_str()),
                _ => true,
            })
            .collect();

        if surviving.is_empty() {
            return Err(ReportError::EmptySelection {
                dir: dir.to_path_buf(),
            }
            .into());
        }

        let position =
            self.index
                .position(surviving.len())
                .ok_or_else(|| ReportError::InvalidFileIndex {
                    spec: format!("{:?}", self.index),
                })?;
        let chosen = surviving[position];
        debug!(dir = %dir.display(), file = %chosen.display(), "selected file");

        let mut result = AnalysisResult::new();
        result.insert("file".into(), json!(chosen.to_string_lossy()));
        Ok(result)
    }
}

//! The report-writing output pass.
//!
//! For each directory's record: substitute the stem template, render every
//! configured format, and write the files under the mirror of that
//! directory inside the output root. Paths are joined absolutely; the
//! process working directory is never touched, so the pass is re-entrant
//! and safe to interleave with anything.

use crate::config::{ReportConfig, ReportFormat};
use crate::error::ReportError;
use crate::render;
use dirsift_core::{AnalysisResult, OutputPass};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ReportWriter {
    output_dir: PathBuf,
    stem_template: String,
    formats: Vec<ReportFormat>,
    print_to_screen: bool,
}

impl ReportWriter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            stem_template: config.output_stem.clone(),
            formats: config.formats.clone(),
            print_to_screen: config.print_to_screen,
        }
    }

    fn render(&self, format: ReportFormat, record: &AnalysisResult) -> Result<String, ReportError> {
        Ok(match format {
            ReportFormat::Json => render::json(record)?,
            ReportFormat::Csv => render::csv(record)?,
            ReportFormat::Col => render::col(record),
            ReportFormat::Raw => render::raw(record),
            ReportFormat::Html => {
                let title = record
                    .get("name")
                    .map(render::value_text)
                    .unwrap_or_else(|| self.stem_template.clone());
                render::html(&title, &render::raw(record))
            }
        })
    }
}

impl OutputPass for ReportWriter {
    fn emit(&mut self, dir: &Path, result: &AnalysisResult) -> anyhow::Result<Value> {
        let target_dir = self.output_dir.join(dir);
        fs::create_dir_all(&target_dir).map_err(|source| ReportError::WriteReport {
            path: target_dir.clone(),
            source,
        })?;

        if self.print_to_screen {
            println!("{}", render::raw(result));
        }

        let stem = substitute_stem(&self.stem_template, result);
        let mut written = Vec::with_capacity(self.formats.len());

        for &format in &self.formats {
            let file_name = format.file_name(&stem);
            let path = target_dir.join(&file_name);
            let content = self.render(format, result)?;
            fs::write(&path, content).map_err(|source| ReportError::WriteReport {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "saved report file");
            written.push(json!(file_name));
        }

        Ok(json!({ "status": true, "written": written }))
    }
}

/// Replace `%field` tokens in the stem template with record values.
///
/// Longer field names substitute first so `%name` never clobbers the
/// prefix of `%name_something`.
pub fn substitute_stem(template: &str, record: &AnalysisResult) -> String {
    if !template.contains('%') {
        return template.to_string();
    }

    let mut fields: Vec<&String> = record.keys().collect();
    fields.sort_by_key(|field| std::cmp::Reverse(field.len()));

    let mut stem = template.to_string();
    for field in fields {
        let token = format!("%{field}");
        if stem.contains(&token) {
            stem = stem.replace(&token, &render::value_text(&record[field.as_str()]));
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> AnalysisResult {
        let mut map = AnalysisResult::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), value.clone());
        }
        map
    }

    #[test]
    fn plain_stem_passes_through() {
        let rec = record(&[("name", json!("x.bin"))]);
        assert_eq!(substitute_stem("report", &rec), "report");
    }

    #[test]
    fn tokens_substitute_from_the_record() {
        let rec = record(&[("name", json!("x.bin")), ("size_bytes", json!(42))]);
        assert_eq!(substitute_stem("%name-%size_bytes", &rec), "x.bin-42");
    }

    /// `%size_bytes` must not be half-eaten by a shorter `%size` field.
    #[test]
    fn longer_fields_substitute_first() {
        let rec = record(&[("size", json!("S")), ("size_bytes", json!(42))]);
        assert_eq!(substitute_stem("%size_bytes", &rec), "42");
    }

    #[test]
    fn unknown_tokens_stay_put() {
        let rec = record(&[("name", json!("x"))]);
        assert_eq!(substitute_stem("%missing", &rec), "%missing");
    }
}

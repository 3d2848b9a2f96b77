/// dirsift Report - the canonical driving program for the dirsift engine.
///
/// Turns a directory tree into per-directory file-metadata reports: one
/// representative file is selected per directory, its metadata record is
/// extracted, and the record is rendered into the configured formats under
/// an output tree mirroring the input hierarchy.
///
/// Everything here is an engine collaborator: two analysis passes, one
/// output pass, and the two-stage pipeline that chains them. The engine
/// owns traversal, the trees, and the dispatch loop.
///
/// # Modules
///
/// - [`config`] - The run configuration and its small parsed types.
/// - [`select`] - Stage 1: pick one file per directory.
/// - [`meta`] - Stage 2: extract the metadata record.
/// - [`render`] - Record-to-string renderers per format.
/// - [`output`] - The report writer and stem substitution.
/// - [`error`] - Driver error kinds with exit codes.
pub mod config;
pub mod error;
pub mod meta;
pub mod output;
pub mod render;
pub mod select;

pub use config::{FileIndex, ReportConfig, ReportFormat};
pub use error::ReportError;

use dirsift_core::{apply, collect, ApplyOptions, ApplyTarget, ProgressSink, TreePair};
use meta::MetadataTags;
use output::ReportWriter;
use select::SelectFile;
use tracing::{debug, info};

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    /// Directories that held at least one matching file.
    pub directories: usize,
    /// Report files written across all directories.
    pub reports_written: usize,
}

/// Run the full report pipeline.
///
/// Collect → build the paired trees → selection pass (rewrites the input
/// tree down to one file per directory) → extraction pass streaming each
/// record through the report writer. The second pass runs with
/// `persist_results = false`: once a record's reports are on disk only the
/// writer's small status object stays in memory.
pub fn run(config: &ReportConfig, progress: &mut dyn ProgressSink) -> Result<RunSummary, ReportError> {
    let collected = collect(&config.input_dir, config.input_file.as_deref())?;
    debug!(
        dirs = collected.dir_groups.len(),
        files = collected.file_groups.len(),
        "collection finished"
    );

    let mut trees = TreePair::build(collected.file_groups)?;
    info!(directories = trees.len(), "scan tree grouped");

    // Stage 1: one representative file per directory, committed back into
    // the input tree.
    let mut select = SelectFile::new(config);
    let select_options = ApplyOptions {
        target: ApplyTarget::Input,
        apply_key: Some("file".to_string()),
        persist_results: true,
    };
    apply(&mut trees, &mut select, None, &select_options, progress)
        .map_err(ReportError::from_pass)?;

    // Stage 2: extract and stream out, keeping only writer status objects.
    let mut tags = MetadataTags::from_config(config)?;
    let mut writer = ReportWriter::new(config);
    let extract_options = ApplyOptions {
        target: ApplyTarget::Output,
        apply_key: None,
        persist_results: false,
    };
    apply(
        &mut trees,
        &mut tags,
        Some(&mut writer),
        &extract_options,
        progress,
    )
    .map_err(ReportError::from_pass)?;

    let reports_written = trees
        .paths()
        .filter_map(|dir| trees.output(dir))
        .filter_map(|slot| slot.as_result())
        .filter_map(|status| status.get("written"))
        .filter_map(|written| written.as_array())
        .map(Vec::len)
        .sum();

    info!(
        directories = trees.len(),
        reports_written, "report run finished"
    );
    Ok(RunSummary {
        directories: trees.len(),
        reports_written,
    })
}

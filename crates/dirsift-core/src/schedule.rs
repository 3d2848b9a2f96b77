/// The analysis/output dispatch loop.
///
/// A pass visits every directory key in first-discovery order, hands the
/// current input value to an analysis pass, optionally projects one field
/// out of the result, optionally hands the full result to an output pass,
/// and commits exactly one value per key into the chosen tree. Which value
/// gets committed is the engine's one policy decision: under
/// `persist_results = false` a supplied output pass's (small) return value
/// replaces the (potentially large) analysis result the moment it has been
/// consumed, so raw payloads never accumulate across the whole tree.
///
/// The loop holds no state between paths and none between calls: a driving
/// program chains multiple `apply` calls with different passes to build a
/// pipeline, e.g. a filtering pass that rewrites the input tree followed by
/// an extraction pass that streams results out.
use crate::model::{AnalysisResult, Slot, TreePair};
use crate::progress::{ProgressEvent, ProgressSink};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Which tree receives the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyTarget {
    /// Rewrite the input tree in place (filtering passes).
    Input,
    /// Fill the output tree (the default).
    #[default]
    Output,
}

/// Per-pass policy, with the defaults spelled out.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Destination tree. Default: [`ApplyTarget::Output`].
    pub target: ApplyTarget,
    /// When set and present in a result, commit only that field's value
    /// instead of the whole result object. Default: commit the whole result.
    pub apply_key: Option<String>,
    /// When `false` *and* an output pass is supplied, the output pass's
    /// return value is committed instead of the analysis result, bounding
    /// memory. Default: `true` (keep raw results available for later
    /// passes).
    pub persist_results: bool,
}

impl Default for ApplyOptions {
    /// Commit whole results to the output tree and keep them there.
    fn default() -> Self {
        Self {
            target: ApplyTarget::default(),
            apply_key: None,
            persist_results: true,
        }
    }
}

/// One per-directory analysis step.
///
/// Receives the key and the current input value: a file group on a first
/// pass, or whatever an earlier pass committed there. Must not touch the
/// trees; the engine owns all commits.
pub trait AnalysisPass {
    fn analyze(&mut self, dir: &Path, input: &Slot) -> anyhow::Result<AnalysisResult>;
}

/// One per-directory output step.
///
/// Receives the full, unprojected analysis result. Side effects (writing
/// report files, printing) are its business; its return value is what the
/// engine commits under `persist_results = false`.
pub trait OutputPass {
    fn emit(&mut self, dir: &Path, result: &AnalysisResult) -> anyhow::Result<Value>;
}

/// What a completed pass touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ApplyStats {
    pub paths_visited: usize,
}

/// Run one pass over every key of the input tree, in iteration order.
///
/// Per path: analyze, project (`apply_key`), emit (if an output pass is
/// supplied), commit. The committed slot is replaced whole. Progress fires
/// after each path.
///
/// Pass failures are not caught: the first error aborts the iteration and
/// propagates untouched, leaving every already-committed path in place.
pub fn apply(
    trees: &mut TreePair,
    analysis: &mut dyn AnalysisPass,
    mut output: Option<&mut dyn OutputPass>,
    options: &ApplyOptions,
    progress: &mut dyn ProgressSink,
) -> anyhow::Result<ApplyStats> {
    let total = trees.len();

    for pos in 0..total {
        let dir = trees.path_at(pos).to_path_buf();

        let result = analysis.analyze(&dir, trees.input_at(pos))?;

        let projected = match &options.apply_key {
            Some(key) if result.contains_key(key) => result[key].clone(),
            _ => Value::Object(result.clone()),
        };

        let emitted = match output.as_mut() {
            Some(sink) => Some(sink.emit(&dir, &result)?),
            None => None,
        };

        // The memory-bounding path: a consumed result is immediately
        // superseded by the output pass's status value.
        let committed = match emitted {
            Some(status) if !options.persist_results => status,
            _ => projected,
        };

        match options.target {
            ApplyTarget::Input => trees.set_input_at(pos, Slot::Value(committed)),
            ApplyTarget::Output => trees.set_output_at(pos, Slot::Value(committed)),
        }

        progress.report(ProgressEvent::new(pos + 1, total));
    }

    Ok(ApplyStats {
        paths_visited: total,
    })
}

/// Deferred-output pass: feed every stored output-tree result to `output`.
///
/// Only meaningful after an `apply` that ran with `persist_results = true`;
/// otherwise the output tree holds status objects, not raw results. Slots
/// that hold no result object are skipped with a warning rather than
/// aborting the pass. Returns the number of results emitted.
pub fn for_each_output(
    trees: &TreePair,
    output: &mut dyn OutputPass,
    progress: &mut dyn ProgressSink,
) -> anyhow::Result<usize> {
    let total = trees.len();
    let mut emitted = 0;

    for pos in 0..total {
        let dir = trees.path_at(pos);
        match trees.output_at(pos).as_result() {
            Some(result) => {
                output.emit(dir, result)?;
                emitted += 1;
            }
            None => warn!(
                path = %dir.display(),
                "output slot holds no analysis result, skipping \
                 (was the pass run with persist_results = false?)"
            ),
        }
        progress.report(ProgressEvent::new(pos + 1, total));
    }

    Ok(emitted)
}

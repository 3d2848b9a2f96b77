/// dirsift Core - the generic tree-walk-and-apply engine.
///
/// This crate contains the engine only: it knows nothing about any file
/// format, report syntax, or CLI surface. A driving program supplies
/// analysis and output passes; the engine supplies traversal, the paired
/// per-directory trees, and the dispatch loop with its memory policy.
///
/// # Modules
///
/// - [`model`] - Paired insertion-ordered trees and the per-directory slot type.
/// - [`walk`] - Single-threaded recursive path collection with substring filtering.
/// - [`schedule`] - The analysis/output dispatch loop over the paired trees.
/// - [`progress`] - Per-path progress events and pluggable sinks.
/// - [`error`] - Engine error kinds.
pub mod error;
pub mod model;
pub mod progress;
pub mod schedule;
pub mod walk;

pub use error::EngineError;
pub use model::{AnalysisResult, Slot, TreePair};
pub use progress::{LogProgress, NullProgress, ProgressEvent, ProgressSink};
pub use schedule::{
    apply, for_each_output, AnalysisPass, ApplyOptions, ApplyStats, ApplyTarget, OutputPass,
};
pub use walk::{collect, Collected};

//! Error types for the dirsift engine.
//!
//! Only genuinely engine-owned failures live here. Analysis and output
//! passes fail with their own error types, carried opaquely through the
//! scheduler as `anyhow::Error` - the engine never wraps or recovers them.

use std::path::PathBuf;
use thiserror::Error;

/// Failures the engine itself can produce.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The scan root does not exist or is not a directory. The one hard
    /// failure of path collection; everything else is skipped entry by entry.
    #[error("input directory '{path}' not found or not a directory")]
    MissingInputDir { path: PathBuf },

    /// A file grouping handed to the tree builder does not share a single
    /// parent directory. Checked precondition: failing loudly here beats
    /// silently mis-keying the tree.
    #[error(
        "grouping keyed by '{expected}' contains '{file}' from a different parent directory"
    )]
    MixedParentGrouping { expected: PathBuf, file: PathBuf },
}

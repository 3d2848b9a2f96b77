/// Path collection - the recursive walk that feeds the trees.
///
/// Walks the scan root depth-first on the calling thread and groups what it
/// finds by containing directory: one grouping of immediate child
/// directories (diagnostic only) and one grouping of files per directory.
/// Paths in the groupings are relative to the scan root.
///
/// The walk applies no ordering of its own: entries arrive in whatever
/// order the underlying traversal yields them, and that raw order is what
/// every later pass iterates in, so repeated runs over an unchanged tree
/// report identically.
use crate::error::EngineError;
use crate::model::tree_pair;
use jwalk::{Parallelism, WalkDir};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything the walk discovered, grouped per directory in first-encounter
/// order.
#[derive(Debug, Default)]
pub struct Collected {
    /// For each directory that has subdirectories: the subdirectory paths.
    /// Logged for diagnostics; nothing downstream consumes these.
    pub dir_groups: Vec<Vec<PathBuf>>,
    /// For each directory that has (matching) files: the file paths in
    /// discovery order. Input to [`crate::model::TreePair::build`].
    pub file_groups: Vec<Vec<PathBuf>>,
}

/// Accumulates groupings keyed by parent directory, preserving the order in
/// which parents were first seen.
#[derive(Default)]
struct GroupAccumulator {
    order: Vec<PathBuf>,
    groups: HashMap<PathBuf, Vec<PathBuf>>,
}

impl GroupAccumulator {
    fn push(&mut self, parent: PathBuf, member: PathBuf) {
        if !self.groups.contains_key(&parent) {
            self.order.push(parent.clone());
        }
        self.groups.entry(parent).or_default().push(member);
    }

    fn into_groups(mut self) -> Vec<Vec<PathBuf>> {
        self.order
            .iter()
            .map(|key| self.groups.remove(key).unwrap_or_default())
            .collect()
    }
}

/// Walk `root` and collect per-directory groupings.
///
/// `filter`, when set and non-empty, keeps only files whose root-relative
/// path contains the substring; a directory whose files all miss the filter
/// contributes no grouping and is therefore absent from later stages.
///
/// The walk runs serial (no worker pool), skips nothing that is readable
/// (hidden files included), and does not follow symlinks. Individual
/// unreadable entries are skipped; the only hard failure is a missing or
/// non-directory root.
pub fn collect(root: &Path, filter: Option<&str>) -> Result<Collected, EngineError> {
    if !root.is_dir() {
        return Err(EngineError::MissingInputDir {
            path: root.to_path_buf(),
        });
    }
    let filter = filter.filter(|f| !f.is_empty());

    let mut dirs = GroupAccumulator::default();
    let mut files = GroupAccumulator::default();

    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(Parallelism::Serial);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                // Typically access-denied on a subdirectory. Skip it; the
                // rest of the walk is unaffected.
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        if path == root {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let rel = rel.to_path_buf();
        let parent = tree_pair::parent_key(&rel);

        if entry.file_type().is_dir() {
            debug!(dir = %rel.display(), "appending directory to search space");
            dirs.push(parent, rel);
        } else {
            if let Some(needle) = filter {
                if !rel.to_string_lossy().contains(needle) {
                    continue;
                }
            }
            debug!(file = %rel.display(), "appending file to search space");
            files.push(parent, rel);
        }
    }

    Ok(Collected {
        dir_groups: dirs.into_groups(),
        file_groups: files.into_groups(),
    })
}

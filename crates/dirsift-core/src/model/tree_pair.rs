/// Paired insertion-ordered maps mirroring the scanned directory hierarchy.
///
/// Both trees live in one structure: a flat `Vec` of keys in first-discovery
/// order, a `HashMap` from key to position, and two parallel slot vectors.
/// Sharing the key storage makes the central invariant - identical key sets
/// on both sides - structural rather than something to re-check per pass.
use crate::error::EngineError;
use crate::model::Slot;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The input and output trees, keyed by root-relative directory path.
#[derive(Debug, Default)]
pub struct TreePair {
    /// Directory keys in first-discovery order. Iteration order for every
    /// scheduler pass.
    paths: Vec<PathBuf>,
    /// Key → position in the parallel vectors.
    index: HashMap<PathBuf, usize>,
    /// Input-side slots: file groups, later rewritten by filtering passes.
    input: Vec<Slot>,
    /// Output-side slots: `Empty` until a pass commits a value.
    output: Vec<Slot>,
    /// Groupings consumed by [`TreePair::build`], overwrites included.
    groups_processed: usize,
}

/// Directory key for a root-relative file path: its parent, with the scan
/// root itself spelled `.` so root-level files still get a non-empty key.
pub(crate) fn parent_key(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl TreePair {
    /// Build both trees from per-directory file groupings.
    ///
    /// Each grouping is keyed by the parent directory of its first file; all
    /// files in a grouping must share that parent. That precondition is
    /// checked here and violations fail with
    /// [`EngineError::MixedParentGrouping`] rather than mis-keying the tree.
    ///
    /// Empty groupings are skipped. If two groupings resolve to the same
    /// key the later one wins - documented behaviour, surfaced with a
    /// warning so a surprising collision is at least visible in the log.
    pub fn build(groups: Vec<Vec<PathBuf>>) -> Result<TreePair, EngineError> {
        let mut pair = TreePair::default();

        for group in groups {
            let Some(first) = group.first() else {
                continue;
            };
            let key = parent_key(first);
            for file in &group {
                if parent_key(file) != key {
                    return Err(EngineError::MixedParentGrouping {
                        expected: key,
                        file: file.clone(),
                    });
                }
            }

            pair.groups_processed += 1;
            match pair.index.get(&key) {
                Some(&pos) => {
                    warn!(
                        key = %key.display(),
                        "duplicate grouping for directory, keeping the later one"
                    );
                    pair.input[pos] = Slot::Files(group);
                    pair.output[pos] = Slot::Empty;
                }
                None => {
                    pair.index.insert(key.clone(), pair.paths.len());
                    pair.paths.push(key);
                    pair.input.push(Slot::Files(group));
                    pair.output.push(Slot::Empty);
                }
            }
        }

        Ok(pair)
    }

    /// Number of directory keys (identical for both trees).
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when no grouping survived collection.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// How many groupings [`TreePair::build`] consumed, overwrites included.
    pub fn groups_processed(&self) -> usize {
        self.groups_processed
    }

    /// Keys in first-discovery order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Key at a given iteration position.
    pub fn path_at(&self, pos: usize) -> &Path {
        &self.paths[pos]
    }

    /// Input slot at a given iteration position.
    pub fn input_at(&self, pos: usize) -> &Slot {
        &self.input[pos]
    }

    /// Output slot at a given iteration position.
    pub fn output_at(&self, pos: usize) -> &Slot {
        &self.output[pos]
    }

    /// Replace the input slot at a position. The slot is swapped whole.
    pub fn set_input_at(&mut self, pos: usize, slot: Slot) {
        self.input[pos] = slot;
    }

    /// Replace the output slot at a position. The slot is swapped whole.
    pub fn set_output_at(&mut self, pos: usize, slot: Slot) {
        self.output[pos] = slot;
    }

    /// Input slot by key.
    pub fn input(&self, path: &Path) -> Option<&Slot> {
        self.index.get(path).map(|&pos| &self.input[pos])
    }

    /// Output slot by key.
    pub fn output(&self, path: &Path) -> Option<&Slot> {
        self.index.get(path).map(|&pos| &self.output[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn build_keys_by_parent_and_mirrors_key_sets() {
        let pair = TreePair::build(vec![
            vec![p("a/f1.bin"), p("a/f2.bin")],
            vec![p("b/f3.bin")],
        ])
        .unwrap();

        assert_eq!(pair.len(), 2);
        assert_eq!(pair.groups_processed(), 2);
        let keys: Vec<_> = pair.paths().collect();
        assert_eq!(keys, vec![Path::new("a"), Path::new("b")]);

        assert_eq!(pair.input(Path::new("a")).unwrap().as_files().unwrap().len(), 2);
        assert!(pair.output(Path::new("a")).unwrap().is_empty());
        assert!(pair.output(Path::new("b")).unwrap().is_empty());
    }

    #[test]
    fn root_level_files_key_as_dot() {
        let pair = TreePair::build(vec![vec![p("top.bin")]]).unwrap();
        assert_eq!(pair.paths().next().unwrap(), Path::new("."));
    }

    #[test]
    fn empty_groupings_are_skipped() {
        let pair = TreePair::build(vec![vec![], vec![p("a/f.bin")], vec![]]).unwrap();
        assert_eq!(pair.len(), 1);
        assert_eq!(pair.groups_processed(), 1);
    }

    /// Duplicate keys are documented last-write-wins: the later grouping
    /// replaces the earlier input entry and resets the paired output slot.
    #[test]
    fn duplicate_key_keeps_later_grouping() {
        let pair = TreePair::build(vec![
            vec![p("a/f1.bin")],
            vec![p("a/f2.bin"), p("a/f3.bin")],
        ])
        .unwrap();

        assert_eq!(pair.len(), 1);
        assert_eq!(pair.groups_processed(), 2);
        let files = pair.input(Path::new("a")).unwrap().as_files().unwrap();
        assert_eq!(files, &[p("a/f2.bin"), p("a/f3.bin")]);
    }

    #[test]
    fn mixed_parent_grouping_is_rejected() {
        let err = TreePair::build(vec![vec![p("a/f1.bin"), p("b/f2.bin")]]).unwrap_err();
        assert!(matches!(err, EngineError::MixedParentGrouping { .. }));
    }

    #[test]
    fn build_of_nothing_is_empty() {
        let pair = TreePair::build(vec![]).unwrap();
        assert!(pair.is_empty());
        assert_eq!(pair.len(), 0);
    }
}

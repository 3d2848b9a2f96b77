/// The value stored at one directory key in either tree.
///
/// Slots start as `Files` (input side) or `Empty` (output side) and are
/// replaced whole by scheduler passes - never mutated in place, so a pass
/// aborting mid-iteration can never leave a half-written entry.
use serde_json::Value;
use std::path::PathBuf;

/// An analysis pass's return value: an opaque mapping of named fields.
///
/// The engine reads nothing out of it except an optional single-field
/// projection; everything else is between the analysis and output passes.
pub type AnalysisResult = serde_json::Map<String, Value>;

/// Tagged per-directory value.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Output-side placeholder, present from tree construction until the
    /// first pass that targets the output tree commits over it.
    Empty,

    /// The ordered file list collected for this directory, in walk
    /// discovery order. Paths are relative to the scan root.
    Files(Vec<PathBuf>),

    /// Whatever a pass committed: a projected field, a full result object,
    /// or an output pass's status object.
    Value(Value),
}

impl Slot {
    /// `true` only for the untouched output placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// The file list, if this slot still holds one.
    pub fn as_files(&self) -> Option<&[PathBuf]> {
        match self {
            Slot::Files(files) => Some(files),
            _ => None,
        }
    }

    /// The committed JSON value, if any pass has written one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The committed value as a result object, if it is one.
    pub fn as_result(&self) -> Option<&AnalysisResult> {
        match self {
            Slot::Value(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

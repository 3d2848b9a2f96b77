/// Data model for the paired per-directory trees.
///
/// Re-exports the slot value type and the paired input/output tree structure.
pub mod slot;
pub mod tree_pair;

pub use slot::{AnalysisResult, Slot};
pub use tree_pair::TreePair;

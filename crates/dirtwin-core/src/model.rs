use ahash::AHashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable snapshot of one directory, taken during indexing.
///
/// `level_names` always has exactly `max_depth` entries: slot 0 holds the
/// names of the direct children, slot N the names found exactly N+1 hops
/// below, deduplicated across all branches. A level nothing reaches (e.g.
/// below a leaf) is an empty set, not a missing one.
#[derive(Debug)]
pub struct FolderSnapshot {
    /// Canonical absolute path; unique key across all scanned roots.
    pub path: PathBuf,
    /// Recursive size in bytes, not bounded by `max_depth`.
    pub total_size: u64,
    /// Number of direct children (files and subdirectories).
    pub entry_count: usize,
    pub level_names: Vec<AHashSet<String>>,
}

/// One scored unordered pair of snapshots. `folder_a` always sorts before
/// `folder_b` by path, so a pair can only ever appear once.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Structural similarity in [0, 1].
    pub similarity: f64,
    /// `folder_a.total_size + folder_b.total_size`; used for sorting and
    /// reporting, never for scoring.
    pub combined_size: u64,
    pub folder_a: Arc<FolderSnapshot>,
    pub folder_b: Arc<FolderSnapshot>,
}

/// A subtree that was skipped during indexing, and why.
#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

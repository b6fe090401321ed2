use crate::config::ScanSettings;
use crate::model::FolderSnapshot;
use std::sync::Arc;

/// Size/entry-count predicate applied before pairing. A folder rejected
/// here never enters any comparison, which is what keeps the quadratic
/// phase affordable.
pub fn passes(snapshot: &FolderSnapshot, settings: &ScanSettings) -> bool {
    if let Some(min) = settings.min_size {
        if snapshot.total_size < min {
            return false;
        }
    }
    if let Some(max) = settings.max_size {
        if snapshot.total_size > max {
            return false;
        }
    }
    snapshot.entry_count >= settings.min_files
}

pub fn apply(
    snapshots: Vec<Arc<FolderSnapshot>>,
    settings: &ScanSettings,
) -> Vec<Arc<FolderSnapshot>> {
    snapshots
        .into_iter()
        .filter(|s| passes(s, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use std::path::PathBuf;

    fn snap(size: u64, entries: usize) -> FolderSnapshot {
        FolderSnapshot {
            path: PathBuf::from("/t"),
            total_size: size,
            entry_count: entries,
            level_names: vec![AHashSet::new()],
        }
    }

    #[test]
    fn test_size_window_is_inclusive() {
        let settings = ScanSettings {
            min_size: Some(100),
            max_size: Some(200),
            min_files: 0,
            ..Default::default()
        };
        assert!(passes(&snap(100, 1), &settings));
        assert!(passes(&snap(200, 1), &settings));
        assert!(!passes(&snap(99, 1), &settings));
        assert!(!passes(&snap(201, 1), &settings));
    }

    #[test]
    fn test_unbounded_by_default() {
        let settings = ScanSettings {
            min_files: 0,
            ..Default::default()
        };
        assert!(passes(&snap(0, 0), &settings));
        assert!(passes(&snap(u64::MAX, 0), &settings));
    }

    #[test]
    fn test_min_files_excludes_sparse_folders() {
        let settings = ScanSettings {
            min_files: 3,
            ..Default::default()
        };
        assert!(!passes(&snap(1024, 2), &settings));
        assert!(passes(&snap(1024, 3), &settings));
    }
}

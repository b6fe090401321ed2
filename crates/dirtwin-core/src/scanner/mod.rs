mod snapshot;

use crate::error::Error;
use crate::model::{FolderSnapshot, ScanWarning};
use crate::progress::ProgressReporter;
use dashmap::DashMap;
use glob::Pattern;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::error;

/// Everything the indexer learned about the scanned roots: one snapshot per
/// directory found strictly below a root, path-sorted, plus the subtrees
/// that had to be skipped.
pub struct IndexOutcome {
    pub snapshots: Vec<Arc<FolderSnapshot>>,
    pub warnings: Vec<ScanWarning>,
}

/// Index every directory below the given roots.
///
/// Candidate directories are enumerated sequentially (symlinks never
/// followed), then snapshotted in parallel: name capture down to
/// `max_depth` levels, recursive size without a depth bound. Snapshots land
/// in a map keyed by canonical path, so a directory reachable from two
/// roots is indexed once.
pub fn index_roots(
    root_paths: &[String],
    ignore_globs: &[String],
    max_depth: usize,
    reporter: &dyn ProgressReporter,
) -> Result<IndexOutcome, Error> {
    let ignore_patterns = compile_patterns(ignore_globs);

    reporter.on_index_start();

    let mut candidates: Vec<PathBuf> = Vec::new();
    let mut warnings: Vec<ScanWarning> = Vec::new();

    for root in root_paths {
        let root_path = Path::new(root);
        if !root_path.is_dir() {
            warnings.push(ScanWarning {
                path: root_path.to_path_buf(),
                reason: "root is not a readable directory".into(),
            });
            continue;
        }
        collect_dirs(root_path, &ignore_patterns, &mut candidates, &mut warnings);
    }

    let map: DashMap<PathBuf, Arc<FolderSnapshot>> = DashMap::new();
    let indexed = AtomicUsize::new(0);

    let snapshot_warnings: Vec<Vec<ScanWarning>> = candidates
        .par_iter()
        .map(|dir| {
            let (snapshot, warns) =
                snapshot::snapshot_folder(dir, max_depth, &ignore_patterns);
            if let Some(snapshot) = snapshot {
                let count = indexed.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.on_index_progress(count, &snapshot.path.to_string_lossy());
                // Keyed by canonical path: overlapping roots or symlink
                // aliases collapse onto a single snapshot.
                map.insert(snapshot.path.clone(), Arc::new(snapshot));
            }
            warns
        })
        .collect();

    warnings.extend(snapshot_warnings.into_iter().flatten());

    let mut snapshots: Vec<Arc<FolderSnapshot>> =
        map.into_iter().map(|(_, snapshot)| snapshot).collect();
    snapshots.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(IndexOutcome {
        snapshots,
        warnings,
    })
}

fn compile_patterns(ignore_globs: &[String]) -> Vec<Pattern> {
    ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

/// Depth-first enumeration of every directory strictly below `dir`.
/// Unreadable entries become warnings; directory symlinks are recorded
/// neither here nor descended into.
fn collect_dirs(
    dir: &Path,
    ignore_patterns: &[Pattern],
    out: &mut Vec<PathBuf>,
    warnings: &mut Vec<ScanWarning>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warnings.push(ScanWarning {
                path: dir.to_path_buf(),
                reason: format!("unreadable directory: {}", err),
            });
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warnings.push(ScanWarning {
                    path: dir.to_path_buf(),
                    reason: format!("unreadable entry: {}", err),
                });
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                warnings.push(ScanWarning {
                    path: entry.path(),
                    reason: format!("unreadable file type: {}", err),
                });
                continue;
            }
        };

        // DirEntry::file_type does not follow symlinks, so a symlinked
        // directory reports as a symlink and is skipped here.
        if !file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        if ignore_patterns.iter().any(|p| p.matches_path(&path)) {
            continue;
        }

        out.push(path.clone());
        collect_dirs(&path, ignore_patterns, out, warnings);
    }
}

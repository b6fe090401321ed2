use crate::model::{FolderSnapshot, ScanWarning};
use ahash::AHashSet;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// Build the snapshot for a single directory: child names per level down to
/// `max_depth`, recursive byte size with no depth bound, direct entry count.
///
/// Returns `None` (with a warning) when the directory itself cannot be
/// resolved; partial failures deeper in the subtree only skip the offending
/// branch.
pub(super) fn snapshot_folder(
    dir: &Path,
    max_depth: usize,
    ignore_patterns: &[Pattern],
) -> (Option<FolderSnapshot>, Vec<ScanWarning>) {
    let mut warnings = Vec::new();

    let path = match fs::canonicalize(dir) {
        Ok(p) => p,
        Err(err) => {
            warnings.push(ScanWarning {
                path: dir.to_path_buf(),
                reason: format!("cannot resolve path: {}", err),
            });
            return (None, warnings);
        }
    };

    let mut level_names: Vec<AHashSet<String>> = vec![AHashSet::new(); max_depth];
    let mut ancestors: Vec<PathBuf> = Vec::new();
    let mut entry_count = 0usize;

    let total_size = collect_level(
        &path,
        0,
        max_depth,
        ignore_patterns,
        &mut level_names,
        &mut ancestors,
        &mut entry_count,
        &mut warnings,
    );

    (
        Some(FolderSnapshot {
            path,
            total_size,
            entry_count,
            level_names,
        }),
        warnings,
    )
}

/// Recursive worker. Name capture stops once `depth` reaches `max_depth`;
/// size accumulation keeps going all the way down. The `ancestors` stack of
/// resolved paths guarantees termination even if something (bind mounts,
/// exotic filesystems) routes the walk back into itself.
#[allow(clippy::too_many_arguments)]
fn collect_level(
    dir: &Path,
    depth: usize,
    max_depth: usize,
    ignore_patterns: &[Pattern],
    level_names: &mut [AHashSet<String>],
    ancestors: &mut Vec<PathBuf>,
    entry_count: &mut usize,
    warnings: &mut Vec<ScanWarning>,
) -> u64 {
    let real = match fs::canonicalize(dir) {
        Ok(p) => p,
        Err(err) => {
            warnings.push(ScanWarning {
                path: dir.to_path_buf(),
                reason: format!("cannot resolve path: {}", err),
            });
            return 0;
        }
    };

    if ancestors.contains(&real) {
        warnings.push(ScanWarning {
            path: dir.to_path_buf(),
            reason: "cycle back to an ancestor, skipped".into(),
        });
        return 0;
    }
    ancestors.push(real);

    let mut size = 0u64;

    match fs::read_dir(dir) {
        Err(err) => {
            warnings.push(ScanWarning {
                path: dir.to_path_buf(),
                reason: format!("unreadable directory: {}", err),
            });
        }
        Ok(entries) => {
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

                let path = entry.path();
                if ignore_patterns.iter().any(|p| p.matches_path(&path)) {
                    continue;
                }

                if depth < max_depth {
                    level_names[depth].insert(entry.file_name().to_string_lossy().into_owned());
                }
                if depth == 0 {
                    *entry_count += 1;
                }

                let file_type = match entry.file_type() {
                    Ok(t) => t,
                    Err(err) => {
                        warnings.push(ScanWarning {
                            path,
                            reason: format!("unreadable file type: {}", err),
                        });
                        continue;
                    }
                };

                if file_type.is_symlink() {
                    // The name counts at this level, but symlinks are never
                    // followed: no size, no descent.
                    continue;
                }

                if file_type.is_dir() {
                    size += collect_level(
                        &path,
                        depth + 1,
                        max_depth,
                        ignore_patterns,
                        level_names,
                        ancestors,
                        entry_count,
                        warnings,
                    );
                } else {
                    match entry.metadata() {
                        Ok(metadata) => size += metadata.len(),
                        Err(err) => warnings.push(ScanWarning {
                            path,
                            reason: format!("unreadable metadata: {}", err),
                        }),
                    }
                }
            }
        }
    }

    ancestors.pop();
    size
}

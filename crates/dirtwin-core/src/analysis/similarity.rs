use crate::config::ScanSettings;
use crate::model::{ComparisonResult, FolderSnapshot};
use crate::progress::ProgressReporter;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// Structural similarity of two snapshots, in [0, 1].
///
/// Per level: Jaccard index of the two name sets. Levels where both sides
/// are empty carry no signal and are left out of the average; if every
/// level is like that (two entirely empty folders) the pair is a trivial
/// duplicate and scores 1.0. A level where exactly one side is empty
/// scores 0.0 through the ordinary formula.
pub fn structural_similarity(a: &FolderSnapshot, b: &FolderSnapshot) -> f64 {
    let mut sum = 0.0;
    let mut counted = 0usize;

    for (names_a, names_b) in a.level_names.iter().zip(b.level_names.iter()) {
        if names_a.is_empty() && names_b.is_empty() {
            continue;
        }
        let intersection = names_a.intersection(names_b).count();
        let union = names_a.len() + names_b.len() - intersection;
        sum += intersection as f64 / union as f64;
        counted += 1;
    }

    if counted == 0 {
        1.0
    } else {
        sum / counted as f64
    }
}

/// Score every unordered pair of the path-sorted survivor list and keep
/// the ones at or above the similarity threshold.
///
/// Pairing over `i < j` gives each pair exactly once, already in canonical
/// (path) order, and never pairs a folder with itself. Rows are scored in
/// parallel; rayon's ordered collect keeps the output deterministic.
pub fn compare_all(
    folders: &[Arc<FolderSnapshot>],
    settings: &ScanSettings,
    reporter: &dyn ProgressReporter,
) -> Vec<ComparisonResult> {
    let n = folders.len();
    let total_pairs = n.saturating_sub(1) * n / 2;
    info!("{} folder pairs to compare", total_pairs);
    reporter.on_compare_start(total_pairs);

    let pairs_done = AtomicUsize::new(0);

    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let row: Vec<ComparisonResult> = ((i + 1)..n)
                .filter_map(|j| {
                    let similarity = structural_similarity(&folders[i], &folders[j]);
                    if similarity * 100.0 < settings.min_similarity {
                        return None;
                    }
                    Some(ComparisonResult {
                        similarity,
                        combined_size: folders[i].total_size + folders[j].total_size,
                        folder_a: Arc::clone(&folders[i]),
                        folder_b: Arc::clone(&folders[j]),
                    })
                })
                .collect();
            let done = pairs_done.fetch_add(n - i - 1, Ordering::Relaxed) + (n - i - 1);
            reporter.on_compare_progress(done, total_pairs);
            row
        })
        .collect()
}

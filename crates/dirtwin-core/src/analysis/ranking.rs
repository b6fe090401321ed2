use crate::config::SortKey;
use crate::model::ComparisonResult;
use std::cmp::Ordering;

/// Order the result list by the requested key. Ties always fall back to
/// canonical pair order (folder_a path, then folder_b path), so repeated
/// runs over an unchanged tree produce byte-identical output.
pub fn rank(results: &mut [ComparisonResult], key: SortKey) {
    match key {
        SortKey::Similarity => results.sort_by(|x, y| {
            y.similarity
                .total_cmp(&x.similarity)
                .then_with(|| canonical_cmp(x, y))
        }),
        SortKey::Size => results.sort_by(|x, y| {
            y.combined_size
                .cmp(&x.combined_size)
                .then_with(|| canonical_cmp(x, y))
        }),
        SortKey::Name => results.sort_by(canonical_cmp),
    }
}

fn canonical_cmp(x: &ComparisonResult, y: &ComparisonResult) -> Ordering {
    x.folder_a
        .path
        .cmp(&y.folder_a.path)
        .then_with(|| x.folder_b.path.cmp(&y.folder_b.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FolderSnapshot;
    use ahash::AHashSet;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn result(a: &str, b: &str, similarity: f64, combined_size: u64) -> ComparisonResult {
        let snap = |path: &str| {
            Arc::new(FolderSnapshot {
                path: PathBuf::from(path),
                total_size: 0,
                entry_count: 0,
                level_names: vec![AHashSet::new()],
            })
        };
        ComparisonResult {
            similarity,
            combined_size,
            folder_a: snap(a),
            folder_b: snap(b),
        }
    }

    #[test]
    fn test_rank_by_similarity_descending() {
        let mut results = vec![
            result("/a", "/b", 0.5, 10),
            result("/c", "/d", 0.9, 5),
            result("/e", "/f", 0.7, 20),
        ];
        rank(&mut results, SortKey::Similarity);
        let scores: Vec<f64> = results.iter().map(|r| r.similarity).collect();
        assert_eq!(scores, vec![0.9, 0.7, 0.5]);
    }

    #[test]
    fn test_rank_by_size_descending() {
        let mut results = vec![
            result("/a", "/b", 0.5, 10),
            result("/c", "/d", 0.9, 5),
            result("/e", "/f", 0.7, 20),
        ];
        rank(&mut results, SortKey::Size);
        let sizes: Vec<u64> = results.iter().map(|r| r.combined_size).collect();
        assert_eq!(sizes, vec![20, 10, 5]);
    }

    #[test]
    fn test_rank_by_name_ascending() {
        let mut results = vec![
            result("/z", "/z2", 0.9, 1),
            result("/a", "/b", 0.1, 1),
            result("/a", "/a2", 0.5, 1),
        ];
        rank(&mut results, SortKey::Name);
        let firsts: Vec<String> = results
            .iter()
            .map(|r| r.folder_a.path.display().to_string())
            .collect();
        assert_eq!(firsts, vec!["/a", "/a", "/z"]);
        // Tie on folder_a broken by folder_b.
        assert_eq!(results[0].folder_b.path, PathBuf::from("/a2"));
    }

    #[test]
    fn test_equal_keys_fall_back_to_canonical_order() {
        let mut results = vec![
            result("/b", "/c", 0.5, 10),
            result("/a", "/d", 0.5, 10),
        ];
        rank(&mut results, SortKey::Similarity);
        assert_eq!(results[0].folder_a.path, PathBuf::from("/a"));
        assert_eq!(results[1].folder_a.path, PathBuf::from("/b"));
    }
}

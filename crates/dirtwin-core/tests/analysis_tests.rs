use ahash::AHashSet;
use dirtwin_core::analysis::{ranking, similarity};
use dirtwin_core::config::{ScanSettings, SortKey};
use dirtwin_core::model::FolderSnapshot;
use dirtwin_core::SilentReporter;
use std::path::PathBuf;
use std::sync::Arc;

fn names(values: &[&str]) -> AHashSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn make_snapshot(path: &str, levels: &[&[&str]]) -> Arc<FolderSnapshot> {
    let level_names: Vec<AHashSet<String>> = levels.iter().map(|l| names(l)).collect();
    Arc::new(FolderSnapshot {
        path: PathBuf::from(path),
        total_size: 0,
        entry_count: level_names.first().map(|l| l.len()).unwrap_or(0),
        level_names,
    })
}

fn settings(min_similarity: f64) -> ScanSettings {
    ScanSettings {
        min_similarity,
        min_files: 0,
        ..Default::default()
    }
}

#[test]
fn test_similarity_is_symmetric() {
    let a = make_snapshot("/a", &[&["x", "y", "z"], &["p"]]);
    let b = make_snapshot("/b", &[&["x", "w"], &["p", "q"]]);
    assert_eq!(
        similarity::structural_similarity(&a, &b),
        similarity::structural_similarity(&b, &a),
    );
}

#[test]
fn test_identical_snapshots_score_exactly_one() {
    let a = make_snapshot("/a", &[&["x", "y"], &["deep1", "deep2"]]);
    let b = make_snapshot("/b", &[&["x", "y"], &["deep1", "deep2"]]);
    assert_eq!(similarity::structural_similarity(&a, &b), 1.0);
}

#[test]
fn test_disjoint_snapshots_score_exactly_zero() {
    let a = make_snapshot("/a", &[&["x", "y"], &["p"]]);
    let b = make_snapshot("/b", &[&["m", "n"], &["q"]]);
    assert_eq!(similarity::structural_similarity(&a, &b), 0.0);
}

#[test]
fn test_disjoint_pair_excluded_by_any_positive_threshold() {
    let folders = vec![
        make_snapshot("/a", &[&["x"]]),
        make_snapshot("/b", &[&["y"]]),
    ];
    let results = similarity::compare_all(&folders, &settings(1.0), &SilentReporter);
    assert!(results.is_empty());
}

#[test]
fn test_half_overlap_sits_on_the_fifty_percent_boundary() {
    // {x,y,z} vs {x,y,w}: Jaccard 2/4 = 0.5
    let folders = vec![
        make_snapshot("/a", &[&["x", "y", "z"]]),
        make_snapshot("/b", &[&["x", "y", "w"]]),
    ];

    let kept = similarity::compare_all(&folders, &settings(50.0), &SilentReporter);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].similarity, 0.5);

    let dropped = similarity::compare_all(&folders, &settings(60.0), &SilentReporter);
    assert!(dropped.is_empty());
}

#[test]
fn test_no_self_pairs_and_each_pair_once() {
    let folders = vec![
        make_snapshot("/a", &[&["x"]]),
        make_snapshot("/b", &[&["x"]]),
        make_snapshot("/c", &[&["x"]]),
        make_snapshot("/d", &[&["x"]]),
    ];
    let results = similarity::compare_all(&folders, &settings(0.0), &SilentReporter);

    // 4 choose 2
    assert_eq!(results.len(), 6);
    let mut seen = std::collections::HashSet::new();
    for result in &results {
        assert_ne!(result.folder_a.path, result.folder_b.path, "self-pair emitted");
        assert!(
            result.folder_a.path < result.folder_b.path,
            "pair not in canonical order"
        );
        assert!(
            seen.insert((result.folder_a.path.clone(), result.folder_b.path.clone())),
            "duplicate pair emitted"
        );
    }
}

#[test]
fn test_scores_stay_in_unit_interval() {
    let snapshots = vec![
        make_snapshot("/a", &[&["x", "y", "z"], &[], &["q"]]),
        make_snapshot("/b", &[&["x"], &["m", "n"], &[]]),
        make_snapshot("/c", &[&[], &[], &[]]),
    ];
    for x in &snapshots {
        for y in &snapshots {
            let score = similarity::structural_similarity(x, y);
            assert!(
                (0.0..=1.0).contains(&score),
                "similarity({}, {}) = {} out of range",
                x.path.display(),
                y.path.display(),
                score
            );
        }
    }
}

#[test]
fn test_both_empty_snapshots_are_a_degenerate_duplicate() {
    let a = make_snapshot("/a", &[&[]]);
    let b = make_snapshot("/b", &[&[]]);
    assert_eq!(similarity::structural_similarity(&a, &b), 1.0);

    let results =
        similarity::compare_all(&[a, b], &settings(50.0), &SilentReporter);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].similarity, 1.0);
}

#[test]
fn test_ranking_is_deterministic_across_runs() {
    let folders = vec![
        make_snapshot("/a", &[&["x", "y"]]),
        make_snapshot("/b", &[&["x", "y"]]),
        make_snapshot("/c", &[&["x", "y"]]),
        make_snapshot("/d", &[&["x", "z"]]),
    ];

    let run = || {
        let mut results = similarity::compare_all(&folders, &settings(0.0), &SilentReporter);
        ranking::rank(&mut results, SortKey::Similarity);
        results
            .iter()
            .map(|r| {
                (
                    r.folder_a.path.clone(),
                    r.folder_b.path.clone(),
                    r.similarity.to_bits(),
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_ranking_ties_fall_back_to_canonical_pair_order() {
    let folders = vec![
        make_snapshot("/a", &[&["x"]]),
        make_snapshot("/b", &[&["x"]]),
        make_snapshot("/c", &[&["x"]]),
    ];
    // All three pairs score 1.0; order must be (a,b), (a,c), (b,c).
    let mut results = similarity::compare_all(&folders, &settings(0.0), &SilentReporter);
    ranking::rank(&mut results, SortKey::Similarity);

    let order: Vec<(String, String)> = results
        .iter()
        .map(|r| {
            (
                r.folder_a.path.display().to_string(),
                r.folder_b.path.display().to_string(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("/a".to_string(), "/b".to_string()),
            ("/a".to_string(), "/c".to_string()),
            ("/b".to_string(), "/c".to_string()),
        ]
    );
}

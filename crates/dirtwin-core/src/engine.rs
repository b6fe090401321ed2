use crate::analysis::{filter, ranking, similarity};
use crate::config::{self, ScanSettings};
use crate::error::Error;
use crate::model::{ComparisonResult, ScanWarning};
use crate::progress::ProgressReporter;
use crate::scanner;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct ScanEngine {
    root_paths: Vec<String>,
    ignore_patterns: Vec<String>,
    settings: ScanSettings,
}

/// Output of one pipeline run, ranked and ready for rendering or review.
#[derive(Debug)]
pub struct ScanOutcome {
    pub results: Vec<ComparisonResult>,
    /// Directories indexed below all roots, before filtering.
    pub dirs_indexed: usize,
    /// Directories that survived the filter and entered pairing.
    pub dirs_compared: usize,
    pub warnings: Vec<ScanWarning>,
    pub index_duration: Duration,
    pub compare_duration: Duration,
}

impl ScanEngine {
    pub fn new(
        root_paths: Vec<String>,
        ignore_patterns: Vec<String>,
        settings: ScanSettings,
    ) -> Self {
        Self {
            root_paths,
            ignore_patterns,
            settings,
        }
    }

    /// Run the full similar-folder pipeline:
    /// 1. Index every directory below the roots (names per level + sizes)
    /// 2. Filter by size window and entry count
    /// 3. Score all surviving pairs by per-level name overlap
    /// 4. Rank by the configured sort key
    ///
    /// Settings are validated up front; nothing is traversed on a bad
    /// configuration.
    pub fn scan(&self, reporter: &dyn ProgressReporter) -> Result<ScanOutcome, Error> {
        self.settings.validate()?;
        if self.root_paths.is_empty() {
            return Err(Error::Settings("no root paths to scan".into()));
        }

        let non_overlapping = config::non_overlapping_directories(self.root_paths.clone());
        info!("Processing directories: {:?}", non_overlapping);

        // Phase 1: Index
        info!("Indexing folders...");
        let index_start = Instant::now();
        let index = scanner::index_roots(
            &non_overlapping,
            &self.ignore_patterns,
            self.settings.max_depth,
            reporter,
        )?;
        let index_duration = index_start.elapsed();
        let dirs_indexed = index.snapshots.len();
        reporter.on_index_complete(dirs_indexed, index_duration.as_secs_f64());
        debug!(
            "Index completed in {:.2}s: {} folders, {} skipped subtrees",
            index_duration.as_secs_f64(),
            dirs_indexed,
            index.warnings.len(),
        );
        if !index.warnings.is_empty() {
            warn!("{} paths skipped during indexing", index.warnings.len());
            for warning in &index.warnings {
                debug!("skipped {}: {}", warning.path.display(), warning.reason);
            }
        }

        // Phase 2: Filter
        let survivors = filter::apply(index.snapshots, &self.settings);
        let dirs_compared = survivors.len();
        debug!(
            "Filter kept {} of {} folders",
            dirs_compared, dirs_indexed,
        );

        // Phase 3: Compare
        info!("Comparing folder structures...");
        let compare_start = Instant::now();
        let mut results = similarity::compare_all(&survivors, &self.settings, reporter);
        let compare_duration = compare_start.elapsed();
        reporter.on_compare_complete(results.len(), compare_duration.as_secs_f64());
        debug!(
            "Compare completed in {:.2}s: {} pairs at or above {:.1}%",
            compare_duration.as_secs_f64(),
            results.len(),
            self.settings.min_similarity,
        );

        // Phase 4: Rank
        ranking::rank(&mut results, self.settings.sort_key);

        Ok(ScanOutcome {
            results,
            dirs_indexed,
            dirs_compared,
            warnings: index.warnings,
            index_duration,
            compare_duration,
        })
    }
}

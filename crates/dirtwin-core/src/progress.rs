/// Trait for reporting pipeline progress.
///
/// The CLI implements this with indicatif bars; tests and library callers
/// can stay silent. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_index_start(&self) {}
    fn on_index_progress(&self, _dirs_indexed: usize, _current_path: &str) {}
    fn on_index_complete(&self, _total_dirs: usize, _duration_secs: f64) {}
    fn on_compare_start(&self, _total_pairs: usize) {}
    fn on_compare_progress(&self, _pairs_done: usize, _total_pairs: usize) {}
    fn on_compare_complete(&self, _matches: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

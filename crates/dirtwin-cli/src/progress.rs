use dirtwin_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using indicatif.
///
/// - Index phase: spinner (directory count unknown upfront)
/// - Compare phase: progress bar (pair count known once indexing is done)
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_index_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message("Indexing folders...");
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_index_progress(&self, dirs_indexed: usize, _current_path: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("Indexing... {} folders", dirs_indexed));
        }
    }

    fn on_index_complete(&self, total_dirs: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Index complete: {} folders in {:.2}s",
            total_dirs, duration_secs
        );
    }

    fn on_compare_start(&self, total_pairs: usize) {
        let pb = ProgressBar::new(total_pairs as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Comparing [{bar:30.cyan/dim}] {pos}/{len} pairs ({eta} remaining)",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_compare_progress(&self, pairs_done: usize, _total_pairs: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(pairs_done as u64);
        }
    }

    fn on_compare_complete(&self, matches: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Compare complete: {} matching pairs in {:.2}s",
            matches, duration_secs
        );
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

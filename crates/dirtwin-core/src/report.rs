use crate::error::Error;
use crate::model::ComparisonResult;
use std::env;
use std::path::{Path, PathBuf};

/// Render a byte count as `B`/`KB`/`MB`/`GB`/`TB` with two decimals.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Similarity as a percentage with two decimals, shared by console and CSV
/// output so both render the same number.
pub fn percent(similarity: f64) -> String {
    format!("{:.2}", similarity * 100.0)
}

/// Default CSV location: one timestamped file per run in the system temp
/// directory.
pub fn default_csv_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    env::temp_dir().join(format!("folder_diffs_{}.csv", stamp))
}

/// Write the ranked results as CSV:
/// `Similarity,Total Size,Folder 1,Folder 2`.
pub fn write_csv(results: &[ComparisonResult], path: &Path) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Similarity", "Total Size", "Folder 1", "Folder 2"])?;
    for result in results {
        writer.write_record([
            percent(result.similarity),
            result.combined_size.to_string(),
            result.folder_a.path.display().to_string(),
            result.folder_b.path.display().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

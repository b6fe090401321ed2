use clap::{Args, Parser, Subcommand};
use dirtwin_core::SortKey;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dirtwin")]
#[command(about = "Find folders with near-duplicate structure", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan paths and report similar folder pairs
    Scan(ScanArgs),
    /// Scan, then step through the ranked pairs interactively
    Review(ScanArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root paths to scan (default: root_paths from Config.toml)
    pub paths: Vec<String>,

    /// Minimum folder size, e.g. 1KB
    #[arg(long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Maximum folder size, e.g. 10MB
    #[arg(long, value_name = "SIZE")]
    pub max_size: Option<String>,

    /// Minimum number of files/folders directly inside a folder
    #[arg(short = 'f', long, default_value_t = 1)]
    pub min_files: usize,

    /// Minimum similarity percentage (0-100)
    #[arg(short = 's', long, default_value_t = 50.0)]
    pub min_similarity: f64,

    /// How many directory levels to compare
    #[arg(short = 'd', long, default_value_t = 3)]
    pub max_depth: usize,

    /// Sort results by similarity, size or name
    #[arg(long, default_value = "similarity")]
    pub sort: SortKey,

    /// Write results to this CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print results to the console even when there are many
    #[arg(short, long)]
    pub print: bool,

    /// Decision journal path (review mode only)
    #[arg(long, value_name = "FILE")]
    pub journal: Option<PathBuf>,
}

/// Convert a size argument with an optional B/KB/MB/GB suffix (powers of
/// 1024, fractions allowed) to bytes. Bare numbers are bytes.
pub fn parse_size(input: &str) -> Result<u64, String> {
    let upper = input.trim().to_uppercase();
    let (number, multiplier) = if let Some(stripped) = upper.strip_suffix("KB") {
        (stripped, 1024.0)
    } else if let Some(stripped) = upper.strip_suffix("MB") {
        (stripped, 1024.0 * 1024.0)
    } else if let Some(stripped) = upper.strip_suffix("GB") {
        (stripped, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(stripped) = upper.strip_suffix('B') {
        (stripped, 1.0)
    } else {
        (upper.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid size '{}'", input))?;
    if value < 0.0 {
        return Err(format!("size cannot be negative: '{}'", input));
    }
    Ok((value * multiplier) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("512B").unwrap(), 512);
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("10mb").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size("2GB").unwrap(), 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_fractional() {
        assert_eq!(parse_size("1.5KB").unwrap(), 1536);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("lots").is_err());
        assert!(parse_size("-1KB").is_err());
        assert!(parse_size("").is_err());
    }
}

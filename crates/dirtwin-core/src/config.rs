use crate::error::Error;
use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub root_paths: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Sort order for the ranked result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Similarity,
    Size,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "similarity" => Ok(SortKey::Similarity),
            "size" => Ok(SortKey::Size),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "unknown sort key '{}' (expected similarity, size or name)",
                other
            )),
        }
    }
}

/// Tunable parameters for one pipeline run. Validated before any traversal
/// starts; a bad combination fails the whole run rather than producing a
/// partial one.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Number of directory levels captured for name comparison (>= 1).
    pub max_depth: usize,
    /// Inclusive recursive-size window, in bytes. `None` is unbounded.
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    /// Minimum number of direct entries for a folder to be compared.
    pub min_files: usize,
    /// Minimum similarity percentage (0-100) for a pair to be reported.
    pub min_similarity: f64,
    pub sort_key: SortKey,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_size: None,
            max_size: None,
            min_files: 1,
            min_similarity: 50.0,
            sort_key: SortKey::Similarity,
        }
    }
}

impl ScanSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_depth < 1 {
            return Err(Error::Settings("max_depth must be at least 1".into()));
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if max < min {
                return Err(Error::Settings(format!(
                    "max_size ({}) is smaller than min_size ({})",
                    max, min
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.min_similarity) {
            return Err(Error::Settings(format!(
                "min_similarity must be within 0-100, got {}",
                self.min_similarity
            )));
        }
        Ok(())
    }
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for dir in dirs {
        let dir_path = Path::new(&dir);
        let mut should_add = true;
        let result_clone = result.clone();

        for res_dir in &result_clone {
            let res_dir_path = Path::new(res_dir);

            if dir_path.starts_with(res_dir_path) {
                should_add = false;
                break;
            }

            if res_dir_path.starts_with(dir_path) {
                result.retain(|x| x != res_dir);
                break;
            }
        }

        if should_add {
            result.push(dir);
        }
    }

    result
}

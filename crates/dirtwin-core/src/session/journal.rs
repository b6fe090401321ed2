use chrono::Utc;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What the operator decided about one folder of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Delete,
    MergeUp,
    MergeDown,
}

impl DecisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionKind::Delete => "delete",
            DecisionKind::MergeUp => "merge-up",
            DecisionKind::MergeDown => "merge-down",
        }
    }
}

/// Append-only decision log. One `<RFC3339> <action> <path>` line per
/// decision; records are never rewritten or removed. The file is created
/// lazily on the first append, so a session of skips leaves nothing behind.
///
/// This is the only place the whole tool writes to disk on purpose, and
/// even here it only ever appends.
pub struct DecisionJournal {
    path: PathBuf,
    file: Option<File>,
}

impl DecisionJournal {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }

    /// One timestamped file per invocation in the system temp directory.
    pub fn default_path() -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        env::temp_dir().join(format!("dirtwin_decisions_{}.log", stamp))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it, so a later failure cannot lose an
    /// already-confirmed decision.
    pub fn record(&mut self, kind: DecisionKind, target: &Path) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        if let Some(file) = self.file.as_mut() {
            writeln!(
                file,
                "{} {} {}",
                Utc::now().to_rfc3339(),
                kind.as_str(),
                target.display()
            )?;
            file.flush()?;
        }
        Ok(())
    }
}

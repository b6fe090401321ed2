pub mod command;
pub mod journal;

pub use command::{Command, CommandSource, ScriptedSource};
pub use journal::{DecisionJournal, DecisionKind};

use crate::error::Error;
use crate::model::ComparisonResult;
use crate::report;
use std::io::Write;
use std::path::PathBuf;

/// How a review session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every ranked pair was decided.
    Finished,
    /// Quit, EOF, or an abandoned journal append; remaining pairs were
    /// never presented.
    Aborted,
}

#[derive(Debug)]
pub struct SessionSummary {
    pub pairs_presented: usize,
    pub deletions: usize,
    pub merges: usize,
    pub skips: usize,
    pub end: SessionEnd,
}

/// Walk the ranked pairs one at a time and turn operator commands into
/// journal records.
///
/// Strictly synchronous: each pair is fully decided (or the session ends)
/// before the next is presented. Malformed input re-prompts for the same
/// pair. Delete and merge commands append to the journal; the session
/// never deletes, moves or merges anything on disk itself. A failed append
/// is retried or aborts the session at the operator's choice; decisions
/// already flushed stay logged.
pub fn run_session(
    results: &[ComparisonResult],
    source: &mut dyn CommandSource,
    out: &mut dyn Write,
    journal: &mut DecisionJournal,
) -> Result<SessionSummary, Error> {
    let mut summary = SessionSummary {
        pairs_presented: 0,
        deletions: 0,
        merges: 0,
        skips: 0,
        end: SessionEnd::Finished,
    };

    'pairs: for (index, pair) in results.iter().enumerate() {
        present_pair(out, index, results.len(), pair)?;
        summary.pairs_presented += 1;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = match source.next_line()? {
                Some(line) => line,
                None => {
                    summary.end = SessionEnd::Aborted;
                    break 'pairs;
                }
            };

            let command = match Command::parse(&line) {
                Some(command) => command,
                None => {
                    writeln!(
                        out,
                        "Unrecognized command '{}'. Commands: merge-up (mu), \
                         merge-down (md), delete-up (du), delete-down (dd), \
                         skip (s), quit (q)",
                        line.trim()
                    )?;
                    continue;
                }
            };

            match command {
                Command::Skip => {
                    summary.skips += 1;
                    break;
                }
                Command::Quit => {
                    summary.end = SessionEnd::Aborted;
                    break 'pairs;
                }
                Command::DeleteUp | Command::DeleteDown | Command::MergeUp | Command::MergeDown => {
                    // delete-* names the folder to remove; merge-* names the
                    // folder an external tool would drain into the other one.
                    let (kind, target): (DecisionKind, PathBuf) = match command {
                        Command::DeleteUp => (DecisionKind::Delete, pair.folder_a.path.clone()),
                        Command::DeleteDown => (DecisionKind::Delete, pair.folder_b.path.clone()),
                        Command::MergeUp => (DecisionKind::MergeUp, pair.folder_b.path.clone()),
                        Command::MergeDown => (DecisionKind::MergeDown, pair.folder_a.path.clone()),
                        _ => unreachable!(),
                    };

                    if !append_with_retry(out, source, journal, kind, &target)? {
                        summary.end = SessionEnd::Aborted;
                        break 'pairs;
                    }

                    if kind == DecisionKind::Delete {
                        summary.deletions += 1;
                    } else {
                        summary.merges += 1;
                    }
                    break;
                }
            }
        }
    }

    Ok(summary)
}

fn present_pair(
    out: &mut dyn Write,
    index: usize,
    total: usize,
    pair: &ComparisonResult,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}/{}] Similarity: {}%, Total Size: {}",
        index + 1,
        total,
        report::percent(pair.similarity),
        report::human_size(pair.combined_size)
    )?;
    writeln!(
        out,
        "  [up]   {}  ({}, {} entries)",
        pair.folder_a.path.display(),
        report::human_size(pair.folder_a.total_size),
        pair.folder_a.entry_count
    )?;
    writeln!(
        out,
        "  [down] {}  ({}, {} entries)",
        pair.folder_b.path.display(),
        report::human_size(pair.folder_b.total_size),
        pair.folder_b.entry_count
    )
}

/// Append one record, letting the operator retry or abort on I/O failure.
/// Returns `Ok(false)` when the operator gives up on this append.
fn append_with_retry(
    out: &mut dyn Write,
    source: &mut dyn CommandSource,
    journal: &mut DecisionJournal,
    kind: DecisionKind,
    target: &std::path::Path,
) -> Result<bool, Error> {
    loop {
        match journal.record(kind, target) {
            Ok(()) => return Ok(true),
            Err(err) => {
                writeln!(
                    out,
                    "Failed to append to {}: {}",
                    journal.path().display(),
                    err
                )?;
                write!(out, "[r]etry this append, anything else aborts > ")?;
                out.flush()?;
                match source.next_line()? {
                    Some(line) if line.trim().eq_ignore_ascii_case("r") => continue,
                    _ => return Ok(false),
                }
            }
        }
    }
}

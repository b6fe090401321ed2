use std::collections::VecDeque;
use std::io;

/// The bounded command vocabulary of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MergeUp,
    MergeDown,
    DeleteUp,
    DeleteDown,
    Skip,
    Quit,
}

impl Command {
    /// Parse one input line. Anything outside the vocabulary (including an
    /// empty line) is `None` and makes the session re-prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "merge-up" | "mu" => Some(Command::MergeUp),
            "merge-down" | "md" => Some(Command::MergeDown),
            "delete-up" | "du" => Some(Command::DeleteUp),
            "delete-down" | "dd" => Some(Command::DeleteDown),
            "skip" | "s" => Some(Command::Skip),
            "quit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Where the session reads operator input from. The CLI wires this to
/// stdin; tests inject a scripted sequence.
pub trait CommandSource {
    /// Next input line, or `None` when the source is exhausted (EOF).
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Canned input for tests and non-interactive callers.
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommandSource for ScriptedSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

//! Command block extraction.
//!
//! A tech file is the concatenated output of many commands, each introduced
//! by a header line of the form `Command:[<n>] [ <command> ]`. The
//! [`BlockExtractor`] scans a line stream once and yields the output lines of
//! each requested command as a [`CommandOutput`], one block at a time.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::sync::OnceLock;

use crate::errors::Result;
use crate::registry::normalize_command;

/// Any line containing this marks a command boundary.
fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"Command:\[\d+\]").expect("Invalid header pattern regex"))
}

/// Captures the bracketed command name that follows the header marker.
fn header_name_pattern() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| {
        Regex::new(r"Command:\[\d+\]\s*\[([^\]]*)\]").expect("Invalid header name pattern regex")
    })
}

/// Classify a line.
///
/// Returns `None` for output lines, `Some(None)` for a header whose command
/// name cannot be read, and `Some(Some(name))` with the whitespace-normalised
/// command name otherwise.
pub fn header_command(line: &str) -> Option<Option<String>> {
    if !header_pattern().is_match(line) {
        return None;
    }
    let name = header_name_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_command(m.as_str()))
        .filter(|name| !name.is_empty());
    Some(name)
}

/// Extraction behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Yield a block still open at end of input instead of dropping it
    pub flush_trailing_block: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            flush_trailing_block: true,
        }
    }
}

/// The output lines of one command invocation, header excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    pub lines: Vec<String>,
}

impl CommandOutput {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lines: Vec::new(),
        }
    }
}

/// Lazy scanner turning a line stream into command blocks.
///
/// A header line closes the open block (yielding it) and opens a new one
/// only when its command was requested. Output lines go to the open block
/// or are discarded. Command names match on whole tokens, so
/// `show ip interface` never captures `show ip interface brief`.
/// Malformed input never fails; line source errors are passed through and
/// end the scan.
pub struct BlockExtractor<I> {
    lines: I,
    commands: HashSet<String>,
    options: ExtractOptions,
    current: Option<CommandOutput>,
    finished: bool,
}

impl<I> BlockExtractor<I>
where
    I: Iterator<Item = Result<String>>,
{
    pub fn new<C, S>(lines: I, commands: C, options: ExtractOptions) -> Self
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines,
            commands: commands
                .into_iter()
                .map(|c| normalize_command(c.as_ref()))
                .collect(),
            options,
            current: None,
            finished: false,
        }
    }

    fn finish(&mut self) -> Option<CommandOutput> {
        self.finished = true;
        let trailing = self.current.take()?;
        if self.options.flush_trailing_block {
            tracing::debug!(command = %trailing.command, lines = trailing.lines.len(), "flushing trailing block");
            Some(trailing)
        } else {
            tracing::debug!(command = %trailing.command, lines = trailing.lines.len(), "discarding trailing block");
            None
        }
    }
}

impl<I> Iterator for BlockExtractor<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<CommandOutput>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                None => return self.finish().map(Ok),
                Some(Err(err)) => {
                    self.finished = true;
                    self.current = None;
                    return Some(Err(err));
                }
                Some(Ok(line)) => line,
            };
            let line = line.trim_end_matches(['\r', '\n']);

            match header_command(line) {
                Some(name) => {
                    let closed = self.current.take();
                    if let Some(name) = name.filter(|n| self.commands.contains(n)) {
                        self.current = Some(CommandOutput::new(name));
                    }
                    if let Some(block) = closed {
                        return Some(Ok(block));
                    }
                }
                None => {
                    if let Some(block) = self.current.as_mut() {
                        block.lines.push(line.to_string());
                    }
                }
            }
        }
    }
}

impl<I> FusedIterator for BlockExtractor<I> where I: Iterator<Item = Result<String>> {}

/// Extract blocks from in-memory lines.
pub fn extract_blocks<L, S, C, T>(
    lines: L,
    commands: C,
    options: ExtractOptions,
) -> BlockExtractor<impl Iterator<Item = Result<String>>>
where
    L: IntoIterator<Item = S>,
    S: Into<String>,
    C: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    BlockExtractor::new(
        lines.into_iter().map(|l| Ok(l.into())),
        commands,
        options,
    )
}

//! Tech file access.
//!
//! Every pass opens the file afresh and streams it line by line. The handle
//! lives inside the returned iterator, so it is closed when the iterator is
//! dropped: after the last block, on an error, or when the caller stops early.

use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::aggregate::{Aggregator, ParsedBlocks};
use crate::errors::{DynexError, Result};
use crate::extract::{BlockExtractor, CommandOutput, ExtractOptions};
use crate::model::SnapshotTable;
use crate::registry::{normalize_command, ParsedOutput, ParserRegistry};
use crate::{log_op_end, log_op_error, log_op_start};

/// Lines of a file, decoded lossily so stray non-UTF-8 bytes never abort a scan.
pub struct FileLines {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    failed: bool,
}

impl FileLines {
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DynexError::io(path, &e))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            failed: false,
        })
    }
}

impl Iterator for FileLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buf);
                Some(Ok(line.trim_end_matches(['\r', '\n']).to_string()))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(DynexError::io(&self.path, &e)))
            }
        }
    }
}

/// A tech file on disk.
#[derive(Debug, Clone)]
pub struct TechFile {
    path: PathBuf,
    options: ExtractOptions,
}

impl TechFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily extract the blocks of the given commands.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened; read errors surface as
    /// items of the iterator.
    pub fn blocks<C, S>(&self, commands: C) -> Result<BlockExtractor<FileLines>>
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = FileLines::open(&self.path)?;
        Ok(BlockExtractor::new(lines, commands, self.options))
    }

    /// Lazily parse every block that has a registered parser.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    pub fn parsed<'r>(
        &self,
        registry: &'r ParserRegistry,
    ) -> Result<ParsedBlocks<'r, BlockExtractor<FileLines>>> {
        let blocks = self.blocks(registry.commands())?;
        Ok(Aggregator::new(registry).parse(blocks))
    }

    /// Parse the first occurrence of one command, stopping the scan there.
    ///
    /// Returns `Ok(None)` when the command never appears or has no parser.
    ///
    /// # Errors
    ///
    /// Returns `Io` on file errors, or the parser's failure unchanged.
    pub fn command(&self, registry: &ParserRegistry, name: &str) -> Result<Option<ParsedOutput>> {
        let name = normalize_command(name);
        if registry.get(&name).is_none() {
            return Ok(None);
        }
        let mut blocks = self.blocks([name.as_str()])?;
        let Some(block) = blocks.next().transpose()? else {
            return Ok(None);
        };
        drop(blocks);
        registry.parse(&block.command, &block.lines)
    }

    /// Parse everything, keyed by command.
    ///
    /// A command appearing more than once keeps its last occurrence.
    ///
    /// # Errors
    ///
    /// Returns `Io` on file errors, or the first parser failure unchanged.
    pub fn read(&self, registry: &ParserRegistry) -> Result<IndexMap<String, ParsedOutput>> {
        let mut outputs = IndexMap::new();
        for parsed in self.parsed(registry)? {
            let (command, output) = parsed?;
            outputs.insert(command, output);
        }
        Ok(outputs)
    }

    /// Run the full pass and return the aggregated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Io` on file errors, or the first parser failure unchanged.
    pub fn build(&self, registry: &ParserRegistry) -> Result<SnapshotTable> {
        let path = self.path.display().to_string();
        log_op_start!("build_snapshot", path = %path);
        let start = Instant::now();

        let table = self
            .blocks(registry.commands())
            .and_then(|blocks| Aggregator::new(registry).build(blocks))
            .map_err(|e| {
                log_op_error!(
                    "build_snapshot",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    path = %path
                );
                e
            })?;

        log_op_end!(
            "build_snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            kind_count = table.kind_count(),
            identity_count = table.len()
        );

        Ok(table)
    }
}

/// Extract blocks from a file in one call, collecting them.
///
/// # Errors
///
/// Returns `Io` on file errors.
pub fn read_blocks(path: impl AsRef<Path>, commands: &[&str]) -> Result<Vec<CommandOutput>> {
    TechFile::new(path.as_ref()).blocks(commands)?.collect()
}

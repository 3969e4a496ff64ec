//! Command parser registry.
//!
//! Parsers are plain functions from the output lines of one command
//! invocation to typed records. The registry is built once, then handed
//! read-only to the aggregator.

use indexmap::IndexMap;

use crate::errors::{DynexError, ParseError, Result};
use crate::model::{Fields, Record};

/// What a parser yields for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEntry {
    /// A bare record, stored under a field named after its kind
    Scalar(Record),
    /// Named fields to merge into the identity's entry
    Fields(Fields),
}

impl From<Fields> for ParsedEntry {
    fn from(fields: Fields) -> Self {
        ParsedEntry::Fields(fields)
    }
}

impl From<Record> for ParsedEntry {
    fn from(record: Record) -> Self {
        ParsedEntry::Scalar(record)
    }
}

/// Parser output for one command block, in the order the parser produced it.
pub type ParsedOutput = IndexMap<Record, ParsedEntry>;

/// Contract for a command parser: pure, total over well-formed input.
pub type ParseFn = fn(&[String]) -> std::result::Result<ParsedOutput, ParseError>;

/// Normalise a command name to single-spaced tokens.
pub fn normalize_command(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Command name → parser, in registration order.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: IndexMap<String, ParseFn>,
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("commands", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: IndexMap::new(),
        }
    }

    /// Register a parser for a command.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateParser` if the command already has a parser.
    pub fn register(&mut self, command: &str, parser: ParseFn) -> Result<()> {
        let command = normalize_command(command);
        if self.parsers.contains_key(&command) {
            return Err(DynexError::DuplicateParser { command });
        }
        self.parsers.insert(command, parser);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Returns `DuplicateParser` if the command already has a parser.
    pub fn with(mut self, command: &str, parser: ParseFn) -> Result<Self> {
        self.register(command, parser)?;
        Ok(self)
    }

    pub fn get(&self, command: &str) -> Option<ParseFn> {
        self.parsers.get(&normalize_command(command)).copied()
    }

    /// Registered command names, in registration order
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    /// Run the parser registered for `command`.
    ///
    /// Returns `Ok(None)` when no parser is registered.
    ///
    /// # Errors
    ///
    /// Returns `Parser` carrying the parser's own error unchanged.
    pub fn parse(&self, command: &str, lines: &[String]) -> Result<Option<ParsedOutput>> {
        let Some(parser) = self.get(command) else {
            return Ok(None);
        };
        parser(lines)
            .map(Some)
            .map_err(|source| DynexError::Parser {
                command: normalize_command(command),
                source,
            })
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

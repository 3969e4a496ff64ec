//! Aggregation of parsed command output into a [`SnapshotTable`].
//!
//! Several commands may describe the same identity: `show ip interface`
//! contributes an address while `show isis adjacencies` contributes a
//! neighbour for the same interface. The builder merges every contribution
//! into one field mapping per identity. When two contributions name the same
//! field the later one wins.

use indexmap::IndexMap;

use crate::errors::Result;
use crate::extract::CommandOutput;
use crate::model::{Entries, Fields, Kind, Record, SnapshotTable};
use crate::registry::{ParsedEntry, ParsedOutput, ParserRegistry};

/// Incrementally merges parser output; consumed by [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    kinds: IndexMap<Kind, Entries>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge everything one command block produced.
    pub fn merge(&mut self, command: &str, output: ParsedOutput) {
        tracing::debug!(command, identities = output.len(), "merging parsed block");
        for (identity, entry) in output {
            self.merge_entry(identity, entry);
        }
    }

    /// Merge one identity's contribution.
    ///
    /// A bare scalar is stored under the field named after its own kind.
    pub fn merge_entry(&mut self, identity: Record, entry: ParsedEntry) {
        let fields = self
            .kinds
            .entry(identity.kind())
            .or_default()
            .entry(identity)
            .or_default();
        match entry {
            ParsedEntry::Scalar(record) => {
                fields.insert(record.kind().name().to_string(), record.into());
            }
            ParsedEntry::Fields(new_fields) => merge_fields(fields, new_fields),
        }
    }

    pub fn finish(self) -> SnapshotTable {
        SnapshotTable::from_kinds(self.kinds)
    }
}

/// Field-level union; later values replace earlier ones key by key.
fn merge_fields(into: &mut Fields, from: Fields) {
    for (name, value) in from {
        into.insert(name, value);
    }
}

/// Runs registered parsers over extracted blocks.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'r> {
    registry: &'r ParserRegistry,
}

impl<'r> Aggregator<'r> {
    pub fn new(registry: &'r ParserRegistry) -> Self {
        Self { registry }
    }

    /// Parse blocks lazily, yielding `(command, output)` pairs.
    ///
    /// Blocks whose command has no parser are skipped.
    pub fn parse<B>(&self, blocks: B) -> ParsedBlocks<'r, B::IntoIter>
    where
        B: IntoIterator<Item = Result<CommandOutput>>,
    {
        ParsedBlocks {
            registry: self.registry,
            blocks: blocks.into_iter(),
        }
    }

    /// Parse every block and aggregate the results.
    ///
    /// # Errors
    ///
    /// Returns the first block source error or parser failure, unchanged.
    pub fn build<B>(&self, blocks: B) -> Result<SnapshotTable>
    where
        B: IntoIterator<Item = Result<CommandOutput>>,
    {
        let mut builder = SnapshotBuilder::new();
        for parsed in self.parse(blocks) {
            let (command, output) = parsed?;
            builder.merge(&command, output);
        }
        Ok(builder.finish())
    }
}

/// Iterator returned by [`Aggregator::parse`].
pub struct ParsedBlocks<'r, I> {
    registry: &'r ParserRegistry,
    blocks: I,
}

impl<I> Iterator for ParsedBlocks<'_, I>
where
    I: Iterator<Item = Result<CommandOutput>>,
{
    type Item = Result<(String, ParsedOutput)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let block = match self.blocks.next()? {
                Ok(block) => block,
                Err(err) => return Some(Err(err)),
            };
            match self.registry.parse(&block.command, &block.lines) {
                Ok(Some(output)) => return Some(Ok((block.command, output))),
                Ok(None) => {
                    tracing::debug!(command = %block.command, "no parser registered, skipping block");
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, Interface, Port, State};

    #[test]
    fn test_scalar_stored_under_kind_name() {
        let mut builder = SnapshotBuilder::new();
        builder.merge_entry(Port::new("1/1").into(), Record::from(State::new("Up")).into());
        let table = builder.finish();
        assert_eq!(
            table.field(&Port::new("1/1").into(), "State"),
            Some(&FieldValue::from(State::new("Up")))
        );
    }

    #[test]
    fn test_fields_from_two_commands_are_unioned() {
        let identity: Record = Interface::new("1/1").into();
        let mut first = Fields::new();
        first.insert("IP Address".to_string(), "10.0.0.1".into());
        let mut second = Fields::new();
        second.insert("ISIS Status".to_string(), State::new("UP").into());

        let mut builder = SnapshotBuilder::new();
        builder.merge_entry(identity.clone(), first.into());
        builder.merge_entry(identity.clone(), second.into());
        let table = builder.finish();

        let fields = table.fields(&identity).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("IP Address"));
        assert!(fields.contains_key("ISIS Status"));
    }

    #[test]
    fn test_later_contribution_wins_on_collision() {
        let identity: Record = Port::new("1/1").into();
        let mut builder = SnapshotBuilder::new();
        builder.merge_entry(identity.clone(), Record::from(State::new("Up")).into());
        builder.merge_entry(identity.clone(), Record::from(State::new("Down")).into());
        let table = builder.finish();
        assert_eq!(
            table.field(&identity, "State"),
            Some(&FieldValue::from(State::new("Down")))
        );
    }
}

//! Aggregated snapshot table: kind → identity → fields.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::record::{Kind, Record};
use super::value::{FieldValue, Fields};

/// Identity → fields for one kind.
pub type Entries = IndexMap<Record, Fields>;

/// One fully aggregated parse of one tech file.
///
/// Built once by the aggregator and immutable afterwards; it holds no
/// interior mutability, so `&SnapshotTable` can be shared freely between
/// readers on any thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotTable {
    kinds: IndexMap<Kind, Entries>,
}

impl SnapshotTable {
    pub(crate) fn from_kinds(kinds: IndexMap<Kind, Entries>) -> Self {
        Self { kinds }
    }

    /// Entries for one kind, `None` if the snapshot has no data for it
    pub fn kind(&self, kind: Kind) -> Option<&Entries> {
        self.kinds.get(&kind)
    }

    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Fields recorded for an identity
    pub fn fields(&self, identity: &Record) -> Option<&Fields> {
        self.kinds.get(&identity.kind())?.get(identity)
    }

    /// A single field of an identity
    pub fn field(&self, identity: &Record, name: &str) -> Option<&FieldValue> {
        self.fields(identity)?.get(name)
    }

    /// Kinds in first-observed order
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.keys().copied()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Kind, Entries> {
        self.kinds.iter()
    }

    /// Number of kinds present
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Total number of identities across all kinds
    pub fn len(&self) -> usize {
        self.kinds.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Identity count per kind, in table order
    pub fn kind_counts(&self) -> Vec<(Kind, usize)> {
        self.kinds.iter().map(|(k, e)| (*k, e.len())).collect()
    }
}

impl<'a> IntoIterator for &'a SnapshotTable {
    type Item = (&'a Kind, &'a Entries);
    type IntoIter = indexmap::map::Iter<'a, Kind, Entries>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter()
    }
}

/// Serializes as `kind name → canonical identity → fields`.
impl Serialize for SnapshotTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.kinds.len()))?;
        for (kind, entries) in &self.kinds {
            let keyed: IndexMap<String, &Fields> = entries
                .iter()
                .map(|(identity, fields)| (identity.canonical(), fields))
                .collect();
            map.serialize_entry(kind.name(), &keyed)?;
        }
        map.end()
    }
}

//! Diff report types.
//!
//! Maps preserve old-table order so that serialized reports are stable for
//! identical inputs.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::model::{FieldValue, Kind, Record, RecordDiff};

/// Field name → difference, for one identity or one nested mapping.
pub type FieldDiffs = IndexMap<String, FieldDiff>;

/// How one field differs between the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldDiff {
    /// Primitive change, or a field present on one side only (`None` on the other)
    Value {
        old: Option<FieldValue>,
        new: Option<FieldValue>,
    },
    /// Record-valued field, described by the record kind's own diff
    Record(RecordDiff),
    /// Nested mapping; only non-empty sub-diffs are kept
    Nested(FieldDiffs),
}

impl FieldDiff {
    pub fn changed(old: impl Into<FieldValue>, new: impl Into<FieldValue>) -> Self {
        FieldDiff::Value {
            old: Some(old.into()),
            new: Some(new.into()),
        }
    }

    /// Field present in the old snapshot only
    pub fn removed(old: impl Into<FieldValue>) -> Self {
        FieldDiff::Value {
            old: Some(old.into()),
            new: None,
        }
    }

    /// Field present in the new snapshot only
    pub fn added(new: impl Into<FieldValue>) -> Self {
        FieldDiff::Value {
            old: None,
            new: Some(new.into()),
        }
    }

    pub fn as_nested(&self) -> Option<&FieldDiffs> {
        match self {
            FieldDiff::Nested(diffs) => Some(diffs),
            _ => None,
        }
    }
}

/// Result of one comparison.
///
/// Every kind of the old snapshot has an entry, keyed by new identity; an
/// entry is empty when nothing of that kind changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    kinds: IndexMap<Kind, IndexMap<Record, FieldDiffs>>,
}

impl DiffReport {
    pub(crate) fn insert_kind(&mut self, kind: Kind) {
        self.kinds.entry(kind).or_default();
    }

    pub(crate) fn insert(&mut self, identity: Record, diffs: FieldDiffs) {
        self.kinds
            .entry(identity.kind())
            .or_default()
            .insert(identity, diffs);
    }

    /// Changed identities of one kind; `None` if the old snapshot had no such kind
    pub fn kind(&self, kind: Kind) -> Option<&IndexMap<Record, FieldDiffs>> {
        self.kinds.get(&kind)
    }

    /// Field diffs for a new identity
    pub fn get(&self, identity: &Record) -> Option<&FieldDiffs> {
        self.kinds.get(&identity.kind())?.get(identity)
    }

    pub fn field(&self, identity: &Record, name: &str) -> Option<&FieldDiff> {
        self.get(identity)?.get(name)
    }

    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.keys().copied()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Kind, IndexMap<Record, FieldDiffs>> {
        self.kinds.iter()
    }

    /// True when no identity of any kind changed
    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(IndexMap::is_empty)
    }

    /// Number of changed identities across all kinds
    pub fn change_count(&self) -> usize {
        self.kinds.values().map(IndexMap::len).sum()
    }
}

/// Serializes as `kind name → canonical new identity → field diffs`.
impl Serialize for DiffReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.kinds.len()))?;
        for (kind, identities) in &self.kinds {
            let keyed: IndexMap<String, &FieldDiffs> = identities
                .iter()
                .map(|(identity, diffs)| (identity.canonical(), diffs))
                .collect();
            map.serialize_entry(kind.name(), &keyed)?;
        }
        map.end()
    }
}

//! Per-kind identity correspondence between two snapshots.

use indexmap::{IndexMap, IndexSet};

use crate::errors::{DynexError, Result};
use crate::model::{Kind, Record};

/// One declared correspondence.
///
/// `new` is `None` when the source document named the old identity but gave
/// nothing it maps to; resolving such a pair fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPair {
    pub old: Record,
    pub new: Option<Record>,
}

/// Ordered old → new identity pairs, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapping {
    kinds: IndexMap<Kind, Vec<MappingPair>>,
    /// old identity → position in its kind's pair list
    index: IndexMap<Record, usize>,
    /// new identities claimed by a declared pair
    targets: IndexSet<Record>,
}

impl KeyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `old` is known as `new` in the newer snapshot.
    ///
    /// # Errors
    ///
    /// - `DuplicateMapping` if `old` is already mapped
    /// - `KindMismatch` if `new` is of a different kind than `old`
    pub fn insert(&mut self, old: Record, new: Option<Record>) -> Result<()> {
        if let Some(new) = &new {
            if new.kind() != old.kind() {
                return Err(DynexError::KindMismatch {
                    expected: old.kind(),
                    found: new.kind(),
                });
            }
        }
        if self.index.contains_key(&old) {
            return Err(DynexError::DuplicateMapping {
                kind: old.kind(),
                key: old.canonical(),
            });
        }
        if let Some(new) = &new {
            self.targets.insert(new.clone());
        }
        let pairs = self.kinds.entry(old.kind()).or_default();
        self.index.insert(old.clone(), pairs.len());
        pairs.push(MappingPair { old, new });
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for a resolved pair.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn with(mut self, old: impl Into<Record>, new: impl Into<Record>) -> Result<Self> {
        self.insert(old.into(), Some(new.into()))?;
        Ok(self)
    }

    /// Declared pairs of one kind, in declaration order
    pub fn pairs(&self, kind: Kind) -> &[MappingPair] {
        self.kinds.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn lookup(&self, old: &Record) -> Option<&MappingPair> {
        let position = *self.index.get(old)?;
        self.pairs(old.kind()).get(position)
    }

    /// Whether a declared pair maps some old identity onto `new`
    pub fn is_target(&self, new: &Record) -> bool {
        self.targets.contains(new)
    }

    /// The identity `old` is known by in the newer snapshot.
    ///
    /// Identities without an entry map to themselves.
    ///
    /// # Errors
    ///
    /// Returns `Mapping` when the entry exists but has no new identity.
    pub fn resolve(&self, old: &Record) -> Result<Record> {
        match self.lookup(old) {
            None => Ok(old.clone()),
            Some(MappingPair { new: Some(new), .. }) => Ok(new.clone()),
            Some(MappingPair { new: None, .. }) => Err(DynexError::Mapping {
                kind: old.kind(),
                key: old.canonical(),
            }),
        }
    }

    /// Total number of declared pairs
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Interface, Port};

    #[test]
    fn test_unmapped_identity_resolves_to_itself() {
        let mapping = KeyMapping::new();
        let port: Record = Port::new("1/1").into();
        assert_eq!(mapping.resolve(&port).unwrap(), port);
    }

    #[test]
    fn test_declared_pair_resolves() {
        let mapping = KeyMapping::new()
            .with(Port::new("1/1"), Port::new("2/1"))
            .unwrap();
        assert_eq!(
            mapping.resolve(&Port::new("1/1").into()).unwrap(),
            Port::new("2/1").into()
        );
    }

    #[test]
    fn test_unresolved_pair_is_mapping_error() {
        let mut mapping = KeyMapping::new();
        mapping.insert(Port::new("1/1").into(), None).unwrap();
        assert_eq!(
            mapping.resolve(&Port::new("1/1").into()),
            Err(DynexError::Mapping {
                kind: Kind::Port,
                key: "1/1".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_old_identity_rejected() {
        let mapping = KeyMapping::new()
            .with(Port::new("1/1"), Port::new("2/1"))
            .unwrap();
        let err = mapping
            .with(Port::new("1/1"), Port::new("3/1"))
            .unwrap_err();
        assert!(matches!(err, DynexError::DuplicateMapping { kind: Kind::Port, .. }));
    }

    #[test]
    fn test_lookup_by_index_across_many_pairs() {
        let mut mapping = KeyMapping::new();
        for n in 0..500 {
            mapping
                .insert(
                    Port::new(format!("1/{}", n)).into(),
                    Some(Port::new(format!("2/{}", n)).into()),
                )
                .unwrap();
        }
        assert_eq!(mapping.len(), 500);
        assert_eq!(
            mapping.resolve(&Port::new("1/377").into()).unwrap(),
            Port::new("2/377").into()
        );
        assert_eq!(mapping.pairs(Kind::Port)[377].old, Port::new("1/377").into());
        assert!(mapping.lookup(&Interface::new("1/377").into()).is_none());
    }

    #[test]
    fn test_declared_targets_tracked() {
        let mapping = KeyMapping::new()
            .with(Port::new("1/1"), Port::new("2/1"))
            .unwrap();
        assert!(mapping.is_target(&Port::new("2/1").into()));
        assert!(!mapping.is_target(&Port::new("1/1").into()));
        assert!(!mapping.is_target(&Interface::new("2/1").into()));
    }

    #[test]
    fn test_cross_kind_pair_rejected() {
        let err = KeyMapping::new()
            .with(Port::new("1/1"), Interface::new("1/1"))
            .unwrap_err();
        assert!(matches!(err, DynexError::KindMismatch { .. }));
    }
}

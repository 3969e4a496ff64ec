//! Structural comparison of two snapshot tables.
//!
//! The entry point is [`compute_diff`]. It walks the old table kind by kind,
//! resolves each identity through the optional [`KeyMapping`] and diffs the
//! field mappings recursively. Structural disagreements abort the comparison
//! without returning a partial report.

use std::time::Instant;

use crate::compare::model::{DiffReport, FieldDiff, FieldDiffs};
use crate::errors::{DynexError, Result};
use crate::mapping::KeyMapping;
use crate::model::{FieldValue, Fields, Kind, SnapshotTable};
use crate::{log_op_end, log_op_error, log_op_start};

/// Compare two snapshots.
///
/// Only kinds of the old snapshot are visited. An old identity without a
/// mapping entry is looked up unchanged; one whose resolved identity is not
/// in the new snapshot is skipped. Identities are reported under their new
/// identity and only when at least one field differs.
///
/// # Errors
///
/// - `MissingKind` if the new snapshot has no data for an old kind
/// - `Mapping` if a mapping entry has no new identity
/// - `TypeMismatch` if a field's declared type differs between snapshots
pub fn compute_diff(
    old: &SnapshotTable,
    new: &SnapshotTable,
    mapping: Option<&KeyMapping>,
) -> Result<DiffReport> {
    log_op_start!(
        "compute_diff",
        old_kinds = old.kind_count(),
        new_kinds = new.kind_count(),
        mapped = mapping.map_or(0, KeyMapping::len)
    );
    let start = Instant::now();

    let report = diff_tables(old, new, mapping).map_err(|e| {
        log_op_error!(
            "compute_diff",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        change_count = report.change_count()
    );

    Ok(report)
}

fn diff_tables(
    old: &SnapshotTable,
    new: &SnapshotTable,
    mapping: Option<&KeyMapping>,
) -> Result<DiffReport> {
    let mut report = DiffReport::default();

    for (kind, old_entries) in old {
        let new_entries = new
            .kind(*kind)
            .ok_or(DynexError::MissingKind { kind: *kind })?;
        report.insert_kind(*kind);

        for (old_identity, old_fields) in old_entries {
            let new_identity = match mapping {
                Some(mapping) => {
                    if mapping.lookup(old_identity).is_none() && mapping.is_target(old_identity) {
                        tracing::debug!(
                            kind = %kind,
                            old = %old_identity,
                            "identity claimed by a declared mapping, skipping"
                        );
                        continue;
                    }
                    mapping.resolve(old_identity)?
                }
                None => old_identity.clone(),
            };
            let Some(new_fields) = new_entries.get(&new_identity) else {
                tracing::debug!(
                    kind = %kind,
                    old = %old_identity,
                    new = %new_identity,
                    "identity absent from new snapshot, skipping"
                );
                continue;
            };

            let identity = new_identity.canonical();
            let diffs = diff_fields(*kind, &identity, None, old_fields, new_fields)?;
            if !diffs.is_empty() {
                report.insert(new_identity, diffs);
            }
        }
    }

    Ok(report)
}

/// Diff two field mappings; `parent` is the slash-joined path of an
/// enclosing nested field.
fn diff_fields(
    kind: Kind,
    identity: &str,
    parent: Option<&str>,
    old: &Fields,
    new: &Fields,
) -> Result<FieldDiffs> {
    let mut diffs = FieldDiffs::new();

    for (name, old_value) in old {
        let diff = match new.get(name) {
            Some(new_value) => {
                let path = match parent {
                    Some(parent) => format!("{}/{}", parent, name),
                    None => name.clone(),
                };
                diff_values(kind, identity, &path, old_value, new_value)?
            }
            None => Some(FieldDiff::removed(old_value.clone())),
        };
        if let Some(diff) = diff {
            diffs.insert(name.clone(), diff);
        }
    }

    for (name, new_value) in new {
        if !old.contains_key(name) {
            diffs.insert(name.clone(), FieldDiff::added(new_value.clone()));
        }
    }

    Ok(diffs)
}

fn diff_values(
    kind: Kind,
    identity: &str,
    path: &str,
    old: &FieldValue,
    new: &FieldValue,
) -> Result<Option<FieldDiff>> {
    if !old.is_compatible(new) {
        return Err(DynexError::TypeMismatch {
            kind,
            identity: identity.to_string(),
            field: path.to_string(),
            old_type: old.type_name(),
            new_type: new.type_name(),
        });
    }

    let diff = match (old, new) {
        (FieldValue::Map(old), FieldValue::Map(new)) => {
            let nested = diff_fields(kind, identity, Some(path), old, new)?;
            (!nested.is_empty()).then_some(FieldDiff::Nested(nested))
        }
        (FieldValue::Record(old), FieldValue::Record(new)) => old.diff(new)?.map(FieldDiff::Record),
        _ => (old != new).then(|| FieldDiff::changed(old.clone(), new.clone())),
    };
    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SnapshotBuilder;
    use crate::model::{Port, Record, State};

    fn table(entries: Vec<(Record, Fields)>) -> SnapshotTable {
        let mut builder = SnapshotBuilder::new();
        for (identity, fields) in entries {
            builder.merge_entry(identity, fields.into());
        }
        builder.finish()
    }

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_nested_path_reported_in_type_mismatch() {
        let port: Record = Port::new("1/1").into();
        let old = table(vec![(
            port.clone(),
            fields(&[("Counters", fields(&[("In", 5i64.into())]).into())]),
        )]);
        let new = table(vec![(
            port,
            fields(&[("Counters", fields(&[("In", "five".into())]).into())]),
        )]);

        let err = compute_diff(&old, &new, None).unwrap_err();
        assert_eq!(
            err,
            DynexError::TypeMismatch {
                kind: Kind::Port,
                identity: "1/1".to_string(),
                field: "Counters/In".to_string(),
                old_type: "integer".to_string(),
                new_type: "text".to_string(),
            }
        );
    }

    #[test]
    fn test_unchanged_nested_mapping_omitted() {
        let port: Record = Port::new("1/1").into();
        let inner = fields(&[("In", 5i64.into())]);
        let old = table(vec![(
            port.clone(),
            fields(&[("Counters", inner.clone().into()), ("State", State::new("Up").into())]),
        )]);
        let new = table(vec![(
            port.clone(),
            fields(&[("Counters", inner.into()), ("State", State::new("Down").into())]),
        )]);

        let report = compute_diff(&old, &new, None).unwrap();
        let diffs = report.get(&port).unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(diffs.contains_key("State"));
    }
}

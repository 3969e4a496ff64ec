//! Field values stored against a record identity.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::record::{Kind, Record};

/// Field name → value, in insertion order.
pub type Fields = IndexMap<String, FieldValue>;

/// A value held in a snapshot field: a primitive, a typed record, or a
/// nested field mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Record(Record),
    Map(Fields),
}

impl FieldValue {
    /// Declared type name, used when reporting type mismatches.
    pub fn type_name(&self) -> String {
        match self {
            FieldValue::Text(_) => "text".to_string(),
            FieldValue::Integer(_) => "integer".to_string(),
            FieldValue::Bool(_) => "bool".to_string(),
            FieldValue::Record(r) => format!("record:{}", r.kind()),
            FieldValue::Map(_) => "map".to_string(),
        }
    }

    /// Whether two values share a declared type and can be diffed.
    ///
    /// Records are only compatible with records of the same kind.
    pub fn is_compatible(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Record(a), FieldValue::Record(b)) => a.kind() == b.kind(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The record kind, when this value is a record.
    pub fn record_kind(&self) -> Option<Kind> {
        self.as_record().map(Record::kind)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Record(r) => write!(f, "{}", r),
            FieldValue::Map(m) => {
                let parts: Vec<String> = m.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Record(r) => r.serialize(serializer),
            FieldValue::Map(m) => m.serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        FieldValue::Record(value)
    }
}

impl From<Fields> for FieldValue {
    fn from(value: Fields) -> Self {
        FieldValue::Map(value)
    }
}

macro_rules! record_field_value {
    ($($kind:ident),*) => {
        $(
            impl From<super::record::$kind> for FieldValue {
                fn from(value: super::record::$kind) -> Self {
                    FieldValue::Record(value.into())
                }
            }
        )*
    };
}

record_field_value!(Port, Interface, Network, Vlan, State, Connection, MacAddresses);

//! Typed network records.
//!
//! Every record kind supplies value equality, a canonical string rendering
//! and a kind-specific diff. [`Record`] closes the set of kinds so that a
//! snapshot can key all of them in one table.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::{DynexError, Result};

/// The closed set of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Port,
    Interface,
    Network,
    Vlan,
    State,
    Connection,
    MacAddresses,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 7] = [
        Kind::Port,
        Kind::Interface,
        Kind::Network,
        Kind::Vlan,
        Kind::State,
        Kind::Connection,
        Kind::MacAddresses,
    ];

    /// Stable name used in reports, mapping documents and as the synthetic
    /// field name of bare scalars.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Port => "Port",
            Kind::Interface => "Interface",
            Kind::Network => "Network",
            Kind::Vlan => "Vlan",
            Kind::State => "State",
            Kind::Connection => "Connection",
            Kind::MacAddresses => "MacAddresses",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = DynexError;

    fn from_str(name: &str) -> Result<Self> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| DynexError::UnknownKind {
                name: name.to_string(),
            })
    }
}

/// Difference between two records of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordDiff {
    /// Canonical renderings of both sides
    Changed { old: String, new: String },
    /// Set difference: members lost and members gained
    Membership {
        missing: Vec<String>,
        gained: Vec<String>,
    },
}

impl RecordDiff {
    pub fn changed(old: impl fmt::Display, new: impl fmt::Display) -> Self {
        RecordDiff::Changed {
            old: old.to_string(),
            new: new.to_string(),
        }
    }
}

/// Behaviour shared by every concrete record kind.
pub trait NetworkObject: Clone + Eq + fmt::Display + Into<Record> {
    /// The kind this type belongs to
    const KIND: Kind;

    /// Stable canonical rendering, used for display and serialization keys
    fn canonical(&self) -> String {
        self.to_string()
    }

    /// `None` when equal, otherwise a kind-appropriate descriptor
    fn diff(&self, new: &Self) -> Option<RecordDiff> {
        if self == new {
            None
        } else {
            Some(RecordDiff::changed(self, new))
        }
    }
}

macro_rules! named_record {
    ($(#[$doc:meta])* $name:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            pub $field: String,
        }

        impl $name {
            pub fn new($field: impl Into<String>) -> Self {
                Self {
                    $field: $field.into(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.$field)
            }
        }

        impl NetworkObject for $name {
            const KIND: Kind = Kind::$name;
        }

        impl From<$name> for Record {
            fn from(value: $name) -> Self {
                Record::$name(value)
            }
        }
    };
}

named_record!(
    /// A layer 2 attachment point on the device
    Port,
    name
);
named_record!(
    /// A layer 3 identity; may be a physical port or a logical construct
    Interface,
    name
);
named_record!(
    /// Operational or administrative state of another object
    State,
    description
);
named_record!(
    /// The far end of an L2 or L3 adjacency
    Connection,
    peer
);

/// A routed address range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Network {
    pub address: String,
    pub mask: String,
}

impl Network {
    pub fn new(address: impl Into<String>, mask: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            mask: mask.into(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}", self.address, self.mask)
    }
}

impl NetworkObject for Network {
    const KIND: Kind = Kind::Network;
}

impl From<Network> for Record {
    fn from(value: Network) -> Self {
        Record::Network(value)
    }
}

/// A layer 2 broadcast domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vlan {
    pub id: u32,
    pub name: String,
}

impl Vlan {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Vlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VLAN({}, {})", self.id, self.name)
    }
}

impl NetworkObject for Vlan {
    const KIND: Kind = Kind::Vlan;
}

impl From<Vlan> for Record {
    fn from(value: Vlan) -> Self {
        Record::Vlan(value)
    }
}

/// MAC addresses learned on one port.
///
/// Learning order is not meaningful, so the addresses are held as a set and
/// both equality and diff are set operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddresses {
    addresses: BTreeSet<String>,
}

impl MacAddresses {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, address: impl Into<String>) -> bool {
        self.addresses.insert(address.into())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl fmt::Display for MacAddresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(", "))
    }
}

impl NetworkObject for MacAddresses {
    const KIND: Kind = Kind::MacAddresses;

    fn diff(&self, new: &Self) -> Option<RecordDiff> {
        let (gained, missing) = set_delta(&self.addresses, &new.addresses);
        if missing.is_empty() && gained.is_empty() {
            None
        } else {
            Some(RecordDiff::Membership { missing, gained })
        }
    }
}

impl From<MacAddresses> for Record {
    fn from(value: MacAddresses) -> Self {
        Record::MacAddresses(value)
    }
}

/// Compute a set-delta between two address sets.
///
/// Returns `(added, removed)` where added = in b but not a, removed = in a but not b.
fn set_delta(a: &BTreeSet<String>, b: &BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    let added = b.difference(a).cloned().collect();
    let removed = a.difference(b).cloned().collect();
    (added, removed)
}

/// Any typed record; usable both as a table identity and as a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Record {
    Port(Port),
    Interface(Interface),
    Network(Network),
    Vlan(Vlan),
    State(State),
    Connection(Connection),
    MacAddresses(MacAddresses),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::Port(_) => Kind::Port,
            Record::Interface(_) => Kind::Interface,
            Record::Network(_) => Kind::Network,
            Record::Vlan(_) => Kind::Vlan,
            Record::State(_) => Kind::State,
            Record::Connection(_) => Kind::Connection,
            Record::MacAddresses(_) => Kind::MacAddresses,
        }
    }

    pub fn canonical(&self) -> String {
        match self {
            Record::Port(r) => r.canonical(),
            Record::Interface(r) => r.canonical(),
            Record::Network(r) => r.canonical(),
            Record::Vlan(r) => r.canonical(),
            Record::State(r) => r.canonical(),
            Record::Connection(r) => r.canonical(),
            Record::MacAddresses(r) => r.canonical(),
        }
    }

    /// Diff against a record of the same kind.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` when `new` is of a different kind.
    pub fn diff(&self, new: &Record) -> Result<Option<RecordDiff>> {
        let diff = match (self, new) {
            (Record::Port(a), Record::Port(b)) => a.diff(b),
            (Record::Interface(a), Record::Interface(b)) => a.diff(b),
            (Record::Network(a), Record::Network(b)) => a.diff(b),
            (Record::Vlan(a), Record::Vlan(b)) => a.diff(b),
            (Record::State(a), Record::State(b)) => a.diff(b),
            (Record::Connection(a), Record::Connection(b)) => a.diff(b),
            (Record::MacAddresses(a), Record::MacAddresses(b)) => a.diff(b),
            _ => {
                return Err(DynexError::KindMismatch {
                    expected: self.kind(),
                    found: new.kind(),
                })
            }
        };
        Ok(diff)
    }

    /// Build a record of `kind` from its constructor arguments, as written in
    /// key-mapping documents.
    ///
    /// Single-name kinds take one argument. `Network` takes `[address, mask]`
    /// or its canonical `address//mask` form, `Vlan` takes `[id, name]` and
    /// `MacAddresses` takes any number of addresses.
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` when the arguments do not fit the kind.
    pub fn from_args<S: AsRef<str>>(kind: Kind, args: &[S]) -> Result<Record> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref().trim()).collect();
        let invalid = |reason: String| DynexError::InvalidToken { kind, reason };

        let single = || -> Result<String> {
            match args.as_slice() {
                [value] if !value.is_empty() => Ok(value.to_string()),
                _ => Err(invalid(format!(
                    "expected one non-empty argument, got {:?}",
                    args
                ))),
            }
        };

        let record: Record = match kind {
            Kind::Port => Port::new(single()?).into(),
            Kind::Interface => Interface::new(single()?).into(),
            Kind::State => State::new(single()?).into(),
            Kind::Connection => Connection::new(single()?).into(),
            Kind::Network => match args.as_slice() {
                [address, mask] => Network::new(*address, *mask).into(),
                [canonical] => match canonical.split_once("//") {
                    Some((address, mask)) => Network::new(address, mask).into(),
                    None => {
                        return Err(invalid(format!(
                            "expected 'address//mask', got '{}'",
                            canonical
                        )))
                    }
                },
                _ => return Err(invalid(format!("expected [address, mask], got {:?}", args))),
            },
            Kind::Vlan => match args.as_slice() {
                [id, name] => {
                    let id = id
                        .parse::<u32>()
                        .map_err(|e| invalid(format!("VLAN id '{}': {}", id, e)))?;
                    Vlan::new(id, *name).into()
                }
                _ => return Err(invalid(format!("expected [id, name], got {:?}", args))),
            },
            Kind::MacAddresses => MacAddresses::new(args.iter().copied()).into(),
        };
        Ok(record)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

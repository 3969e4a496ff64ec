//! Record model and snapshot table.

mod record;
mod table;
mod value;

pub use record::{
    Connection, Interface, Kind, MacAddresses, Network, NetworkObject, Port, Record, RecordDiff,
    State, Vlan,
};
pub use table::{Entries, SnapshotTable};
pub use value::{FieldValue, Fields};

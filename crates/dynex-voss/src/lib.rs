//! Extreme VOSS parser pack.
//!
//! Each module parses the output of one or two VOSS CLI commands into
//! dynex records. [`registry`] returns the process-wide registry holding all
//! of them, built on first use.

use std::sync::OnceLock;

use dynex_core::registry::{ParseFn, ParserRegistry};

pub mod interfaces;
pub mod ip;
pub mod isis;
pub mod lldp;
pub mod vlan;

/// Every parser this crate provides, keyed by the command it understands.
pub const PARSERS: &[(&str, ParseFn)] = &[
    ("show interfaces gigabitEthernet", interfaces::parse_gigabit_ethernet),
    ("show lldp neighbor", lldp::parse_lldp_neighbor),
    ("show isis adjacencies", isis::parse_isis_adjacencies),
    ("show isis interface", isis::parse_isis_interface),
    ("show ip interface", ip::parse_ip_interface),
    ("show vlan basic", vlan::parse_vlan_basic),
];

/// Build a fresh registry holding [`PARSERS`].
///
/// # Errors
///
/// Returns `DuplicateParser` if a command appears twice.
pub fn build_registry() -> dynex_core::Result<ParserRegistry> {
    PARSERS
        .iter()
        .try_fold(ParserRegistry::new(), |registry, (command, parser)| {
            registry.with(command, *parser)
        })
}

/// The shared VOSS registry.
pub fn registry() -> &'static ParserRegistry {
    static REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        build_registry().unwrap_or_else(|err| {
            tracing::error!(%err, "VOSS parser table is inconsistent, registry left empty");
            ParserRegistry::new()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_parser_registered() {
        let registry = registry();
        assert_eq!(registry.len(), PARSERS.len());
        for (command, _) in PARSERS {
            assert!(registry.get(command).is_some(), "missing {command}");
        }
    }

    #[test]
    fn test_registry_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
    }
}

//! `show interfaces gigabitEthernet`
//!
//! Two sections are read: the port table (between the `Port Name` and
//! `Port Config` banners) gives each port's operational state from its
//! trailing OPERATE column, and the
//! `Port Fdb` table (up to `Brouter Port Ip`) gives the MAC addresses
//! learned on each port.

use regex::Regex;
use std::sync::OnceLock;

use dynex_core::errors::ParseError;
use dynex_core::model::{Fields, Interface, MacAddresses, Record, State};
use dynex_core::registry::{ParsedEntry, ParsedOutput};

struct Patterns {
    port_row: Regex,
    oper_status: Regex,
    fdb_port: Regex,
    mac: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        port_row: Regex::new(r"^\s*(\d+/\d+)\s").expect("Invalid port row regex"),
        oper_status: Regex::new(r"(?i)\b(up|down)\s*$").expect("Invalid link state regex"),
        fdb_port: Regex::new(r"Port-(\d+/\d+)").expect("Invalid FDB port regex"),
        mac: Regex::new(r"\b[0-9a-fA-F]{2}(?:[:.][0-9a-fA-F]{2}){5}\b").expect("Invalid MAC regex"),
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Ports,
    Fdb,
}

/// Parse port states and learned MAC addresses, keyed by interface.
///
/// MAC rows for ports absent from the port table are ignored.
pub fn parse_gigabit_ethernet(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let p = patterns();
    let mut states: Vec<(Interface, State)> = Vec::new();
    let mut macs: Vec<MacAddresses> = Vec::new();
    let mut section = Section::Other;

    for line in lines {
        if line.contains("Port Name") {
            section = Section::Ports;
        } else if line.contains("Port Config") || line.contains("Brouter Port Ip") {
            section = Section::Other;
        } else if line.contains("Port Fdb") {
            section = Section::Fdb;
        }

        match section {
            Section::Ports => {
                if let Some(caps) = p.port_row.captures(line) {
                    let state = match p.oper_status.captures(line) {
                        Some(status) if status[1].eq_ignore_ascii_case("up") => "Up",
                        _ => "Down",
                    };
                    let interface = Interface::new(&caps[1]);
                    match states.iter().position(|(i, _)| *i == interface) {
                        Some(idx) => states[idx].1 = State::new(state),
                        None => {
                            states.push((interface, State::new(state)));
                            macs.push(MacAddresses::default());
                        }
                    }
                }
            }
            Section::Fdb => {
                let (Some(port), Some(mac)) = (p.fdb_port.captures(line), p.mac.find(line)) else {
                    continue;
                };
                let interface = Interface::new(&port[1]);
                if let Some(idx) = states.iter().position(|(i, _)| *i == interface) {
                    macs[idx].insert(mac.as_str().to_ascii_lowercase());
                }
            }
            Section::Other => {}
        }
    }

    let output = states
        .into_iter()
        .zip(macs)
        .map(|((interface, state), macs)| {
            let mut fields = Fields::new();
            fields.insert("State".to_string(), state.into());
            fields.insert("MAC Addresses".to_string(), macs.into());
            (Record::from(interface), ParsedEntry::from(fields))
        })
        .collect();
    Ok(output)
}

//! `show lldp neighbor`

use regex::Regex;
use std::sync::OnceLock;

use dynex_core::errors::ParseError;
use dynex_core::model::{Connection, Fields, Interface, Record};
use dynex_core::registry::{ParsedEntry, ParsedOutput};

fn port_header() -> &'static Regex {
    static PORT: OnceLock<Regex> = OnceLock::new();
    PORT.get_or_init(|| Regex::new(r"Port:\s*(\d+/\d+)").expect("Invalid LLDP port regex"))
}

/// Local interface → remote system name and remote interface.
///
/// Each neighbour starts at a `Port: <slot/port>` line; the `SysName` and
/// `PortId` lines that follow carry their value as the last word.
pub fn parse_lldp_neighbor(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut output = ParsedOutput::new();
    let mut current: Option<Record> = None;

    for line in lines {
        if let Some(caps) = port_header().captures(line) {
            let interface: Record = Interface::new(&caps[1]).into();
            output.insert(interface.clone(), ParsedEntry::Fields(Fields::new()));
            current = Some(interface);
            continue;
        }
        let Some(interface) = &current else {
            continue;
        };
        let Some(ParsedEntry::Fields(fields)) = output.get_mut(interface) else {
            continue;
        };
        let Some(value) = line.split_whitespace().last() else {
            continue;
        };
        if line.contains("SysName") {
            fields.insert(
                "LLDP Remote SysName".to_string(),
                Connection::new(value).into(),
            );
        } else if line.contains("PortId") {
            fields.insert(
                "LLDP Remote Interface".to_string(),
                Interface::new(value).into(),
            );
        }
    }

    Ok(output)
}

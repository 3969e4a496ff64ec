//! `show isis adjacencies` and `show isis interface`

use regex::Regex;
use std::sync::OnceLock;

use dynex_core::errors::ParseError;
use dynex_core::model::{Connection, Fields, Interface, Port, Record, State};
use dynex_core::registry::{ParsedEntry, ParsedOutput};

struct Patterns {
    adjacency: Regex,
    interface: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        adjacency: Regex::new(
            r"^\s*Port(?P<port>\d+/\d+)\s+\d+\s+(?P<state>\S+)\s.*?(?P<sysid>[0-9a-fA-F]{4}\.[0-9a-fA-F]{4}\.[0-9a-fA-F]{4})(?:\s+(?P<host>\S+))?\s*$",
        )
        .expect("Invalid ISIS adjacency regex"),
        interface: Regex::new(
            r"^\s*Port(?P<port>\d+/\d+)\s+\S+\s+Level\s*\S+\s+(?P<op>\S+)\s+(?P<admin>\S+)",
        )
        .expect("Invalid ISIS interface regex"),
    })
}

/// Local interface → adjacent system and adjacency state.
///
/// The neighbour is named by its host name, or by its system id when the
/// host name column is empty.
pub fn parse_isis_adjacencies(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut output = ParsedOutput::new();
    for line in lines {
        let Some(caps) = patterns().adjacency.captures(line) else {
            continue;
        };
        let peer = caps
            .name("host")
            .or_else(|| caps.name("sysid"))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let mut fields = Fields::new();
        fields.insert("ISIS Adjacency".to_string(), Connection::new(peer).into());
        fields.insert("ISIS Status".to_string(), State::new(&caps["state"]).into());
        output.insert(Interface::new(&caps["port"]).into(), fields.into());
    }
    Ok(output)
}

/// Port → operational state of its ISIS circuit, as a bare scalar.
pub fn parse_isis_interface(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut output = ParsedOutput::new();
    for line in lines {
        if let Some(caps) = patterns().interface.captures(line) {
            output.insert(
                Port::new(&caps["port"]).into(),
                ParsedEntry::Scalar(Record::from(State::new(&caps["op"]))),
            );
        }
    }
    Ok(output)
}

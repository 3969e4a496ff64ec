use dynex_core::model::{Fields, FieldValue, Interface, Port, Record, State};
use dynex_core::{ParseError, ParsedOutput, ParserRegistry, SnapshotBuilder, SnapshotTable};

/// Render blocks as tech file text with numbered headers
#[allow(dead_code)]
pub fn tech_text(blocks: &[(&str, &[&str])]) -> String {
    let mut out = String::new();
    for (n, (command, lines)) in blocks.iter().enumerate() {
        out.push_str(&format!("Command:[{}] [ {} ]\n", n + 1, command));
        for line in *lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Write tech file text to a temporary file
#[allow(dead_code)]
pub fn tech_file(text: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

/// `<port> <state>` lines → Port → bare State
#[allow(dead_code)]
pub fn parse_port_state(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut out = ParsedOutput::new();
    for line in lines {
        let mut parts = line.split_whitespace();
        if let (Some(port), Some(state)) = (parts.next(), parts.next()) {
            out.insert(Port::new(port).into(), Record::from(State::new(state)).into());
        }
    }
    Ok(out)
}

/// `<port> <mtu>` lines → Port → {MTU}
#[allow(dead_code)]
pub fn parse_port_mtu(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut out = ParsedOutput::new();
    for line in lines {
        let mut parts = line.split_whitespace();
        if let (Some(port), Some(mtu)) = (parts.next(), parts.next()) {
            let mtu: i64 = mtu
                .parse()
                .map_err(|_| ParseError::new(format!("bad MTU '{}'", mtu)))?;
            let mut fields = Fields::new();
            fields.insert("MTU".to_string(), mtu.into());
            out.insert(Port::new(port).into(), fields.into());
        }
    }
    Ok(out)
}

/// `<interface> <address>` lines → Interface → {IP Address}
#[allow(dead_code)]
pub fn parse_interface_address(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut out = ParsedOutput::new();
    for line in lines {
        let mut parts = line.split_whitespace();
        if let (Some(name), Some(address)) = (parts.next(), parts.next()) {
            let mut fields = Fields::new();
            fields.insert("IP Address".to_string(), address.into());
            out.insert(Interface::new(name).into(), fields.into());
        }
    }
    Ok(out)
}

/// Registry with the three test parsers
#[allow(dead_code)]
pub fn test_registry() -> ParserRegistry {
    ParserRegistry::new()
        .with("show port state", parse_port_state)
        .and_then(|r| r.with("show port mtu", parse_port_mtu))
        .and_then(|r| r.with("show interface address", parse_interface_address))
        .unwrap()
}

/// Build a field mapping from pairs
#[allow(dead_code)]
pub fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Build a snapshot table directly from identity/field pairs
#[allow(dead_code)]
pub fn table(entries: Vec<(Record, Fields)>) -> SnapshotTable {
    let mut builder = SnapshotBuilder::new();
    for (identity, fields) in entries {
        builder.merge_entry(identity, fields.into());
    }
    builder.finish()
}

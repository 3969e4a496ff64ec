//! `show vlan basic`

use regex::Regex;
use std::sync::OnceLock;

use dynex_core::errors::ParseError;
use dynex_core::model::{FieldValue, Fields, Vlan};
use dynex_core::registry::ParsedOutput;

fn vlan_row() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| {
        Regex::new(r"^\s*(?P<id>\d+)\s+(?P<name>\S+)\s+(?P<type>\S+)\s+(?P<mstp>\d+)\b")
            .expect("Invalid VLAN row regex")
    })
}

/// VLAN → type and MSTP instance.
///
/// # Errors
///
/// Returns a `ParseError` when a numeric column overflows.
pub fn parse_vlan_basic(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut output = ParsedOutput::new();
    for line in lines {
        let Some(caps) = vlan_row().captures(line) else {
            continue;
        };
        let id: u32 = caps["id"]
            .parse()
            .map_err(|e| ParseError::new(format!("VLAN id '{}': {}", &caps["id"], e)))?;
        let instance: i64 = caps["mstp"]
            .parse()
            .map_err(|e| ParseError::new(format!("MSTP instance '{}': {}", &caps["mstp"], e)))?;

        let mut fields = Fields::new();
        fields.insert("Type".to_string(), FieldValue::from(&caps["type"]));
        fields.insert("MSTP Instance".to_string(), instance.into());
        output.insert(Vlan::new(id, &caps["name"]).into(), fields.into());
    }
    Ok(output)
}

//! `show ip interface`

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

use dynex_core::errors::ParseError;
use dynex_core::model::{Fields, Interface, Network, Record};
use dynex_core::registry::ParsedOutput;

fn ipv4() -> &'static Regex {
    static IPV4: OnceLock<Regex> = OnceLock::new();
    IPV4.get_or_init(|| {
        Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("Invalid IPv4 regex")
    })
}

/// Interface → address and mask, plus the routed network → interface.
///
/// A row is any line holding an IPv4 address; its first word names the
/// interface and its first two addresses are the address and mask.
///
/// # Errors
///
/// Returns a `ParseError` for a row with an address but no mask.
pub fn parse_ip_interface(lines: &[String]) -> Result<ParsedOutput, ParseError> {
    let mut output = ParsedOutput::new();

    for line in lines {
        let addresses: Vec<&str> = ipv4().find_iter(line).map(|m| m.as_str()).collect();
        let Some(first) = addresses.first() else {
            continue;
        };
        let [address, mask, ..] = addresses.as_slice() else {
            return Err(ParseError::new(format!(
                "IP interface row has address {first} but no mask: '{}'",
                line.trim()
            )));
        };
        let Some(name) = line.split_whitespace().next() else {
            continue;
        };
        let interface = Interface::new(name);

        let mut fields = Fields::new();
        fields.insert("IP Address".to_string(), (*address).into());
        fields.insert("Subnet Mask".to_string(), (*mask).into());
        output.insert(Record::from(interface.clone()), fields.into());

        if let Some(network) = network_of(address, mask) {
            let mut fields = Fields::new();
            fields.insert("Interface".to_string(), interface.into());
            output.insert(network.into(), fields.into());
        }
    }

    Ok(output)
}

/// The network an address belongs to, or `None` if either side is not a
/// valid IPv4 address.
fn network_of(address: &str, mask: &str) -> Option<Network> {
    let address: Ipv4Addr = address.parse().ok()?;
    let mask: Ipv4Addr = mask.parse().ok()?;
    let network = Ipv4Addr::from(u32::from(address) & u32::from(mask));
    Some(Network::new(network.to_string(), mask.to_string()))
}

//! Key-mapping document loading
//!
//! A mapping document names, per kind, which identity of the older snapshot
//! is known by which identity in the newer one. Two layouts are accepted:
//!
//! ```yaml
//! Port:
//!   "1/1": "2/1"          # old token -> new token
//! Vlan:
//!   - old: [20, voice]    # ordered pairs
//!     new: [20, voip]
//! ```
//!
//! A token is a string, an integer, or a list of constructor arguments.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, mapping_validation, Result};
use dynex_core::errors::ExError;
use dynex_core::mapping::KeyMapping;
use dynex_core::model::{Kind, Record};
use dynex_core::{log_op_end, log_op_error, log_op_start};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Document encoding, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    Json,
    Yaml,
}

impl MappingFormat {
    /// Detect the format of a mapping file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any extension other than
    /// `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(MappingFormat::Json),
            Some("yaml") | Some("yml") => Ok(MappingFormat::Yaml),
            _ => Err(mapping_validation(&format!(
                "Unsupported mapping file type '{}': expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
enum TokenScalar {
    Int(i64),
    Text(String),
}

impl TokenScalar {
    fn into_arg(self) -> String {
        match self {
            TokenScalar::Int(n) => n.to_string(),
            TokenScalar::Text(s) => s,
        }
    }
}

/// One identity as written in a document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Token {
    Scalar(TokenScalar),
    List(Vec<TokenScalar>),
}

impl Token {
    fn into_args(self) -> Vec<String> {
        match self {
            Token::Scalar(s) => vec![s.into_arg()],
            Token::List(items) => items.into_iter().map(TokenScalar::into_arg).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PairDoc {
    old: Token,
    #[serde(default)]
    new: Option<Token>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KindEntries {
    Pairs(Vec<PairDoc>),
    Table(IndexMap<TokenScalar, Option<Token>>),
}

impl KindEntries {
    fn into_pairs(self) -> Vec<(Token, Option<Token>)> {
        match self {
            KindEntries::Pairs(pairs) => pairs.into_iter().map(|p| (p.old, p.new)).collect(),
            KindEntries::Table(table) => table
                .into_iter()
                .map(|(old, new)| (Token::Scalar(old), new))
                .collect(),
        }
    }
}

type MappingDoc = IndexMap<String, KindEntries>;

/// Load a key mapping from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
///
/// - `InvalidInput` for an unsupported extension or malformed document
/// - `Io` if the file cannot be read
/// - `UnknownKind`, `InvalidToken`, `KindMismatch`, `DuplicateMapping` for
///   entries that do not describe a valid mapping
pub fn load_mapping(path: &Path) -> Result<KeyMapping> {
    let path_display = path.display().to_string();
    log_op_start!("load_mapping", path = %path_display);
    let start = Instant::now();

    let mapping = read_mapping(path).map_err(|e| {
        log_op_error!(
            "load_mapping",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path_display
        );
        e
    })?;

    log_op_end!(
        "load_mapping",
        duration_ms = start.elapsed().as_millis() as u64,
        pair_count = mapping.len()
    );

    Ok(mapping)
}

fn read_mapping(path: &Path) -> Result<KeyMapping> {
    let format = MappingFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| io_error("load_mapping", e))?;
    parse_mapping_str(&content, format)
}

/// Parse a mapping document held in memory.
///
/// # Errors
///
/// Same as [`load_mapping`], minus the file errors.
pub fn parse_mapping_str(content: &str, format: MappingFormat) -> Result<KeyMapping> {
    let doc: MappingDoc = match format {
        MappingFormat::Json => serde_json::from_str(content)
            .map_err(|e| mapping_validation(&format!("Failed to parse JSON mapping: {}", e)))?,
        MappingFormat::Yaml => {
            if content.trim().is_empty() {
                MappingDoc::new()
            } else {
                serde_yaml::from_str(content).map_err(|e| {
                    mapping_validation(&format!("Failed to parse YAML mapping: {}", e))
                })?
            }
        }
    };

    build_mapping(doc)
}

fn build_mapping(doc: MappingDoc) -> Result<KeyMapping> {
    let mut mapping = KeyMapping::new();
    for (kind_name, entries) in doc {
        let kind: Kind = kind_name.parse()?;
        for (old, new) in entries.into_pairs() {
            let old = to_record(kind, old)?;
            let new = new.map(|token| to_record(kind, token)).transpose()?;
            mapping
                .insert(old, new)
                .map_err(|e| ExError::from(e).with_op("load_mapping"))?;
        }
    }
    Ok(mapping)
}

fn to_record(kind: Kind, token: Token) -> Result<Record> {
    let args = token.into_args();
    Record::from_args(kind, &args).map_err(|e| ExError::from(e).with_op("load_mapping"))
}

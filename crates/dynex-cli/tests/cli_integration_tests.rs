//! CLI integration tests
//!
//! Run the built `dynex` binary against tech files in a temporary directory.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ISIS_INTERFACE: &str = "\
IFIDX            TYPE   LEVEL   OP-STATE  ADM-STATE   ADJ   UP-ADJ  SPBM-L1-METRIC
--------------------------------------------------------------------------------
Port1/1          pt-pt  Level 1  UP       UP          1     1       10
Port1/2          pt-pt  Level 1  DOWN     UP          0     0       10
";

const VLAN_BASIC: &str = "\
ID    NAME             TYPE              INST_ID  PROTOCOLID   SUBNETADDR
--------------------------------------------------------------------------------
10    users            byPort            0        none         N/A
";

fn tech_text(sections: &[(&str, &str)]) -> String {
    let mut out = String::from("# tech file\n");
    for (n, (command, output)) in sections.iter().enumerate() {
        out.push_str(&format!("Command:[{}] [ {} ]\n", n + 1, command));
        out.push_str(output);
    }
    out
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dynex"))
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_analyze_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tech.txt",
        &tech_text(&[("show isis interface", ISIS_INTERFACE)]),
    );

    let output = run(&dir, &["analyze", "tech.txt", "--commands"]);

    assert!(
        output.status.success(),
        "analyze should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Port: 2"));
    assert!(stdout.contains("show isis interface"));

    let snapshot = read_json(&dir.path().join("snapshot.json"));
    assert_eq!(snapshot["Port"]["1/1"]["State"], "UP");
    assert_eq!(snapshot["Port"]["1/2"]["State"], "DOWN");
}

#[test]
fn test_compare_writes_delta_and_summary() {
    let dir = TempDir::new().unwrap();
    let old = tech_text(&[("show isis interface", ISIS_INTERFACE)]);
    let new = old.replace("DOWN     UP", "UP       UP");
    write(dir.path(), "old.txt", &old);
    write(dir.path(), "new.txt", &new);

    let output = run(&dir, &["compare", "old.txt", "new.txt", "-o", "out", "--summary"]);

    assert!(
        output.status.success(),
        "compare should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## Snapshot Diff"));
    assert!(stdout.contains("changes: 1"));

    let delta = read_json(&dir.path().join("out").join("delta.json"));
    assert_eq!(delta["Port"]["1/2"]["State"]["old"], "DOWN");
    assert_eq!(delta["Port"]["1/2"]["State"]["new"], "UP");
    assert!(delta["Port"].get("1/1").is_none());
}

#[test]
fn test_compare_with_mapping_document() {
    let dir = TempDir::new().unwrap();
    let old = tech_text(&[("show isis interface", ISIS_INTERFACE)]);
    let new = old.replace("Port1/1 ", "Port2/1 ");
    write(dir.path(), "old.txt", &old);
    write(dir.path(), "new.txt", &new);
    write(dir.path(), "mapping.yaml", "Port:\n  \"1/1\": \"2/1\"\n");

    let output = run(
        &dir,
        &["compare", "old.txt", "new.txt", "--mapping", "mapping.yaml"],
    );

    assert!(
        output.status.success(),
        "compare should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("changes: 0"));
}

#[test]
fn test_compare_fails_on_missing_kind() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "old.txt",
        &tech_text(&[
            ("show isis interface", ISIS_INTERFACE),
            ("show vlan basic", VLAN_BASIC),
        ]),
    );
    write(
        dir.path(),
        "new.txt",
        &tech_text(&[("show isis interface", ISIS_INTERFACE)]),
    );

    let output = run(&dir, &["compare", "old.txt", "new.txt"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_MISSING_KIND]"));
    assert!(!dir.path().join("delta.json").exists());
}

#[test]
fn test_compare_rejects_unsupported_mapping_file() {
    let dir = TempDir::new().unwrap();
    let text = tech_text(&[("show isis interface", ISIS_INTERFACE)]);
    write(dir.path(), "old.txt", &text);
    write(dir.path(), "new.txt", &text);
    write(dir.path(), "mapping.txt", "Port: {}\n");

    let output = run(&dir, &["compare", "old.txt", "new.txt", "-m", "mapping.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_commands_lists_registered_parsers() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["commands"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "show vlan basic"));
    assert!(stdout.lines().any(|l| l == "show lldp neighbor"));
}

#[test]
fn test_discard_trailing_flag_drops_last_block() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tech.txt",
        &tech_text(&[("show isis interface", ISIS_INTERFACE)]),
    );

    let output = run(&dir, &["--discard-trailing", "analyze", "tech.txt"]);

    assert!(output.status.success());
    let snapshot = read_json(&dir.path().join("snapshot.json"));
    assert_eq!(snapshot, serde_json::json!({}));
}

//! End-to-end tests for the `oxihuff` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn oxihuff(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oxihuff"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run oxihuff")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_compress_decompress_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let data = b"to be or not to be, that is the question\n".repeat(20);
    fs::write(dir.path().join("in.txt"), &data).unwrap();

    let out = oxihuff(&["compress", "in.txt", "in.huff"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("Compressed in.txt -> in.huff"));

    let out = oxihuff(&["decompress", "in.huff", "out.txt"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("out.txt")).unwrap(), data);
}

#[test]
fn test_compress_json_stats() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"aaaa").unwrap();

    let out = oxihuff(&["compress", "in.txt", "in.huff", "--json", "--stats"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["original_size"], 4);
    assert_eq!(json["padding"], 4);
    assert_eq!(json["distinct_symbols"], 1);
    assert_eq!(json["codes"][0]["symbol"], 97);
    assert_eq!(json["codes"][0]["code"], "0");
}

#[test]
fn test_empty_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.txt"), b"").unwrap();

    let out = oxihuff(&["compress", "empty.txt", "empty.huff"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("Error: "));
    assert!(!dir.path().join("empty.huff").exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let out = oxihuff(&["decompress", "nope.huff", "nope.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("File not found"));
}

#[test]
fn test_existing_output_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"hello").unwrap();
    fs::write(dir.path().join("in.huff"), b"keep me").unwrap();

    // No terminal to confirm on, so the prompt fails and nothing is written.
    let out = oxihuff(&["compress", "in.txt", "in.huff"], dir.path());
    assert!(!out.status.success());
    assert_eq!(fs::read(dir.path().join("in.huff")).unwrap(), b"keep me");

    let out = oxihuff(&["compress", "in.txt", "in.huff", "--force"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    assert_ne!(fs::read(dir.path().join("in.huff")).unwrap(), b"keep me");
}

#[test]
fn test_lenient_decompress() {
    let dir = tempfile::tempdir().unwrap();
    // Codes a=00 b=01 c=1; body "1 00 0" stops mid-code.
    fs::write(dir.path().join("cut.huff"), b"97:1;98:2;99:4;\n4\n\x80").unwrap();

    let out = oxihuff(&["decompress", "cut.huff", "strict.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Truncated stream"));
    assert!(!dir.path().join("strict.txt").exists());

    let out = oxihuff(&["decompress", "cut.huff", "lenient.txt", "--lenient"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("lenient.txt")).unwrap(), b"ca");
}

#[test]
fn test_codes_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"a b\n\n").unwrap();

    let out = oxihuff(&["codes", "in.txt", "--tree"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("[NL]"));
    assert!(text.contains("[SP]"));
    assert!(text.contains("Huffman Tree Structure:"));
    assert!(text.contains("root-> Internal [weight: 5]"));
}

#[test]
fn test_inspect_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"cabcbcc").unwrap();

    let out = oxihuff(&["compress", "in.txt", "in.huff"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));

    let out = oxihuff(&["inspect", "in.huff", "--json"], dir.path());
    assert!(out.status.success(), "{}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["original_size"], 7);
    assert_eq!(json["header_size"], 18);
    assert_eq!(json["body_size"], 2);
    assert_eq!(json["consistent"], true);
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = oxihuff(&["completions", "bash"], dir.path());
    assert!(out.status.success());
    assert!(stdout(&out).contains("oxihuff"));
}

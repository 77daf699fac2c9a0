//! Utility functions for the CLI.

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use oxihuff_codec::{CodeTable, FrequencyTable, Node};
use std::path::Path;
use std::time::Duration;

/// Create a spinner with standard styling.
///
/// Encoding reads its input twice, so a byte-count bar would run past its
/// end; a spinner with the elapsed time is shown instead.
pub fn create_spinner(message: &str, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner:.cyan} {msg}")
            .expect("progress bar template is valid")
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Ask before replacing an existing `path`, unless `force` is set.
///
/// Returns `Ok(false)` when the user declines.
pub fn confirm_overwrite(path: &Path, force: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if force || !path.exists() {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| format!("{} (use --force to overwrite without asking)", e).into())
}

/// Render a symbol for tables: whitespace gets a tag, other non-printable
/// bytes are shown in hex.
pub fn fmt_symbol(symbol: u8) -> String {
    match symbol {
        b'\n' => "[NL]".to_string(),
        b' ' => "[SP]".to_string(),
        b'\t' => "[TAB]".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => format!("0x{:02X}", s),
    }
}

/// Parse a symbol typed by the user: a single printable character, a tag
/// such as `[SP]`, or a hex byte such as `0x0A`.
pub fn parse_symbol(text: &str) -> Option<u8> {
    match text {
        "[NL]" => return Some(b'\n'),
        "[SP]" => return Some(b' '),
        "[TAB]" => return Some(b'\t'),
        _ => {}
    }

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .filter(|hex| !hex.is_empty())
    {
        return u8::from_str_radix(hex, 16).ok();
    }

    match text.as_bytes() {
        [byte] => Some(*byte),
        _ => None,
    }
}

/// Print the frequency and code of every symbol as a table.
pub fn print_code_table(frequencies: &FrequencyTable, codes: &CodeTable) {
    let width = codes.max_len().max(4);

    println!("{:<6}  {:>10}  {:<width$}", "Symbol", "Count", "Code", width = width);
    println!("{}", "-".repeat(6 + 2 + 10 + 2 + width));

    for (symbol, count) in frequencies.iter() {
        let code = codes
            .get(symbol)
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!(
            "{:<6}  {:>10}  {:<width$}",
            fmt_symbol(symbol),
            count,
            code,
            width = width
        );
    }

    println!("{}", "-".repeat(6 + 2 + 10 + 2 + width));
    println!(
        "{:<6}  {:>10}  {} symbols",
        "Total",
        frequencies.total(),
        frequencies.len()
    );
}

/// Print the tree structure, one node per line, children indented.
pub fn print_tree(root: &Node) {
    println!("Huffman Tree Structure:");
    print_node(root, 0, "root");
}

fn print_node(node: &Node, depth: usize, label: &str) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Leaf { symbol, weight } => {
            println!(
                "{}{}-> Leaf: {} [weight: {}]",
                indent,
                label,
                fmt_symbol(*symbol),
                weight
            );
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            println!("{}{}-> Internal [weight: {}]", indent, label, weight);
            print_node(left, depth + 1, "L");
            print_node(right, depth + 1, "R");
        }
    }
}

/// Format a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

//! Inspect command implementation.

use crate::utils::{fmt_symbol, format_size};
use oxihuff_codec::{Header, HuffmanTree, open_source};
use serde::Serialize;
use std::io::{self, BufReader};
use std::path::Path;

/// JSON output for a compressed file summary.
#[derive(Debug, Serialize)]
struct InspectJson {
    file: String,
    file_size: u64,
    header_size: u64,
    body_size: u64,
    padding: u8,
    original_size: u64,
    distinct_symbols: usize,
    max_code_len: usize,
    expected_body_bits: u64,
    actual_body_bits: u64,
    consistent: bool,
}

pub fn cmd_inspect(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let handle = open_source(file)?;
    let file_size = handle.metadata()?.len();
    let mut reader = BufReader::new(handle);

    let header = Header::read_from(&mut reader)?;
    let body_size = io::copy(&mut reader, &mut io::sink())?;

    let tree = HuffmanTree::build(&header.frequencies)?;
    let codes = tree.derive_codes();
    let expected_bits = codes.encoded_bit_len(&header.frequencies);
    let actual_bits = (body_size * 8).saturating_sub(header.padding as u64);

    if json {
        let output = InspectJson {
            file: file.display().to_string(),
            file_size,
            header_size: header.encoded_len() as u64,
            body_size,
            padding: header.padding,
            original_size: header.frequencies.total(),
            distinct_symbols: header.frequencies.len(),
            max_code_len: tree.depth(),
            expected_body_bits: expected_bits,
            actual_body_bits: actual_bits,
            consistent: expected_bits == actual_bits,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Compressed File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", file_size);

    println!();
    println!("Header:");
    println!("  Header size: {} bytes", header.encoded_len());
    println!("  Distinct symbols: {}", header.frequencies.len());
    println!(
        "  Original size: {}",
        format_size(header.frequencies.total())
    );
    println!("  Padding: {} bits", header.padding);

    if let Some((symbol, count)) = header
        .frequencies
        .iter()
        .max_by_key(|&(symbol, count)| (count, std::cmp::Reverse(symbol)))
    {
        println!("  Most frequent: {} ({} times)", fmt_symbol(symbol), count);
    }

    println!();
    println!("Body:");
    println!("  Body size: {} bytes", body_size);
    println!("  Longest code: {} bits", tree.depth());
    println!("  Expected bits: {}", expected_bits);
    println!("  Actual bits: {}", actual_bits);
    if expected_bits == actual_bits {
        println!("  Status: consistent");
    } else {
        println!("  Status: MISMATCH (stream is damaged or truncated)");
    }

    if header.frequencies.total() > 0 {
        println!(
            "  Compression ratio: {:.1}%",
            (1.0 - file_size as f64 / header.frequencies.total() as f64) * 100.0
        );
    }

    Ok(())
}

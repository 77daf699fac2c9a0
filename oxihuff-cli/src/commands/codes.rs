//! Codes command implementation.

use super::compress::{SymbolJson, symbols_json};
use crate::utils::{print_code_table, print_tree};
use oxihuff_codec::{CodecConfig, FrequencyTable, HuffmanTree, open_source};
use serde::Serialize;
use std::io::BufReader;
use std::path::Path;

/// JSON output for a code table.
#[derive(Debug, Serialize)]
struct CodesJson {
    file: String,
    total_symbols: u64,
    distinct_symbols: usize,
    max_code_len: usize,
    encoded_bits: u64,
    codes: Vec<SymbolJson>,
}

pub fn cmd_codes(input: &Path, json: bool, tree: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(open_source(input)?);
    let frequencies = FrequencyTable::from_reader(&mut reader, CodecConfig::DEFAULT_BUFFER_SIZE)?;

    let huffman = HuffmanTree::build(&frequencies)?;
    let codes = huffman.derive_codes();

    if json {
        let output = CodesJson {
            file: input.display().to_string(),
            total_symbols: frequencies.total(),
            distinct_symbols: frequencies.len(),
            max_code_len: huffman.depth(),
            encoded_bits: codes.encoded_bit_len(&frequencies),
            codes: symbols_json(&frequencies, &codes),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Huffman Codes");
    println!("=============");
    println!("File: {}", input.display());
    println!();

    print_code_table(&frequencies, &codes);

    println!();
    println!("Longest code: {} bits", huffman.depth());
    println!("Encoded body: {} bits", codes.encoded_bit_len(&frequencies));

    if tree {
        println!();
        print_tree(huffman.root());
    }

    Ok(())
}

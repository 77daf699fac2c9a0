//! Compress command implementation.

use crate::utils::{confirm_overwrite, create_spinner, format_size, print_code_table};
use oxihuff_codec::{CodeTable, CodecConfig, FrequencyTable, compress_file};
use serde::Serialize;
use std::path::Path;

/// Options for the compress command.
pub struct CompressOptions {
    pub verbose: bool,
    pub stats: bool,
    pub json: bool,
    pub force: bool,
}

/// JSON serializable code table entry.
#[derive(Debug, Serialize)]
pub struct SymbolJson {
    pub symbol: u8,
    pub count: u64,
    pub code: String,
}

/// JSON output for a compression run.
#[derive(Debug, Serialize)]
struct CompressJson {
    input: String,
    output: String,
    original_size: u64,
    header_size: u64,
    body_size: u64,
    compressed_size: u64,
    padding: u8,
    distinct_symbols: usize,
    ratio: f64,
    average_code_len: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<SymbolJson>>,
}

/// Build JSON code table entries in ascending symbol order.
pub fn symbols_json(frequencies: &FrequencyTable, codes: &CodeTable) -> Vec<SymbolJson> {
    frequencies
        .iter()
        .map(|(symbol, count)| SymbolJson {
            symbol,
            count,
            code: codes
                .get(symbol)
                .map(|code| code.to_string())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn cmd_compress(
    input: &Path,
    output: &Path,
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !confirm_overwrite(output, options.force)? {
        println!("Skipped: {}", output.display());
        return Ok(());
    }

    let pb = create_spinner(&format!("Compressing {}", input.display()), !options.json);
    let result = compress_file(input, output, &CodecConfig::default());
    pb.finish_and_clear();
    let stats = result?;

    if options.json {
        let json = CompressJson {
            input: input.display().to_string(),
            output: output.display().to_string(),
            original_size: stats.original_size,
            header_size: stats.header_size,
            body_size: stats.body_size,
            compressed_size: stats.compressed_size(),
            padding: stats.padding,
            distinct_symbols: stats.distinct_symbols(),
            ratio: stats.compression_ratio(),
            average_code_len: stats.average_code_len(),
            codes: options
                .stats
                .then(|| symbols_json(&stats.frequencies, &stats.codes)),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if options.stats {
        print_code_table(&stats.frequencies, &stats.codes);
        println!();
    }

    if options.verbose || options.stats {
        println!("Original size:   {}", format_size(stats.original_size));
        println!(
            "Compressed size: {} (header {}, body {})",
            format_size(stats.compressed_size()),
            format_size(stats.header_size),
            format_size(stats.body_size)
        );
        println!("Padding:         {} bits", stats.padding);
        println!("Average code:    {:.3} bits/symbol", stats.average_code_len());
        println!("Space savings:   {:.1}%", stats.space_savings());
    }

    println!(
        "Compressed {} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        stats.original_size,
        stats.compressed_size()
    );

    Ok(())
}

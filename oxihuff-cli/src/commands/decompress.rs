//! Decompress command implementation.

use crate::utils::{confirm_overwrite, create_spinner, format_size};
use oxihuff_codec::{CodecConfig, decompress_file};
use std::path::Path;

/// Options for the decompress command.
pub struct DecompressOptions {
    pub verbose: bool,
    pub force: bool,
    pub lenient: bool,
}

pub fn cmd_decompress(
    input: &Path,
    output: &Path,
    options: &DecompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !confirm_overwrite(output, options.force)? {
        println!("Skipped: {}", output.display());
        return Ok(());
    }

    let config = if options.lenient {
        CodecConfig::LENIENT
    } else {
        CodecConfig::STRICT
    };

    let pb = create_spinner(&format!("Decompressing {}", input.display()), true);
    let result = decompress_file(input, output, &config);
    pb.finish_and_clear();
    let written = result?;

    if options.verbose {
        let compressed = std::fs::metadata(input)?.len();
        println!("Compressed size:   {}", format_size(compressed));
        println!("Decompressed size: {}", format_size(written));
        println!(
            "Mode:              {}",
            if config.strict { "strict" } else { "lenient" }
        );
    }

    println!(
        "Decompressed {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        written
    );

    Ok(())
}

//! OxiHuff CLI - The Oxidized Huffman coder
//!
//! A Pure Rust static Huffman compressor with code table display and an
//! interactive priority queue playground.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{
    CompressOptions, DecompressOptions, cmd_codes, cmd_compress, cmd_decompress, cmd_inspect,
    cmd_playground,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "The Oxidized Huffman coder - Pure Rust Huffman compression"
)]
#[command(long_about = "
OxiHuff compresses files with static Huffman coding. The output starts with
a text header holding the symbol frequencies, from which the decoder rebuilds
the exact tree the encoder used.

Examples:
  oxihuff compress notes.txt notes.huff
  oxihuff compress notes.txt notes.huff --stats
  oxihuff decompress notes.huff notes.txt
  oxihuff decompress damaged.huff partial.txt --lenient
  oxihuff codes notes.txt --tree
  oxihuff inspect notes.huff --json
  oxihuff playground
  oxihuff completions bash > oxihuff.bash
")]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Compressed output file
        output: PathBuf,

        /// Print the code table and size breakdown
        #[arg(short, long)]
        stats: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Overwrite the output without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Decompressed output file
        output: PathBuf,

        /// Overwrite the output without asking
        #[arg(short, long)]
        force: bool,

        /// Recover what is readable from a damaged stream instead of failing
        #[arg(short, long)]
        lenient: bool,
    },

    /// Show the frequency and code table of a file
    Codes {
        /// File to analyze
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Also print the tree structure
        #[arg(short, long)]
        tree: bool,
    },

    /// Show information about a compressed file
    #[command(alias = "i")]
    Inspect {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Experiment with the priority queue interactively
    Playground,

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            stats,
            json,
            force,
        } => cmd_compress(
            &input,
            &output,
            &CompressOptions {
                verbose: cli.verbose,
                stats,
                json,
                force,
            },
        ),
        Commands::Decompress {
            input,
            output,
            force,
            lenient,
        } => cmd_decompress(
            &input,
            &output,
            &DecompressOptions {
                verbose: cli.verbose,
                force,
                lenient,
            },
        ),
        Commands::Codes { input, json, tree } => cmd_codes(&input, json, tree),
        Commands::Inspect { file, json } => cmd_inspect(&file, json),
        Commands::Playground => cmd_playground(),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "oxihuff", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress() {
        let cli = Cli::try_parse_from(["oxihuff", "compress", "a.txt", "a.huff", "-v", "--stats"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Compress {
                input,
                output,
                stats,
                json,
                force,
            } => {
                assert_eq!(input, PathBuf::from("a.txt"));
                assert_eq!(output, PathBuf::from("a.huff"));
                assert!(stats);
                assert!(!json);
                assert!(!force);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_parse_decompress_lenient() {
        let cli = Cli::try_parse_from(["oxihuff", "d", "a.huff", "a.txt", "--lenient", "-f"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Decompress {
                lenient: true,
                force: true,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["oxihuff", "compress", "a.txt"]).is_err());
    }
}

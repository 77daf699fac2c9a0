//! # OxiHuff-Codec: Pure Rust Static Huffman Compression
//!
//! This crate builds a Huffman tree from the byte frequencies of its input,
//! packs the resulting variable-length codes MSB-first and prefixes the body
//! with a small text header from which the decoder rebuilds the same tree.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Deterministic trees**: Ties are resolved by insertion order, so the
//!   decoder always rebuilds the encoder's tree
//! - **Bounded memory**: File and stream entry points work in fixed chunks
//! - **Strict or lenient decoding**: Damaged streams are errors by default,
//!   or decoded as far as possible
//!
//! ## Persisted Format
//!
//! ```text
//! 97:4;98:1;\n      frequency table, ascending by symbol
//! 3\n               padding bits in the final body byte
//! <body>            packed codes, MSB first
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress, decompress};
//!
//! let original = b"abracadabra";
//!
//! let compressed = compress(original).unwrap();
//! assert!(compressed.starts_with(b"97:5;98:2;99:1;100:1;114:2;\n"));
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Building Blocks
//!
//! The pieces behind [`compress`] are public and can be used directly:
//!
//! ```rust
//! use oxihuff_codec::{FrequencyTable, HuffmanTree};
//!
//! let freq = FrequencyTable::from_bytes(b"aaaa");
//! let codes = HuffmanTree::build(&freq).unwrap().derive_codes();
//!
//! // A lone symbol still gets a one-bit code.
//! assert_eq!(codes.get(b'a').unwrap().to_string(), "0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod config;
mod decoder;
mod encoder;
mod file;
mod frequency;
mod header;
mod heap;
mod node;
mod tree;

pub use codes::{Code, CodeTable};
pub use config::CodecConfig;
pub use decoder::HuffDecoder;
pub use encoder::{CompressionStats, HuffEncoder};
pub use file::{compress_file, decompress_file, open_source};
pub use frequency::FrequencyTable;
pub use header::{Header, MAX_HEADER_LINE};
pub use heap::PriorityQueue;
pub use node::Node;
pub use oxihuff_core::{HuffError, Result};
pub use tree::{HuffmanTree, TreeWalker};

/// Compress data with the default (strict) configuration.
///
/// # Errors
///
/// Returns [`HuffError::EmptyInput`] for zero-length input.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, CodecConfig::default())
}

/// Compress data with the given configuration.
pub fn compress_with(data: &[u8], config: CodecConfig) -> Result<Vec<u8>> {
    HuffEncoder::new(config).encode(data)
}

/// Decompress data with the default (strict) configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{HuffError, decompress};
///
/// let err = decompress(b"97:4;\n9\n\x00").unwrap_err();
/// assert!(matches!(err, HuffError::CorruptHeader { .. }));
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, CodecConfig::default())
}

/// Decompress data with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{CodecConfig, decompress_with};
///
/// // The last "1" bit has no leaf to reach.
/// let damaged = b"97:4;\n4\n\x10";
/// assert!(decompress_with(damaged, CodecConfig::STRICT).is_err());
/// assert_eq!(decompress_with(damaged, CodecConfig::LENIENT).unwrap(), b"aaa");
/// ```
pub fn decompress_with(data: &[u8], config: CodecConfig) -> Result<Vec<u8>> {
    HuffDecoder::new(config).decode(data)
}

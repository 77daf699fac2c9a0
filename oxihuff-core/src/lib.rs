//! # OxiHuff Core
//!
//! Core components for the OxiHuff compressor.
//!
//! This crate provides the building blocks shared by the Huffman codec and
//! the command-line front end:
//!
//! - [`bitstream`]: bit packing with padding accounting, plus MSB-first
//!   streaming bit I/O
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is layered the same way as a classic archiver stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     CLI, code table display, queue playground           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Priority queue, Huffman tree, persisted format      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     pack/unpack, BitWriter, PaddedBitReader, errors     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitWriter, PaddedBitReader};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(&[true, true, false, true, false]).unwrap();
//! let (bytes, padding) = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b1101_0000]);
//! assert_eq!(padding, 3);
//!
//! let mut reader = PaddedBitReader::new(Cursor::new(bytes), padding);
//! let mut count = 0;
//! while reader.next_bit().unwrap().is_some() {
//!     count += 1;
//! }
//! assert_eq!(count, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitWriter, PackedStream, PaddedBitReader, pack, unpack};
pub use error::{HuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitWriter, PackedStream, PaddedBitReader};
    pub use crate::error::{HuffError, Result};
}

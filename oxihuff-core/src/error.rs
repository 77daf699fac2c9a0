//! Error types for OxiHuff operations.
//!
//! Every failure in the codec is terminal for the operation that raised it.
//! Huffman coding has no transient failure modes, so nothing here is retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding was requested for zero-length input.
    #[error("Empty input: nothing to compress")]
    EmptyInput,

    /// Extraction from an empty priority queue.
    #[error("Priority queue is empty")]
    EmptyQueue,

    /// The persisted header could not be parsed.
    #[error("Corrupt header: {message}")]
    CorruptHeader {
        /// Description of the header error.
        message: String,
    },

    /// The padding count cannot be applied to the packed stream.
    #[error("Invalid padding: {padding} bits requested, {available} bits available")]
    InvalidPadding {
        /// Padding bit count from the header.
        padding: u8,
        /// Number of bits actually present.
        available: u64,
    },

    /// The bit stream ended before every symbol counted in the header was
    /// decoded, either mid-code or on a code boundary.
    #[error("Truncated stream: input ended after {bit_position} bits")]
    TruncatedStream {
        /// Number of bits consumed when the stream ran out.
        bit_position: u64,
    },

    /// A bit led the tree walk off the tree.
    #[error("Invalid code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position of the offending bit.
        bit_position: u64,
    },

    /// Bits remain after every symbol counted in the header was decoded.
    #[error("Trailing data: {symbols} symbols decoded after {bit_position} bits, more bits follow")]
    TrailingData {
        /// Symbol total from the header.
        symbols: u64,
        /// Bits consumed when the last expected symbol was decoded.
        bit_position: u64,
    },

    /// Source file could not be opened.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path of the missing file.
        path: PathBuf,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create a corrupt header error.
    pub fn corrupt_header(message: impl Into<String>) -> Self {
        Self::CorruptHeader {
            message: message.into(),
        }
    }

    /// Create an invalid padding error.
    pub fn invalid_padding(padding: u8, available: u64) -> Self {
        Self::InvalidPadding { padding, available }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedStream { bit_position }
    }

    /// Create an invalid code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create a trailing data error.
    pub fn trailing_data(symbols: u64, bit_position: u64) -> Self {
        Self::TrailingData {
            symbols,
            bit_position,
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error means the compressed input is damaged.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::CorruptHeader { .. }
                | Self::InvalidPadding { .. }
                | Self::TruncatedStream { .. }
                | Self::InvalidCode { .. }
                | Self::TrailingData { .. }
        )
    }
}

//! Codec configuration (strict vs reference-compatible decoding).

/// Huffman codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Chunk size in bytes for scanning and encoding readers.
    pub buffer_size: usize,
    /// Whether damaged streams are reported as errors.
    ///
    /// When `false`, decoding behaves like the original command-line tool:
    /// a trailing partial code is dropped, excess padding yields no bits and
    /// a bit that leads off the tree ends decoding.
    pub strict: bool,
}

impl CodecConfig {
    /// Default chunk size (64 KiB).
    pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

    /// Strict configuration (the default).
    ///
    /// - 64 KiB chunks
    /// - `TruncatedStream`, `InvalidPadding` and `InvalidCode` are raised
    pub const STRICT: Self = Self {
        buffer_size: Self::DEFAULT_BUFFER_SIZE,
        strict: true,
    };

    /// Reference-compatible configuration.
    ///
    /// - 64 KiB chunks
    /// - Damaged trailing data is silently dropped
    pub const LENIENT: Self = Self {
        buffer_size: Self::DEFAULT_BUFFER_SIZE,
        strict: false,
    };

    /// Create a strict configuration with the given chunk size.
    pub fn new(buffer_size: usize) -> Self {
        Self::STRICT.with_buffer_size(buffer_size)
    }

    /// Set the chunk size. Zero is raised to one byte.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Set strict or lenient decoding.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::STRICT
    }
}

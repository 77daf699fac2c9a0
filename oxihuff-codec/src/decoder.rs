//! Huffman decoder (decompression).
//!
//! Decoding rebuilds the tree from the header's frequency table and walks it
//! bit by bit. In strict mode every form of damage is an error, including a
//! body that stops short of, or runs past, the symbol total in the header,
//! even when the cut falls on a code boundary. In lenient
//! mode the decoder returns whatever complete symbols it recovered before
//! the damage, matching the behaviour of the original command-line tool.

use crate::config::CodecConfig;
use crate::header::Header;
use crate::tree::HuffmanTree;
use oxihuff_core::bitstream::{PaddedBitReader, unpack};
use oxihuff_core::{HuffError, Result};
use std::io::{BufRead, Read, Write};

/// Huffman decoder for decompression.
#[derive(Debug, Clone, Default)]
pub struct HuffDecoder {
    config: CodecConfig,
}

impl HuffDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decompress data in the persisted format.
    ///
    /// # Errors
    ///
    /// - [`HuffError::CorruptHeader`] for a malformed header
    /// - [`HuffError::InvalidPadding`] when the body cannot hold the padding
    /// - [`HuffError::TruncatedStream`] when the body ends before the header's
    ///   symbol total is reached
    /// - [`HuffError::TrailingData`] when bits follow the last expected symbol
    /// - [`HuffError::InvalidCode`] when a bit leads off the tree
    ///
    /// Only the header error is raised in lenient mode.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let (header, offset) = Header::parse(input)?;
        let body = &input[offset..];
        let tree = HuffmanTree::build(&header.frequencies)?;

        let bits = match unpack(body, header.padding) {
            Ok(bits) => bits,
            Err(e @ HuffError::InvalidPadding { .. }) if !self.config.strict => {
                log::warn!("{}; decoding an empty body", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        // Every symbol takes at least one bit.
        let capacity = header.frequencies.total().min(bits.len() as u64) as usize;
        let mut output = Vec::with_capacity(capacity);
        let expected = header.frequencies.total();
        self.walk(&tree, expected, bits.into_iter().map(Ok), |symbol| {
            output.push(symbol);
            Ok(())
        })?;

        Ok(output)
    }

    /// Decompress from `reader` into `writer`, returning the number of bytes
    /// written.
    ///
    /// The header is read line by line with a length cap and the body is
    /// consumed in chunks, so memory use does not grow with the input.
    pub fn decode_stream<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<u64>
    where
        R: BufRead,
        W: Write,
    {
        let header = Header::read_from(reader)?;
        self.decode_body(&header, reader, writer)
    }

    /// Decompress a body whose header has already been read.
    pub fn decode_body<R, W>(&self, header: &Header, reader: R, writer: &mut W) -> Result<u64>
    where
        R: Read,
        W: Write,
    {
        let tree = HuffmanTree::build(&header.frequencies)?;
        let mut bit_reader = PaddedBitReader::new(reader, header.padding);
        let bits = std::iter::from_fn(|| bit_reader.next_bit().transpose());

        let chunk_size = self.config.buffer_size.max(1);
        let mut chunk = Vec::with_capacity(chunk_size);
        let expected = header.frequencies.total();
        let written = self.walk(&tree, expected, bits, |symbol| {
            chunk.push(symbol);
            if chunk.len() == chunk_size {
                writer.write_all(&chunk)?;
                chunk.clear();
            }
            Ok(())
        })?;

        writer.write_all(&chunk)?;
        writer.flush()?;
        Ok(written)
    }

    /// Walk the tree over `bits`, handing each decoded symbol to `emit`.
    ///
    /// Strict mode also holds the walk to exactly `expected` symbols.
    fn walk<I, F>(&self, tree: &HuffmanTree, expected: u64, bits: I, mut emit: F) -> Result<u64>
    where
        I: Iterator<Item = Result<bool>>,
        F: FnMut(u8) -> Result<()>,
    {
        let strict = self.config.strict;
        let mut walker = tree.walker();
        let mut decoded = 0u64;

        for bit in bits {
            let bit = match bit {
                Ok(bit) => bit,
                Err(e @ HuffError::InvalidPadding { .. }) if !strict => {
                    log::warn!("{}; stopping", e);
                    break;
                }
                Err(e) => return Err(e),
            };

            if strict && decoded == expected {
                return Err(HuffError::trailing_data(expected, walker.bit_position()));
            }

            match walker.step(bit) {
                Ok(Some(symbol)) => {
                    emit(symbol)?;
                    decoded += 1;
                }
                Ok(None) => {}
                Err(e) if !strict => {
                    log::warn!("{}; stopping after {} symbols", e, decoded);
                    return Ok(decoded);
                }
                Err(e) => return Err(e),
            }
        }

        if let Err(e) = walker.finish() {
            if strict {
                return Err(e);
            }
            log::warn!("{}; dropping the partial code", e);
        }

        if strict && decoded < expected {
            return Err(HuffError::truncated(walker.bit_position()));
        }

        log::debug!(
            "decoded {} symbols from {} bits",
            decoded,
            walker.bit_position()
        );
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::HuffEncoder;
    use std::io::Cursor;

    fn lenient() -> HuffDecoder {
        HuffDecoder::new(CodecConfig::LENIENT)
    }

    #[test]
    fn test_decode_known_bits() {
        let decoder = HuffDecoder::default();
        let output = decoder
            .decode(b"97:1;98:2;99:4;\n6\n\x8D\xC0")
            .unwrap();
        assert_eq!(output, b"cabcbcc");
    }

    #[test]
    fn test_decode_single_symbol() {
        let decoder = HuffDecoder::default();
        assert_eq!(decoder.decode(b"97:4;\n4\n\x00").unwrap(), b"aaaa");
    }

    #[test]
    fn test_single_symbol_one_bit() {
        // A set bit cannot be followed on a single-leaf tree.
        let data = b"97:4;\n4\n\x10";
        assert!(matches!(
            HuffDecoder::default().decode(data),
            Err(HuffError::InvalidCode { bit_position: 3 })
        ));
        assert_eq!(lenient().decode(data).unwrap(), b"aaa");
    }

    #[test]
    fn test_truncated_code() {
        // 1 00 0 : the final "0" stops halfway down the a/b subtree.
        let data = b"97:1;98:2;99:4;\n4\n\x80";
        assert!(matches!(
            HuffDecoder::default().decode(data),
            Err(HuffError::TruncatedStream { bit_position: 4 })
        ));
        assert_eq!(lenient().decode(data).unwrap(), b"ca");
    }

    #[test]
    fn test_padding_without_body() {
        let data = b"97:4;\n3\n";
        assert!(matches!(
            HuffDecoder::default().decode(data),
            Err(HuffError::InvalidPadding { padding: 3, available: 0 })
        ));
        assert!(lenient().decode(data).unwrap().is_empty());

        let mut out = Vec::new();
        assert!(matches!(
            HuffDecoder::default().decode_stream(&mut Cursor::new(&data[..]), &mut out),
            Err(HuffError::InvalidPadding { .. })
        ));
        assert_eq!(
            lenient()
                .decode_stream(&mut Cursor::new(&data[..]), &mut out)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_corrupt_header_in_both_modes() {
        for decoder in [HuffDecoder::default(), lenient()] {
            assert!(matches!(
                decoder.decode(b"97:x;\n0\n"),
                Err(HuffError::CorruptHeader { .. })
            ));
        }
    }

    #[test]
    fn test_stream_matches_in_memory() {
        let data = b"Peter Piper picked a peck of pickled peppers".repeat(30);
        let compressed = HuffEncoder::default().encode(&data).unwrap();

        let decoder = HuffDecoder::new(CodecConfig::new(5));
        let mut out = Vec::new();
        let written = decoder
            .decode_stream(&mut Cursor::new(&compressed), &mut out)
            .unwrap();

        assert_eq!(written, data.len() as u64);
        assert_eq!(out, data);
        assert_eq!(decoder.decode(&compressed).unwrap(), data);
    }

    /// Decode `data` through both the in-memory and the streaming path.
    fn decode_both(decoder: &HuffDecoder, data: &[u8]) -> (Result<Vec<u8>>, Result<Vec<u8>>) {
        let in_memory = decoder.decode(data);
        let mut out = Vec::new();
        let streamed = decoder
            .decode_stream(&mut Cursor::new(data), &mut out)
            .map(|_| out);
        (in_memory, streamed)
    }

    #[test]
    fn test_body_cut_on_code_boundary() {
        // "cabcbcc" is 1 00 01 1 01 1 1; the first byte alone ends after "cabcb".
        let data = b"97:1;98:2;99:4;\n0\n\x8D";

        let (in_memory, streamed) = decode_both(&HuffDecoder::default(), data);
        for result in [in_memory, streamed] {
            assert!(matches!(
                result,
                Err(HuffError::TruncatedStream { bit_position: 8 })
            ));
        }

        let (in_memory, streamed) = decode_both(&lenient(), data);
        assert_eq!(in_memory.unwrap(), b"cabcb");
        assert_eq!(streamed.unwrap(), b"cabcb");
    }

    #[test]
    fn test_trailing_bytes() {
        let data = b"97:1;98:2;99:4;\n6\n\x8D\xC0\xFF";

        let (in_memory, streamed) = decode_both(&HuffDecoder::default(), data);
        for result in [in_memory, streamed] {
            assert!(matches!(
                result,
                Err(HuffError::TrailingData {
                    symbols: 7,
                    bit_position: 10
                })
            ));
        }

        let (in_memory, streamed) = decode_both(&lenient(), data);
        assert_eq!(in_memory.unwrap(), b"cabcbccaaacc");
        assert_eq!(streamed.unwrap(), b"cabcbccaaacc");
    }

    #[test]
    fn test_table_without_body() {
        let data = b"97:4;\n0\n";

        let (in_memory, streamed) = decode_both(&HuffDecoder::default(), data);
        for result in [in_memory, streamed] {
            assert!(matches!(
                result,
                Err(HuffError::TruncatedStream { bit_position: 0 })
            ));
        }

        let (in_memory, streamed) = decode_both(&lenient(), data);
        assert!(in_memory.unwrap().is_empty());
        assert!(streamed.unwrap().is_empty());
    }

    #[test]
    fn test_stream_truncated() {
        let data = b"97:1;98:2;99:4;\n4\n\x80";
        let mut out = Vec::new();
        let result = HuffDecoder::default().decode_stream(&mut Cursor::new(&data[..]), &mut out);
        assert!(matches!(result, Err(HuffError::TruncatedStream { .. })));

        let mut out = Vec::new();
        let written = lenient()
            .decode_stream(&mut Cursor::new(&data[..]), &mut out)
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(out, b"ca");
    }
}

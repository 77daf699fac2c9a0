//! Huffman encoder (compression).

use crate::codes::CodeTable;
use crate::config::CodecConfig;
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::tree::HuffmanTree;
use oxihuff_core::bitstream::{BitWriter, padding_for, pack};
use oxihuff_core::{HuffError, Result};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

/// Size and table information about one compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Input size in bytes.
    pub original_size: u64,
    /// Header size in bytes.
    pub header_size: u64,
    /// Packed body size in bytes.
    pub body_size: u64,
    /// Padding bits in the final body byte.
    pub padding: u8,
    /// Symbol counts of the input.
    pub frequencies: FrequencyTable,
    /// Codes assigned to each symbol.
    pub codes: CodeTable,
}

impl CompressionStats {
    /// Total output size (header + body).
    pub fn compressed_size(&self) -> u64 {
        self.header_size + self.body_size
    }

    /// Output size divided by input size.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.compressed_size() as f64 / self.original_size as f64
    }

    /// Percentage of the input saved (negative when the output is larger).
    pub fn space_savings(&self) -> f64 {
        (1.0 - self.compression_ratio()) * 100.0
    }

    /// Code length averaged over every input symbol.
    pub fn average_code_len(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let body_bits = self.codes.encoded_bit_len(&self.frequencies);
        body_bits as f64 / self.original_size as f64
    }

    /// Number of distinct symbols.
    pub fn distinct_symbols(&self) -> usize {
        self.frequencies.len()
    }
}

/// Huffman encoder for compression.
#[derive(Debug, Clone, Default)]
pub struct HuffEncoder {
    config: CodecConfig,
}

impl HuffEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `input` into the persisted format.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::EmptyInput`] for zero-length input.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.encode_with_stats(input).map(|(output, _)| output)
    }

    /// Compress `input` and report sizes and tables.
    ///
    /// # Algorithm
    ///
    /// 1. Count symbol frequencies
    /// 2. Build the tree and derive one code per symbol
    /// 3. Concatenate the code of every input byte
    /// 4. Pack the bits MSB-first, zero-padding the final byte
    /// 5. Emit header line, padding line and packed bytes
    pub fn encode_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        if input.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let frequencies = FrequencyTable::from_bytes(input);
        let codes = HuffmanTree::build(&frequencies)?.derive_codes();

        let mut bits = Vec::with_capacity(codes.encoded_bit_len(&frequencies) as usize);
        for &byte in input {
            let code = codes.get(byte).ok_or_else(|| missing_code(byte))?;
            bits.extend_from_slice(code.bits());
        }
        let packed = pack(&bits);

        let header = Header::new(frequencies, packed.padding);
        let mut output = header.to_bytes();
        let header_size = output.len() as u64;
        output.extend_from_slice(&packed.bytes);

        let stats = CompressionStats {
            original_size: input.len() as u64,
            header_size,
            body_size: packed.bytes.len() as u64,
            padding: packed.padding,
            frequencies: header.frequencies,
            codes,
        };
        log_stats(&stats);

        Ok((output, stats))
    }

    /// Compress everything `reader` yields into `writer`.
    ///
    /// The input is read twice: once to count frequencies and once, after
    /// seeking back to where it started, to emit codes. Memory use is bounded
    /// by the configured buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::EmptyInput`] when the reader yields nothing. The
    /// writer is untouched in that case.
    pub fn encode_stream<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<CompressionStats>
    where
        R: Read + Seek,
        W: Write,
    {
        let start = reader.stream_position()?;
        let frequencies = FrequencyTable::from_reader(reader, self.config.buffer_size)?;
        if frequencies.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let codes = HuffmanTree::build(&frequencies)?.derive_codes();
        let body_bits = codes.encoded_bit_len(&frequencies);
        let padding = padding_for(body_bits);

        let header = Header::new(frequencies, padding);
        let header_size = header.write_to(writer)? as u64;

        reader.seek(SeekFrom::Start(start))?;
        let mut bit_writer = BitWriter::new(&mut *writer);
        let mut buffer = vec![0u8; self.config.buffer_size.max(1)];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buffer[..n] {
                let code = codes.get(byte).ok_or_else(input_changed)?;
                bit_writer.write_bits(code.bits())?;
            }
        }

        if bit_writer.bits_written() != body_bits {
            return Err(input_changed());
        }
        let (_, written_padding) = bit_writer.finish()?;
        debug_assert_eq!(written_padding, padding);

        let stats = CompressionStats {
            original_size: header.frequencies.total(),
            header_size,
            body_size: body_bits.div_ceil(8),
            padding,
            frequencies: header.frequencies,
            codes,
        };
        log_stats(&stats);

        Ok(stats)
    }
}

fn missing_code(symbol: u8) -> HuffError {
    HuffError::Io(io::Error::new(
        ErrorKind::InvalidData,
        format!("no code for symbol {:#04x}", symbol),
    ))
}

fn input_changed() -> HuffError {
    HuffError::Io(io::Error::new(
        ErrorKind::InvalidData,
        "input changed between passes",
    ))
}

fn log_stats(stats: &CompressionStats) {
    log::debug!(
        "encoded {} bytes -> {} header + {} body bytes ({} symbols, padding {}, ratio {:.3})",
        stats.original_size,
        stats.header_size,
        stats.body_size,
        stats.distinct_symbols(),
        stats.padding,
        stats.compression_ratio()
    );
}

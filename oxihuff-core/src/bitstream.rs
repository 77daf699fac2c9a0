//! Bit packing and MSB-first bit I/O.
//!
//! Huffman codes are variable-length, so the encoded form of a message is a
//! sequence of bits whose length is rarely a multiple of 8. This module
//! provides the conversion between such bit sequences and bytes:
//!
//! - [`pack`] / [`unpack`]: whole-sequence conversion with explicit padding
//!   accounting ([`PackedStream`]).
//! - [`BitWriter`] / [`PaddedBitReader`]: the same conversion performed
//!   incrementally over `Write` / `Read`, so large inputs never need to be
//!   expanded into one bit per element.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first: the first bit of the sequence lands in bit 7 of
//! the first byte. The final byte is filled with trailing zero bits and the
//! number of filler bits (0-7) is reported as the padding count.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{pack, unpack};
//!
//! let bits = [true, false, true, true, false, false, true, false, true];
//! let packed = pack(&bits);
//! assert_eq!(packed.bytes, vec![0b1011_0010, 0b1000_0000]);
//! assert_eq!(packed.padding, 7);
//!
//! let restored = unpack(&packed.bytes, packed.padding).unwrap();
//! assert_eq!(restored, bits);
//! ```

use crate::error::{HuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Largest valid padding count.
pub const MAX_PADDING: u8 = 7;

/// Read chunk size used by [`PaddedBitReader`].
const READ_CHUNK: usize = 8192;

/// Packed bytes plus the number of zero bits appended to the final byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedStream {
    /// Packed bytes, MSB-first.
    pub bytes: Vec<u8>,
    /// Trailing filler bits in the last byte (0-7).
    pub padding: u8,
}

impl PackedStream {
    /// Number of meaningful bits in the stream.
    pub fn bit_len(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.padding as u64)
    }

    /// Check whether the stream holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Padding needed to round `bit_len` up to a whole number of bytes.
#[inline]
pub fn padding_for(bit_len: u64) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

/// Pack a bit sequence into bytes, MSB-first.
///
/// The sequence is padded with zero bits up to the next multiple of 8. The
/// empty sequence yields no bytes and zero padding.
pub fn pack(bits: &[bool]) -> PackedStream {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));

    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            if bit {
                byte |= 0x80 >> i;
            }
        }
        bytes.push(byte);
    }

    PackedStream {
        bytes,
        padding: padding_for(bits.len() as u64),
    }
}

/// Expand packed bytes back into bits and drop `padding` trailing bits.
///
/// # Errors
///
/// Returns [`HuffError::InvalidPadding`] if `padding` is larger than the
/// number of bits available or larger than [`MAX_PADDING`].
pub fn unpack(bytes: &[u8], padding: u8) -> Result<Vec<bool>> {
    let available = bytes.len() as u64 * 8;
    if padding > MAX_PADDING || padding as u64 > available {
        return Err(HuffError::invalid_padding(padding, available));
    }

    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 != 0);
        }
    }
    bits.truncate(bits.len() - padding as usize);

    Ok(bits)
}

/// An MSB-first bit writer that wraps any `Write` implementation.
///
/// Complete bytes are forwarded to the writer as soon as they fill up. Call
/// [`finish`](Self::finish) to emit the final partial byte and learn the
/// padding count.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Partial byte being filled from the MSB down.
    buffer: u8,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.buffer |= 0x80 >> self.bits_in_buffer;
        }
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        Ok(())
    }

    /// Write a sequence of bits in order.
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Flush the partial byte (zero padded) and return the writer and the
    /// padding count.
    pub fn finish(mut self) -> Result<(W, u8)> {
        let padding = padding_for(self.total_bits_written);
        if self.bits_in_buffer > 0 {
            self.writer.write_all(&[self.buffer])?;
        }
        self.writer.flush()?;
        Ok((self.writer, padding))
    }
}

/// An MSB-first bit reader that hides the trailing padding bits.
///
/// The last byte of the stream is only known to be last once the underlying
/// reader reports end of input, so the reader always holds one byte back.
/// When the end is reached, only `8 - padding` bits of that final byte are
/// yielded.
#[derive(Debug)]
pub struct PaddedBitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Padding bits to drop from the final byte.
    padding: u8,
    /// Read buffer.
    chunk: Vec<u8>,
    /// Read position within `chunk`.
    chunk_pos: usize,
    /// Valid bytes in `chunk`.
    chunk_len: usize,
    /// Byte held back until we know whether it is the last one.
    pending: Option<u8>,
    /// Byte currently being yielded, MSB first.
    current: u8,
    /// Bits left to yield from `current`.
    bits_left: u8,
    /// Underlying reader reached end of input.
    exhausted: bool,
    /// Bytes pulled from the reader.
    bytes_read: u64,
    /// Total bits yielded (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> PaddedBitReader<R> {
    /// Create a new reader over `reader` that drops `padding` trailing bits.
    pub fn new(reader: R, padding: u8) -> Self {
        Self {
            reader,
            padding,
            chunk: vec![0u8; READ_CHUNK],
            chunk_pos: 0,
            chunk_len: 0,
            pending: None,
            current: 0,
            bits_left: 0,
            exhausted: false,
            bytes_read: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits yielded so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Consume this reader and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Pull the next raw byte from the underlying reader.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.chunk_pos == self.chunk_len {
            loop {
                match self.reader.read(&mut self.chunk) {
                    Ok(0) => return Ok(None),
                    Ok(n) => {
                        self.chunk_len = n;
                        self.chunk_pos = 0;
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let byte = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        self.bytes_read += 1;
        Ok(Some(byte))
    }

    /// Read the next bit, or `None` once the meaningful bits are exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::InvalidPadding`] at end of input when the padding
    /// count is larger than the bits the final byte can give up.
    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        loop {
            if self.bits_left > 0 {
                let bit = self.current & 0x80 != 0;
                self.current <<= 1;
                self.bits_left -= 1;
                self.total_bits_read += 1;
                return Ok(Some(bit));
            }

            if self.exhausted {
                return Ok(None);
            }

            match self.next_byte()? {
                Some(byte) => {
                    if let Some(previous) = self.pending.replace(byte) {
                        self.current = previous;
                        self.bits_left = 8;
                    }
                }
                None => {
                    self.exhausted = true;
                    if self.padding > MAX_PADDING || (self.pending.is_none() && self.padding > 0) {
                        return Err(HuffError::invalid_padding(
                            self.padding,
                            self.bytes_read * 8,
                        ));
                    }
                    if let Some(last) = self.pending.take() {
                        self.current = last;
                        self.bits_left = 8 - self.padding;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use std::io::Cursor;

    fn bits_from_str(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    fn drain<R: Read>(reader: &mut PaddedBitReader<R>) -> Result<Vec<bool>> {
        let mut bits = Vec::new();
        while let Some(bit) = reader.next_bit()? {
            bits.push(bit);
        }
        Ok(bits)
    }

    #[test]
    fn test_pack_thirteen_bits() {
        let bits = bits_from_str("1100101011101");
        assert_eq!(bits.len(), 13);

        let packed = pack(&bits);
        assert_eq!(packed.bytes.len(), 2);
        assert_eq!(packed.padding, 3);
        assert_eq!(packed.bytes, vec![0b1100_1010, 0b1110_1000]);
        assert_eq!(packed.bit_len(), 13);

        let restored = unpack(&packed.bytes, packed.padding).unwrap();
        assert_eq!(restored.len(), 13);
        assert_eq!(restored, bits);
    }

    #[test]
    fn test_pack_empty() {
        let packed = pack(&[]);
        assert!(packed.is_empty());
        assert_eq!(packed.padding, 0);
        assert_eq!(unpack(&[], 0).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn test_pack_whole_byte_has_no_padding() {
        let packed = pack(&bits_from_str("10000001"));
        assert_eq!(packed.bytes, vec![0x81]);
        assert_eq!(packed.padding, 0);
    }

    #[test]
    fn test_unpack_rejects_excess_padding() {
        let err = unpack(&[], 3).unwrap_err();
        assert!(matches!(
            err,
            HuffError::InvalidPadding {
                padding: 3,
                available: 0
            }
        ));

        assert!(matches!(
            unpack(&[0xFF, 0xFF], 8),
            Err(HuffError::InvalidPadding { .. })
        ));
    }

    #[test]
    fn test_writer_matches_pack() {
        let bits = bits_from_str("1011001110001");
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(&bits).unwrap();
        assert_eq!(writer.bits_written(), 13);

        let (output, padding) = writer.finish().unwrap();
        let packed = pack(&bits);
        assert_eq!(output, packed.bytes);
        assert_eq!(padding, packed.padding);
    }

    #[test]
    fn test_reader_drops_padding() {
        let mut reader = PaddedBitReader::new(Cursor::new(vec![0b1100_1010, 0b1110_1000]), 3);
        let bits = drain(&mut reader).unwrap();
        assert_eq!(bits, bits_from_str("1100101011101"));
        assert_eq!(reader.bits_read(), 13);
    }

    #[test]
    fn test_reader_empty_stream() {
        let mut reader = PaddedBitReader::new(Cursor::new(Vec::new()), 0);
        assert_eq!(reader.next_bit().unwrap(), None);

        let mut reader = PaddedBitReader::new(Cursor::new(Vec::new()), 2);
        assert!(matches!(
            reader.next_bit(),
            Err(HuffError::InvalidPadding { padding: 2, .. })
        ));
    }

    #[test]
    fn test_reader_spans_chunks() {
        let data: Vec<u8> = (0..(READ_CHUNK * 2 + 5)).map(|i| i as u8).collect();
        let mut reader = PaddedBitReader::new(Cursor::new(data.clone()), 4);
        let bits = drain(&mut reader).unwrap();

        let expected = unpack(&data, 4).unwrap();
        assert_eq!(bits.len(), data.len() * 8 - 4);
        assert_eq!(bits, expected);
    }

    quickcheck! {
        fn prop_pack_unpack_restores_bits(bits: Vec<bool>) -> bool {
            let packed = pack(&bits);
            packed.padding <= MAX_PADDING
                && unpack(&packed.bytes, packed.padding).map(|b| b == bits).unwrap_or(false)
        }

        fn prop_streaming_matches_whole(bits: Vec<bool>) -> bool {
            let mut writer = BitWriter::new(Vec::new());
            if writer.write_bits(&bits).is_err() {
                return false;
            }
            let Ok((bytes, padding)) = writer.finish() else {
                return false;
            };
            let mut reader = PaddedBitReader::new(Cursor::new(bytes), padding);
            drain(&mut reader).map(|b| b == bits).unwrap_or(false)
        }
    }
}

//! Persisted header: frequency table line and padding line.
//!
//! ```text
//! 97:4;98:1;\n      symbol ordinal ':' count ';', ascending by symbol
//! 5\n               padding bits in the final body byte (0-7)
//! <body bytes>      packed bit stream
//! ```
//!
//! The decoder rebuilds the tree from the table line, so the table must be
//! written in the same order the encoder inserted leaves.

use crate::frequency::FrequencyTable;
use oxihuff_core::bitstream::MAX_PADDING;
use oxihuff_core::{HuffError, Result};
use std::io::{BufRead, Read, Write};
use std::str::FromStr;

/// Longest accepted header line in bytes, newline excluded.
///
/// A full 256-symbol table with 20-digit counts is about 6.4 KiB.
pub const MAX_HEADER_LINE: usize = 16 * 1024;

/// Decoded header of a compressed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Symbol counts the tree is built from.
    pub frequencies: FrequencyTable,
    /// Zero bits appended to the final body byte.
    pub padding: u8,
}

impl Header {
    /// Create a header.
    pub fn new(frequencies: FrequencyTable, padding: u8) -> Self {
        Self {
            frequencies,
            padding,
        }
    }

    /// Write the header, returning the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let bytes = self.to_bytes();
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Serialize the header to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::with_capacity(self.frequencies.len() * 8 + 4);
        for (symbol, count) in self.frequencies.iter() {
            out.push_str(&format!("{}:{};", symbol, count));
        }
        out.push('\n');
        out.push_str(&format!("{}\n", self.padding));
        out.into_bytes()
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        fn digits(mut n: u64) -> usize {
            let mut len = 1;
            while n >= 10 {
                n /= 10;
                len += 1;
            }
            len
        }

        let table: usize = self
            .frequencies
            .iter()
            .map(|(symbol, count)| digits(symbol as u64) + 1 + digits(count) + 1)
            .sum();
        table + 1 + digits(self.padding as u64) + 1
    }

    /// Parse a header from the start of `data`.
    ///
    /// Returns the header and the offset of the first body byte.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        let (table_line, rest_start) = split_line(data, 0, "frequency table")?;
        let frequencies = parse_table(table_line)?;

        let (padding_line, body_start) = split_line(data, rest_start, "padding")?;
        let padding = parse_padding(padding_line)?;

        Ok((Self::new(frequencies, padding), body_start))
    }

    /// Read a header from `reader`, leaving it positioned at the body.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut line = Vec::new();

        read_line(reader, &mut line, "frequency table")?;
        let frequencies = parse_table(&line)?;

        line.clear();
        read_line(reader, &mut line, "padding")?;
        let padding = parse_padding(&line)?;

        Ok(Self::new(frequencies, padding))
    }
}

/// Find the line starting at `start`, returning it without the newline and
/// the offset just past the newline.
fn split_line<'a>(data: &'a [u8], start: usize, what: &str) -> Result<(&'a [u8], usize)> {
    let rest = &data[start..];
    let limit = rest.len().min(MAX_HEADER_LINE + 1);

    match rest[..limit].iter().position(|&b| b == b'\n') {
        Some(end) => Ok((&rest[..end], start + end + 1)),
        None if rest.len() > MAX_HEADER_LINE => Err(line_too_long(what)),
        None => Err(missing_newline(what)),
    }
}

fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>, what: &str) -> Result<()> {
    let cap = MAX_HEADER_LINE as u64 + 1;
    reader.by_ref().take(cap).read_until(b'\n', line)?;

    if line.last() == Some(&b'\n') {
        line.pop();
        Ok(())
    } else if line.len() > MAX_HEADER_LINE {
        Err(line_too_long(what))
    } else {
        Err(missing_newline(what))
    }
}

fn line_too_long(what: &str) -> HuffError {
    HuffError::corrupt_header(format!("{} line exceeds {} bytes", what, MAX_HEADER_LINE))
}

fn missing_newline(what: &str) -> HuffError {
    HuffError::corrupt_header(format!("{} line is not newline-terminated", what))
}

fn parse_table(line: &[u8]) -> Result<FrequencyTable> {
    let line = std::str::from_utf8(line)
        .map_err(|_| HuffError::corrupt_header("frequency table is not valid text"))?;

    let mut table = FrequencyTable::new();
    for segment in line.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (symbol, count) = segment.split_once(':').ok_or_else(|| {
            HuffError::corrupt_header(format!("entry '{}' has no ':'", segment))
        })?;

        let symbol: u8 = parse_decimal(symbol.trim()).ok_or_else(|| {
            HuffError::corrupt_header(format!("invalid symbol ordinal '{}'", symbol.trim()))
        })?;
        let count: u64 = parse_decimal(count.trim()).ok_or_else(|| {
            HuffError::corrupt_header(format!(
                "invalid count '{}' for symbol {}",
                count.trim(),
                symbol
            ))
        })?;

        if count == 0 {
            return Err(HuffError::corrupt_header(format!(
                "symbol {} has a zero count",
                symbol
            )));
        }
        if table.insert(symbol, count).is_some() {
            return Err(HuffError::corrupt_header(format!(
                "symbol {} appears twice",
                symbol
            )));
        }
    }

    if table.is_empty() {
        return Err(HuffError::corrupt_header("frequency table is empty"));
    }
    Ok(table)
}

/// Parse a field of bare ASCII digits. No sign is allowed.
fn parse_decimal<T: FromStr>(text: &str) -> Option<T> {
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

fn parse_padding(line: &[u8]) -> Result<u8> {
    let text = std::str::from_utf8(line)
        .map_err(|_| HuffError::corrupt_header("padding line is not valid text"))?
        .trim();

    match parse_decimal::<u8>(text) {
        Some(padding) if padding <= MAX_PADDING => Ok(padding),
        _ => Err(HuffError::corrupt_header(format!(
            "padding '{}' is not in 0-{}",
            text, MAX_PADDING
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn sample() -> Header {
        Header::new([(b'a', 4), (b'b', 1)].into_iter().collect(), 5)
    }

    fn corrupt_message(data: &[u8]) -> String {
        match Header::parse(data) {
            Err(HuffError::CorruptHeader { message }) => message,
            other => panic!("expected CorruptHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_to_bytes() {
        let header = sample();
        assert_eq!(header.to_bytes(), b"97:4;98:1;\n5\n");
        assert_eq!(header.encoded_len(), header.to_bytes().len());

        let mut out = Vec::new();
        assert_eq!(header.write_to(&mut out).unwrap(), 13);
        assert_eq!(out, header.to_bytes());
    }

    #[test]
    fn test_encoded_len_large_counts() {
        let header = Header::new(
            [(0, 1), (9, 10), (10, 99), (255, u64::MAX)].into_iter().collect(),
            0,
        );
        assert_eq!(header.encoded_len(), header.to_bytes().len());
    }

    #[test]
    fn test_parse() {
        let (header, offset) = Header::parse(b"97:4;98:1;\n5\n\xAB\xCD").unwrap();
        assert_eq!(header, sample());
        assert_eq!(offset, 13);
    }

    #[test]
    fn test_parse_lenient_syntax() {
        let (header, offset) = Header::parse(b" 97 : 4 ; 98:1\n 5 \n").unwrap();
        assert_eq!(header, sample());
        assert_eq!(offset, 19);
    }

    #[test]
    fn test_parse_errors() {
        assert!(corrupt_message(b"97:x;\n0\n").contains("invalid count"));
        assert!(corrupt_message(b"256:1;\n0\n").contains("invalid symbol"));
        assert!(corrupt_message(b"-1:1;\n0\n").contains("invalid symbol"));
        assert!(corrupt_message(b"97;\n0\n").contains("no ':'"));
        assert!(corrupt_message(b"97:0;\n0\n").contains("zero count"));
        assert!(corrupt_message(b"97:1;97:2;\n0\n").contains("twice"));
        assert!(corrupt_message(b";\n0\n").contains("empty"));
        assert!(corrupt_message(b"97:1;").contains("not newline-terminated"));
        assert!(corrupt_message(b"97:1;\n3").contains("not newline-terminated"));
        assert!(corrupt_message(b"97:1;\n8\n").contains("not in 0-7"));
        assert!(corrupt_message(b"97:1;\nfive\n").contains("not in 0-7"));
        assert!(corrupt_message(b"").contains("frequency table"));
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert!(corrupt_message(b"+97:4;\n0\n").contains("invalid symbol"));
        assert!(corrupt_message(b"97:+4;\n0\n").contains("invalid count"));
        assert!(corrupt_message(b"97:-4;\n0\n").contains("invalid count"));
        assert!(corrupt_message(b"97: +4 ;\n0\n").contains("invalid count"));
        assert!(corrupt_message(b"97:4;\n+3\n").contains("not in 0-7"));
    }

    #[test]
    fn test_parse_line_too_long() {
        let mut data = vec![b' '; MAX_HEADER_LINE + 1];
        data.extend_from_slice(b"97:1;\n0\n");
        assert!(corrupt_message(&data).contains("exceeds"));
    }

    #[test]
    fn test_read_from() {
        let data = b"97:4;98:1;\n5\nBODY";
        let mut reader = BufReader::with_capacity(3, Cursor::new(&data[..]));
        let header = Header::read_from(&mut reader).unwrap();
        assert_eq!(header, sample());

        let mut body = Vec::new();
        reader.read_to_end(&mut body).unwrap();
        assert_eq!(body, b"BODY");
    }

    #[test]
    fn test_read_from_errors() {
        let mut reader = Cursor::new(&b"97:1;"[..]);
        assert!(matches!(
            Header::read_from(&mut reader),
            Err(HuffError::CorruptHeader { .. })
        ));

        let data = vec![b'1'; MAX_HEADER_LINE + 10];
        let mut reader = Cursor::new(data);
        match Header::read_from(&mut reader) {
            Err(HuffError::CorruptHeader { message }) => assert!(message.contains("exceeds")),
            other => panic!("expected CorruptHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_all_symbols_fit() {
        let table: FrequencyTable = (0..=255u8).map(|s| (s, u64::MAX)).collect();
        let header = Header::new(table, 7);
        assert!(header.encoded_len() < MAX_HEADER_LINE);
        let (parsed, _) = Header::parse(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
    }
}

//! Per-symbol Huffman codes.

use crate::frequency::FrequencyTable;
use std::fmt;

/// A non-empty bit string assigned to one symbol (`false` = 0, `true` = 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    /// Wrap a path of bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    /// The bits, root to leaf.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the code has no bits (never true for derived codes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to its derived [`Code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Create a table with no codes.
    pub(crate) fn new() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }

    pub(crate) fn set(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Code of `symbol`, if the symbol is in the tree.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Check whether the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Iterate over `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Longest code length.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Bits needed to encode a message with the given symbol counts.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|code| count.saturating_mul(code.len() as u64))
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

//! Symbol frequency table.

use oxihuff_core::Result;
use std::io::{ErrorKind, Read};

/// Occurrence counts for each byte value.
///
/// Iteration is always in ascending symbol order and skips symbols with a
/// zero count. That order is also the order in which leaves enter the
/// priority queue, so it fixes the shape of the tree on frequency ties.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Count every byte produced by `reader`, reading `buffer_size` bytes at
    /// a time.
    pub fn from_reader<R: Read>(reader: &mut R, buffer_size: usize) -> Result<Self> {
        let mut table = Self::new();
        let mut buffer = vec![0u8; buffer_size.max(1)];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => table.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(table)
    }

    /// Add the bytes of `data` to the counts.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Set the count of `symbol`, returning the previous non-zero count.
    ///
    /// A count of zero removes the symbol.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        let previous = std::mem::replace(&mut self.counts[symbol as usize], count);
        (previous > 0).then_some(previous)
    }

    /// Count of `symbol` (zero when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Check whether `symbol` has been seen.
    pub fn contains(&self, symbol: u8) -> bool {
        self.counts[symbol as usize] > 0
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Check whether no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Iterate over `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.insert(symbol, count);
        }
        table
    }
}

// src/model/frequency.rs

//! Byte occurrence counting.

use std::fmt;

const SYMBOLS: usize = 256;

/// Occurrence count for every byte value of an input.
///
/// Stored densely; a symbol is "present" when its count is non-zero.
/// Iteration always walks symbols in ascending order, which fixes the
/// order leaves enter the tree builder.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOLS],
}

impl FrequencyTable {
    /// Counts every byte of `bytes`. An empty slice gives an empty table.
    pub fn build(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in bytes {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Counts `bytes` in chunks of `chunk_size` across the rayon pool.
    ///
    /// Partial tables are combined with [`merge`](Self::merge), so the
    /// result equals [`build`](Self::build) on the same input.
    #[cfg(feature = "rayon")]
    pub fn build_parallel(bytes: &[u8], chunk_size: usize) -> Self {
        use rayon::prelude::*;

        bytes
            .par_chunks(chunk_size.max(1))
            .map(Self::build)
            .reduce(Self::default, |mut acc, part| {
                acc.merge(&part);
                acc
            })
    }

    /// Adds every count of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (slot, &count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *slot += count;
        }
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of counted bytes.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

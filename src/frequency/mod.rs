
use std::collections::BTreeMap;

use crate::{Symbol, EOS};

/// Occurrence counts of every symbol seen in one pass over the input,
/// including a single end-of-stream marker when built from bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = BTreeMap::new();

        for &byte in bytes.iter() {
            counts.entry(byte as Symbol).and_modify(|freq| *freq += 1).or_insert(1);
        }

        counts.insert(EOS, 1);

        Self::from_counts(counts)
    }

    /// Takes the counts as given; the caller is responsible for the
    /// end-of-stream entry.
    pub fn from_counts(counts: BTreeMap<Symbol, usize>) -> Self {
        Self { counts }
    }

    /// Returns the count of the given symbol, 0 if it never occurred.
    #[inline(always)]
    pub fn get(&self, symbol: Symbol) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols, end-of-stream included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Never true for tables built from bytes.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the input length plus one.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates over `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &freq)| (symbol, freq))
    }
}


use std::{collections::BTreeMap, fmt};

use crate::{
    frequency::FrequencyTable,
    huffman_table::{HuffmanTable, TableEntry},
    HufError, Result, Symbol,
};

/// The path from the root to a leaf. Bit `i` of `bits` is the `i`-th step
/// taken (0 = left, 1 = right), so the first step sits in the lowest bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: usize,
}

impl Code {
    pub const MAX_LEN: usize = u64::BITS as usize;

    #[inline(always)]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns step `i` of the path, `true` meaning right.
    #[inline(always)]
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        (self.bits >> i) & 1 == 1
    }

    /// The code of the child reached by one more step.
    fn child(&self, right: bool) -> Option<Code> {
        if self.len == Self::MAX_LEN {
            return None;
        }

        Some(Code {
            bits: self.bits | ((right as u64) << self.len),
            len: self.len + 1,
        })
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let mask = if self.len == Self::MAX_LEN { u64::MAX } else { (1 << self.len) - 1 };
        other.bits & mask == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps each symbol of a [HuffmanTable] to its code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    /// Walks the tree depth first from the root, going left with a 0 and
    /// right with a 1, and records the path leading to every leaf.
    ///
    /// A root that is itself a leaf gets the empty code.
    pub fn from_table(table: &HuffmanTable) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(0, Code::default())];

        while let Some((pos, code)) = stack.pop() {
            match table[pos] {
                TableEntry::Leaf { glyph, .. } => {
                    codes.insert(glyph, code);
                }
                TableEntry::Merge { left, right, .. } => {
                    let too_deep = || HufError::CodeTooLong(code.len() + 1);
                    stack.push((right, code.child(true).ok_or_else(too_deep)?));
                    stack.push((left, code.child(false).ok_or_else(too_deep)?));
                }
            }
        }

        Ok(Self { codes })
    }

    #[inline(always)]
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Exact number of bits the encoded stream takes before padding.
    pub fn encoded_len(&self, freqs: &FrequencyTable) -> usize {
        freqs
            .iter()
            .map(|(symbol, freq)| freq * self.get(symbol).map_or(0, Code::len))
            .sum()
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "{symbol:>3} {code}")?;
        }
        Ok(())
    }
}

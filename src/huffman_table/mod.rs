
use std::{fmt, ops::Index};

use crate::{frequency::FrequencyTable, Symbol};

/// One slot of the flattened merge tree. Children are indices into the
/// same table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableEntry {
    Leaf {
        glyph: Symbol,
        frequency: usize,
    },
    Merge {
        frequency: usize,
        left: usize,
        right: usize,
    },
}

impl TableEntry {
    #[inline(always)]
    pub fn frequency(&self) -> usize {
        match self {
            TableEntry::Leaf { frequency, .. } => *frequency,
            TableEntry::Merge { frequency, .. } => *frequency,
        }
    }

    /// The symbol stored in a leaf, `None` for merge nodes.
    #[inline(always)]
    pub fn glyph(&self) -> Option<Symbol> {
        match self {
            TableEntry::Leaf { glyph, .. } => Some(*glyph),
            TableEntry::Merge { .. } => None,
        }
    }

    #[inline(always)]
    pub fn left_child(&self) -> Option<usize> {
        match self {
            TableEntry::Leaf { .. } => None,
            TableEntry::Merge { left, .. } => Some(*left),
        }
    }

    #[inline(always)]
    pub fn right_child(&self) -> Option<usize> {
        match self {
            TableEntry::Leaf { .. } => None,
            TableEntry::Merge { right, .. } => Some(*right),
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TableEntry::Leaf { .. })
    }
}

/// The Huffman merge tree stored as a flat array of `2k - 1` entries,
/// `k` being the number of distinct symbols. The root is always at index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTable {
    entries: Box<[TableEntry]>,
}

impl HuffmanTable {
    /// Builds the table from the symbol counts.
    ///
    /// Leaves are laid out in ascending symbol order and stably sorted by
    /// frequency, so equal counts keep ascending symbol order. Merging then
    /// runs in place over the same array, using its prefix as a min-heap.
    ///
    /// A table with a single symbol (empty input: only the end-of-stream
    /// marker) is the lone leaf itself.
    pub fn build(freqs: &FrequencyTable) -> Self {
        let mut leaves: Vec<TableEntry> = freqs
            .iter()
            .map(|(glyph, frequency)| TableEntry::Leaf { glyph, frequency })
            .collect();

        leaves.sort_by_key(TableEntry::frequency);

        if leaves.len() < 2 {
            return Self { entries: leaves.into_boxed_slice() };
        }

        let mut builder = TableBuilder::new(leaves);
        builder.merge_all();
        builder.build()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn root(&self) -> &TableEntry {
        &self.entries[0]
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&TableEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Iterates over `(index, symbol)` for every leaf, in table order.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.glyph().map(|glyph| (i, glyph)))
    }

    /// Number of distinct symbols (leaves) in the table.
    pub fn symbols(&self) -> usize {
        self.len() / 2 + 1
    }
}

impl Index<usize> for HuffmanTable {
    type Output = TableEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl fmt::Display for HuffmanTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                TableEntry::Leaf { glyph, frequency } => {
                    writeln!(f, "{i}: glyph {glyph} freq {frequency}")?
                }
                TableEntry::Merge { frequency, left, right } => {
                    writeln!(f, "{i}: merge freq {frequency} left {left} right {right}")?
                }
            }
        }
        Ok(())
    }
}

/// Working state of the in-place construction.
///
/// Slots `0..=heap_end` form a binary min-heap keyed by frequency. Every
/// merge relocates the two lightest nodes out of the heap: the lightest to
/// the slot freed at `heap_end`, the second lightest to `first_free`. The
/// merge node replaces the root, so the root of the finished tree is slot 0.
struct TableBuilder {
    slots: Vec<Option<TableEntry>>,
    heap_end: usize,
    first_free: usize,
}

impl TableBuilder {
    fn new(leaves: Vec<TableEntry>) -> Self {
        let k = leaves.len();
        let mut slots: Vec<Option<TableEntry>> = leaves.into_iter().map(Some).collect();
        slots.resize(2 * k - 1, None);

        Self { slots, heap_end: k - 1, first_free: k }
    }

    /// Frequency of the node in `pos`; vacant slots weigh the most.
    #[inline(always)]
    fn frequency(&self, pos: usize) -> usize {
        self.slots[pos].as_ref().map_or(usize::MAX, TableEntry::frequency)
    }

    fn sift_down(&mut self, mut pos: usize, last: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            let mut smallest = pos;

            if left <= last && self.frequency(left) < self.frequency(smallest) {
                smallest = left;
            }
            if right <= last && self.frequency(right) < self.frequency(smallest) {
                smallest = right;
            }

            if smallest == pos {
                return;
            }

            self.slots.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn heapify(&mut self, last: usize) {
        for pos in (0..=last / 2).rev() {
            self.sift_down(pos, last);
        }
    }

    fn merge_all(&mut self) {
        let k = self.first_free;

        // The last merge needs no heap maintenance and is done apart.
        for _ in 0..k - 2 {
            let marked = if self.frequency(1) <= self.frequency(2) { 1 } else { 2 };

            self.slots.swap(marked, self.first_free);
            self.slots.swap(marked, self.heap_end);
            self.heapify(self.heap_end - 1);

            self.slots.swap(0, self.heap_end);
            let frequency = self.frequency(self.heap_end) + self.frequency(self.first_free);
            self.slots[0] = Some(TableEntry::Merge {
                frequency,
                left: self.heap_end,
                right: self.first_free,
            });
            self.heapify(self.heap_end - 1);

            self.heap_end -= 1;
            self.first_free += 1;
        }

        self.slots.swap(0, self.first_free);
        let frequency = self.frequency(1) + self.frequency(self.first_free);
        self.slots[0] = Some(TableEntry::Merge {
            frequency,
            left: 1,
            right: self.first_free,
        });
    }

    fn build(self) -> HuffmanTable {
        let entries = self
            .slots
            .into_iter()
            .map(|slot| slot.expect("every slot holds a leaf or a merge node once merging is done"))
            .collect();

        HuffmanTable { entries }
    }
}


use crate::{
    bitstreams::{BinaryWriter, BinaryWriterBuilder},
    codes::CodeTable,
    frequency::FrequencyTable,
    huffman_table::HuffmanTable,
    HufError, Result, Symbol, EOS,
};

/// Everything derived from the first pass over the input: counts, merge
/// tree and codes.
#[derive(Clone, Debug)]
pub struct HuffmanEncoder {
    freqs: FrequencyTable,
    table: HuffmanTable,
    codes: CodeTable,
}

impl HuffmanEncoder {
    pub fn build(data: &[u8]) -> Result<Self> {
        let freqs = FrequencyTable::from_bytes(data);
        let table = HuffmanTable::build(&freqs);
        let codes = CodeTable::from_table(&table)?;

        Ok(Self { freqs, table, codes })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    pub fn table(&self) -> &HuffmanTable {
        &self.table
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Writes the code of `symbol` and returns its length.
    #[inline(always)]
    pub fn write_next(&self, symbol: Symbol, writer: &mut BinaryWriterBuilder) -> Result<usize> {
        let code = self.codes.get(symbol).ok_or(HufError::MissingCode(symbol))?;
        writer.push_bits(code.bits(), code.len() as u64);
        Ok(code.len())
    }

    /// Second pass: the code of every input byte, then the end-of-stream code.
    pub fn write_body(&self, data: &[u8], writer: &mut BinaryWriterBuilder) -> Result<()> {
        for &byte in data.iter() {
            self.write_next(byte as Symbol, writer)?;
        }
        self.write_next(EOS, writer)?;
        Ok(())
    }

    /// Encodes `data` into zero-padded bytes.
    pub fn encode(&self, data: &[u8]) -> Result<BinaryWriter> {
        let bits = self.codes.encoded_len(&self.freqs);
        let mut writer = BinaryWriterBuilder::with_capacity(bits.div_ceil(8));

        self.write_body(data, &mut writer)?;

        Ok(writer.build())
    }
}

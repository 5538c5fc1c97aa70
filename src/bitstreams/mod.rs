pub struct BinaryWriter {
    pub os: Box<[u8]>,
    /// Number of meaningful bits in `os`, padding excluded.
    pub written_bits: usize,
}

/// Packs bit sequences into bytes, least-significant bit first: the first
/// bit pushed into a byte has value `2^0`, the eighth `2^7`.
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    pub current: u64,
    pub free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    /// Flushes the last partial byte, zero-padded in its high bits.
    pub fn build(mut self) -> BinaryWriter {
        if self.free != 8 {
            self.write(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
            written_bits: self.written_bits,
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self { os: Vec::with_capacity(bytes), ..Self::default() }
    }

    #[inline(always)]
    pub fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    /// Appends the `len` lowest bits of `b` to the current byte, `len` being
    /// at most the number of free bits left in it.
    #[inline(always)]
    pub fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        debug_assert!(len as usize <= self.free);

        self.current |= (b & ((1 << len) - 1)) << (8 - self.free);
        self.free -= len as usize;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len as usize;
        len
    }

    /// Appends the `len` lowest bits of `x`, lowest first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut x = x;
        let mut left = len;

        while left != 0 {
            let chunk = left.min(self.free as u64);
            self.write_in_current(x, chunk);
            // A full 64-bit push ends with a shift by 8 at most.
            x >>= chunk;
            left -= chunk;
        }

        len
    }
}

/// Reads bits back in the order [BinaryWriterBuilder] packed them.
#[cfg(test)]
pub(crate) struct BinaryReader {
    is: Box<[u8]>,
    pub read_bits: usize,
}

#[cfg(test)]
impl BinaryReader {
    pub fn new(input_stream: Box<[u8]>) -> Self {
        BinaryReader { is: input_stream, read_bits: 0 }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = self.is.get(self.read_bits >> 3)?;
        let bit = (byte >> (self.read_bits & 7)) & 1 == 1;
        self.read_bits += 1;
        Some(bit)
    }

    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        let mut x = 0;
        for i in 0..len {
            if self.read_bit()? {
                x |= 1 << i;
            }
        }
        Some(x)
    }
}

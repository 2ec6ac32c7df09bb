use crate::error::SerdeErr;

/// Cursor over a received packet
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    index: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, index: 0 }
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let Some(byte) = self.buffer.get(self.index) else {
            return Err(SerdeErr);
        };
        self.index += 1;
        Ok(*byte)
    }

    /// Reads exactly `count` bytes, failing without consuming anything if the
    /// buffer is too short
    pub fn read_bytes(&mut self, count: usize) -> Result<&'b [u8], SerdeErr> {
        let end = self.index.checked_add(count).ok_or(SerdeErr)?;
        let Some(bytes) = self.buffer.get(self.index..end) else {
            return Err(SerdeErr);
        };
        self.index = end;
        Ok(bytes)
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

// A length prefix written 7 bits at a time, low group first. The high bit of
// each byte is set when another byte follows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct VarLength {
    inner_value: u32,
}

// 5 groups of 7 bits cover a u32
const MAX_GROUPS: u8 = 5;

impl VarLength {
    pub fn new(value: u32) -> Self {
        Self { inner_value: value }
    }

    pub fn get(&self) -> u32 {
        self.inner_value
    }
}

impl Serde for VarLength {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        let mut value = self.inner_value;
        loop {
            let group = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                writer.write_byte(group);
                return;
            }
            writer.write_byte(group | 0x80);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let mut output: u32 = 0;
        for group_index in 0..MAX_GROUPS {
            let byte = reader.read_byte()?;
            let group = (byte & 0x7F) as u32;
            let shift = 7 * group_index as u32;
            if group_index == MAX_GROUPS - 1 && group > 0x0F {
                // would overflow a u32
                return Err(SerdeErr);
            }
            output |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(Self::new(output));
            }
        }
        Err(SerdeErr)
    }

    fn byte_length(&self) -> usize {
        let mut value = self.inner_value >> 7;
        let mut output = 1;
        while value != 0 {
            output += 1;
            value >>= 7;
        }
        output
    }
}

impl From<u32> for VarLength {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

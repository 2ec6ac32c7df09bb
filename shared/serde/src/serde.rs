use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, integer::VarLength};

/// A type that can be written to and read from the operation wire format
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes self into the given writer
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Reads a value of this type out of the reader
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` will write
    fn byte_length(&self) -> usize;
}

// Primitives

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SerdeErr),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let bytes = reader.read_bytes(4)?;
        let bytes: [u8; 4] = bytes.try_into().map_err(|_| SerdeErr)?;
        Ok(i32::from_le_bytes(bytes))
    }

    fn byte_length(&self) -> usize {
        4
    }
}

impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        let bytes = self.as_bytes();
        VarLength::new(bytes.len() as u32).ser(writer);
        writer.write_bytes(bytes);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = VarLength::de(reader)?.get() as usize;
        if length > reader.remaining() {
            return Err(SerdeErr);
        }
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerdeErr)
    }

    fn byte_length(&self) -> usize {
        let length = self.len();
        VarLength::new(length as u32).byte_length() + length
    }
}

// Collections carry a 4-byte signed count, as every counted field on the wire does

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        (self.len() as i32).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let count = i32::de(reader)?;
        if count < 0 {
            return Err(SerdeErr);
        }
        let count = count as usize;
        // every item takes at least one byte, so a larger count is corrupt
        if count > reader.remaining() {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn byte_length(&self) -> usize {
        let mut output = 4;
        for item in self {
            output += item.byte_length();
        }
        output
    }
}

impl<A: Serde, B: Serde> Serde for (A, B) {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.0.ser(writer);
        self.1.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let a = A::de(reader)?;
        let b = B::de(reader)?;
        Ok((a, b))
    }

    fn byte_length(&self) -> usize {
        self.0.byte_length() + self.1.byte_length()
    }
}

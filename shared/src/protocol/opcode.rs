use std::fmt;

use wirenet_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

/// Leading byte of every operation packet
#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Place = 1,
    Remove = 2,
    Connect = 3,
    Disconnect = 4,
    ChangeSetting = 5,
    TripWire = 6,
    Request = 7,
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Opcode::Place),
            2 => Some(Opcode::Remove),
            3 => Some(Opcode::Connect),
            4 => Some(Opcode::Disconnect),
            5 => Some(Opcode::ChangeSetting),
            6 => Some(Opcode::TripWire),
            7 => Some(Opcode::Request),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Whether operations with this opcode change the graph
    pub fn is_graph_edit(self) -> bool {
        !matches!(self, Opcode::TripWire | Opcode::Request)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Place => "Place",
            Opcode::Remove => "Remove",
            Opcode::Connect => "Connect",
            Opcode::Disconnect => "Disconnect",
            Opcode::ChangeSetting => "ChangeSetting",
            Opcode::TripWire => "TripWire",
            Opcode::Request => "Request",
        };
        f.write_str(name)
    }
}

impl Serde for Opcode {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.to_byte());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        // malformed packets can carry any byte here
        Self::from_byte(reader.read_byte()?).ok_or(SerdeErr)
    }

    fn byte_length(&self) -> usize {
        1
    }
}

use std::fmt;

use wirenet_serde::{ByteReader, ByteWrite, ByteWriter, Serde, SerdeErr};

use crate::{
    geometry::Point,
    protocol::{OperationError, Opcode},
    types::ParticipantId,
};

/// One edit or control message, exactly as it travels in a packet
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphOperation {
    Place {
        kind: String,
        anchor: Point,
        settings: Vec<(String, String)>,
    },
    Remove {
        at: Point,
    },
    Connect {
        source: Point,
        destination: Point,
        points: Vec<Point>,
    },
    Disconnect {
        at: Point,
    },
    ChangeSetting {
        at: Point,
        key: String,
        value: String,
    },
    TripWire {
        at: Point,
    },
    Request {
        requester: ParticipantId,
    },
}

impl GraphOperation {
    pub fn opcode(&self) -> Opcode {
        match self {
            GraphOperation::Place { .. } => Opcode::Place,
            GraphOperation::Remove { .. } => Opcode::Remove,
            GraphOperation::Connect { .. } => Opcode::Connect,
            GraphOperation::Disconnect { .. } => Opcode::Disconnect,
            GraphOperation::ChangeSetting { .. } => Opcode::ChangeSetting,
            GraphOperation::TripWire { .. } => Opcode::TripWire,
            GraphOperation::Request { .. } => Opcode::Request,
        }
    }

    /// Encodes into a standalone packet
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }

    /// Decodes a standalone packet. The packet must hold exactly one
    /// operation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OperationError> {
        let Some(first) = bytes.first() else {
            return Err(OperationError::Empty);
        };
        let Some(opcode) = Opcode::from_byte(*first) else {
            return Err(OperationError::UnknownOpcode { opcode: *first });
        };

        let mut reader = ByteReader::new(bytes);
        let operation = Self::de(&mut reader).map_err(|_| OperationError::Malformed { opcode })?;
        if !reader.is_empty() {
            return Err(OperationError::TrailingBytes {
                opcode,
                count: reader.remaining(),
            });
        }
        Ok(operation)
    }
}

impl Serde for GraphOperation {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.opcode().ser(writer);
        match self {
            GraphOperation::Place {
                kind,
                anchor,
                settings,
            } => {
                kind.ser(writer);
                anchor.ser(writer);
                settings.ser(writer);
            }
            GraphOperation::Remove { at }
            | GraphOperation::Disconnect { at }
            | GraphOperation::TripWire { at } => {
                at.ser(writer);
            }
            GraphOperation::Connect {
                source,
                destination,
                points,
            } => {
                source.ser(writer);
                destination.ser(writer);
                points.ser(writer);
            }
            GraphOperation::ChangeSetting { at, key, value } => {
                at.ser(writer);
                key.ser(writer);
                value.ser(writer);
            }
            GraphOperation::Request { requester } => {
                requester.ser(writer);
            }
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let operation = match Opcode::de(reader)? {
            Opcode::Place => GraphOperation::Place {
                kind: String::de(reader)?,
                anchor: Point::de(reader)?,
                settings: Vec::de(reader)?,
            },
            Opcode::Remove => GraphOperation::Remove {
                at: Point::de(reader)?,
            },
            Opcode::Connect => GraphOperation::Connect {
                source: Point::de(reader)?,
                destination: Point::de(reader)?,
                points: Vec::de(reader)?,
            },
            Opcode::Disconnect => GraphOperation::Disconnect {
                at: Point::de(reader)?,
            },
            Opcode::ChangeSetting => GraphOperation::ChangeSetting {
                at: Point::de(reader)?,
                key: String::de(reader)?,
                value: String::de(reader)?,
            },
            Opcode::TripWire => GraphOperation::TripWire {
                at: Point::de(reader)?,
            },
            Opcode::Request => GraphOperation::Request {
                requester: ParticipantId::de(reader)?,
            },
        };
        Ok(operation)
    }

    fn byte_length(&self) -> usize {
        let payload = match self {
            GraphOperation::Place {
                kind,
                anchor,
                settings,
            } => kind.byte_length() + anchor.byte_length() + settings.byte_length(),
            GraphOperation::Remove { at }
            | GraphOperation::Disconnect { at }
            | GraphOperation::TripWire { at } => at.byte_length(),
            GraphOperation::Connect {
                source,
                destination,
                points,
            } => source.byte_length() + destination.byte_length() + points.byte_length(),
            GraphOperation::ChangeSetting { at, key, value } => {
                at.byte_length() + key.byte_length() + value.byte_length()
            }
            GraphOperation::Request { requester } => requester.byte_length(),
        };
        1 + payload
    }
}

impl fmt::Display for GraphOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphOperation::Place {
                kind,
                anchor,
                settings,
            } => write!(
                f,
                "Place: kind {}, x {}, y {}, {} settings",
                kind,
                anchor.x,
                anchor.y,
                settings.len()
            ),
            GraphOperation::Remove { at } => write!(f, "Remove: x {}, y {}", at.x, at.y),
            GraphOperation::Connect {
                source,
                destination,
                points,
            } => write!(
                f,
                "Connect: {} => {}, {} points",
                source,
                destination,
                points.len()
            ),
            GraphOperation::Disconnect { at } => write!(f, "Disconnect: x {}, y {}", at.x, at.y),
            GraphOperation::ChangeSetting { at, key, value } => write!(
                f,
                "ChangeSetting: x {}, y {}, {} = {}",
                at.x, at.y, key, value
            ),
            GraphOperation::TripWire { at } => write!(f, "TripWire: x {}, y {}", at.x, at.y),
            GraphOperation::Request { requester } => write!(f, "Request: from {}", requester),
        }
    }
}

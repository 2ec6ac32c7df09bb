use wirenet_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

/// Identifies one participant of a session on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(i32);

impl ParticipantId {
    /// Id the authority uses when it is the origin of an operation
    pub const AUTHORITY: ParticipantId = ParticipantId(256);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    pub fn is_authority(&self) -> bool {
        *self == Self::AUTHORITY
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serde for ParticipantId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(i32::de(reader)?))
    }

    fn byte_length(&self) -> usize {
        4
    }
}

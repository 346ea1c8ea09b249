use crate::cursor::Cursor;
use crate::error::ParseError;

// RFC 1035 4.1.1 flag layout.
const FLAG_RESPONSE: u16 = 0x8000;
const OPCODE_MASK: u16 = 0x7800;
const FLAG_AUTHORITATIVE: u16 = 0x0400;
const FLAG_TRUNCATED: u16 = 0x0200;
const FLAG_RECURSION_DESIRED: u16 = 0x0100;
const FLAG_RECURSION_AVAILABLE: u16 = 0x0080;
const RCODE_MASK: u16 = 0x000F;

/// Response status codes a client acts on; anything else is carried
/// through as `Other` rather than rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Other(u16),
}

impl From<u16> for ResponseCode {
    fn from(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }
}

/// The fixed 12 byte message header. The four counts state exactly how
/// many entries of each section follow on the wire; the message encoder
/// derives them, callers never set them by hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Header for an outbound query with recursion desired, counts zeroed
    /// until the encoder fills them in.
    pub fn query(id: u16) -> Self {
        Header {
            id,
            flags: FLAG_RECURSION_DESIRED,
            question_count: 0,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        }
    }

    /// Header for a response echoing the given id.
    pub fn response(id: u16) -> Self {
        Header {
            id,
            flags: FLAG_RESPONSE | FLAG_RECURSION_DESIRED | FLAG_RECURSION_AVAILABLE,
            question_count: 0,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        }
    }

    pub fn from(cursor: &mut Cursor) -> Result<Self, ParseError> {
        Ok(Header {
            id: cursor.take_u16()?,
            flags: cursor.take_u16()?,
            question_count: cursor.take_u16()?,
            answer_count: cursor.take_u16()?,
            authority_count: cursor.take_u16()?,
            additional_count: cursor.take_u16()?,
        })
    }

    pub fn to_u8_vec(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(12);
        result.extend(&self.id.to_be_bytes());
        result.extend(&self.flags.to_be_bytes());
        result.extend(&self.question_count.to_be_bytes());
        result.extend(&self.answer_count.to_be_bytes());
        result.extend(&self.authority_count.to_be_bytes());
        result.extend(&self.additional_count.to_be_bytes());
        result
    }

    pub fn is_answer(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn opcode(&self) -> u16 {
        (self.flags & OPCODE_MASK) >> 11
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & FLAG_AUTHORITATIVE != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RECURSION_DESIRED != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RECURSION_AVAILABLE != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from(self.flags & RCODE_MASK)
    }
}

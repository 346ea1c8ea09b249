use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::protocol::name::DomainName;
use crate::protocol::record::RecordType;

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    pub name: DomainName,
    pub q_type: RecordType,
    pub q_class: u16,
}

impl Question {
    pub fn new(name: DomainName, q_type: RecordType) -> Self {
        Question {
            name,
            q_type,
            q_class: CLASS_IN,
        }
    }

    pub fn from(cursor: &mut Cursor) -> Result<Self, ParseError> {
        let name = DomainName::from(cursor)?;
        let q_type = RecordType::from(cursor.take_u16()?);
        let q_class = cursor.take_u16()?;
        Ok(Question {
            name,
            q_type,
            q_class,
        })
    }

    pub fn to_u8_vec(&self) -> Vec<u8> {
        let mut result = self.name.to_u8_vec();
        result.extend(&u16::from(self.q_type).to_be_bytes());
        result.extend(&self.q_class.to_be_bytes());
        result
    }
}

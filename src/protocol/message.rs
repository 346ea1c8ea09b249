use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::protocol::header::Header;
use crate::protocol::name::DomainName;
use crate::protocol::question::Question;
use crate::protocol::record::{Record, RecordType};

/// A complete DNS message. Immutable once built; this is the value the
/// decoder produces and the correlation engine hands to the caller that
/// sent the matching query.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    /// Outbound query for a single question.
    pub fn query(id: u16, name: DomainName, q_type: RecordType) -> Self {
        Message {
            header: Header::query(id),
            questions: vec![Question::new(name, q_type)],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn from(cursor: &mut Cursor) -> Result<Self, ParseError> {
        let header = Header::from(cursor)?;
        let mut questions = Vec::with_capacity(header.question_count as usize);
        for _ in 0..header.question_count {
            questions.push(Question::from(cursor)?);
        }
        let answers = Self::read_records(cursor, header.answer_count)?;
        let authorities = Self::read_records(cursor, header.authority_count)?;
        let additionals = Self::read_records(cursor, header.additional_count)?;
        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    fn read_records(cursor: &mut Cursor, count: u16) -> Result<Vec<Record>, ParseError> {
        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            records.push(Record::from(cursor)?);
        }
        Ok(records)
    }

    pub fn to_u8_vec(&self) -> Vec<u8> {
        self.to_u8_with_id(self.header.id)
    }

    /// Encodes with the given transaction id. The section counts are
    /// derived from the section vectors here, whatever the header says.
    pub fn to_u8_with_id(&self, id: u16) -> Vec<u8> {
        let header = Header {
            id,
            flags: self.header.flags,
            question_count: self.questions.len() as u16,
            answer_count: self.answers.len() as u16,
            authority_count: self.authorities.len() as u16,
            additional_count: self.additionals.len() as u16,
        };
        let mut bytes = header.to_u8_vec();
        for question in &self.questions {
            bytes.extend(question.to_u8_vec());
        }
        for record in self
            .answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
        {
            bytes.extend(record.to_u8_vec());
        }
        bytes
    }

    pub fn get_id(&self) -> u16 {
        self.header.id
    }
}

mod header;
mod message;
mod name;
mod question;
mod record;

use crate::cursor::Cursor;
use crate::error::ParseError;

pub use header::{Header, ResponseCode};
pub use message::Message;
pub use name::DomainName;
pub use question::{Question, CLASS_IN};
pub use record::{Record, RecordData, RecordType};

/// Decodes one raw message. Pure: no state, same bytes always give the
/// same result. Reads the header, then exactly the declared number of
/// questions and records; anything structurally off yields a `ParseError`
/// with nothing partially decoded.
pub fn decode(frame: &[u8]) -> Result<Message, ParseError> {
    let mut cursor = Cursor::from(frame);
    Message::from(&mut cursor)
}

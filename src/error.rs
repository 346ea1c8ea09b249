use std::{error, fmt, io};

/// Structural failure while decoding a message. The decoder makes no
/// attempt at partial recovery, so one kind of error covers the whole
/// parse; the variant only says what tripped it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer ran out before a field was fully read.
    ShortRead,
    /// A label length byte that is neither a plain length nor a pointer.
    BadLabel,
    /// A compression pointer that does not point strictly backward.
    BadPointer,
    /// Declared rdata length differs from the bytes the payload consumed.
    DataLengthMismatch,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ParseError::ShortRead => "message ended before a field was fully read",
            ParseError::BadLabel => "invalid label length byte in a name",
            ParseError::BadPointer => "compression pointer does not point backward",
            ParseError::DataLengthMismatch => "resource data length does not match payload",
        })
    }
}

impl error::Error for ParseError {}

/// Channel-level fault. Cloneable so a single failure can be delivered
/// to every query still pending on the channel.
#[derive(Debug, Clone)]
pub struct TransportError {
    kind: io::ErrorKind,
    message: String,
}

impl TransportError {
    pub fn get_kind(&self) -> io::ErrorKind {
        self.kind
    }
}

impl From<io::Error> for TransportError {
    fn from(error: io::Error) -> Self {
        TransportError {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "transport failure: {}", self.message)
    }
}

impl error::Error for TransportError {}

/// What a caller's awaited query ultimately fails with: the name never
/// made sense on the wire, the channel died, or the pending entry was
/// discarded without ever being resolved.
#[derive(Debug, Clone)]
pub enum QueryError {
    InvalidName(ParseError),
    Transport(TransportError),
    ChannelClosed,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::InvalidName(error) => write!(f, "invalid query name: {}", error),
            QueryError::Transport(error) => write!(f, "{}", error),
            QueryError::ChannelClosed => {
                f.write_str("channel dropped the query before an answer arrived")
            }
        }
    }
}

impl error::Error for QueryError {}

/// Rejection signal from `RegTable::register`: the id is already leased
/// to a query still in flight.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IdCollision(pub u16);

impl fmt::Display for IdCollision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "transaction id {:#06x} already has a query in flight", self.0)
    }
}

impl error::Error for IdCollision {}

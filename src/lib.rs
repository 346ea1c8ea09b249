//! Client-side DNS wire protocol with async response correlation.
//!
//! Raw network octets become typed [`Message`]s through [`decode`], and
//! answers arriving out of order on a shared channel are matched back to
//! the query that asked for them through the [`RegTable`] /
//! [`Correlator`] pair. Transport policy (which server, retries,
//! timeouts, TLS) is the caller's business; [`Exchange`] is the thin
//! UDP send-side glue, and [`inbound`] adapts any framed transport to
//! the correlator.

#[macro_use]
extern crate log;

mod buffer;
mod cursor;

pub mod correlator;
pub mod error;
pub mod exchange;
pub mod inbound;
pub mod protocol;
pub mod reg_table;
pub mod system;

pub use correlator::{ChannelEvent, Correlator};
pub use error::{IdCollision, ParseError, QueryError, TransportError};
pub use exchange::Exchange;
pub use protocol::{
    decode, DomainName, Header, Message, Question, Record, RecordData, RecordType, ResponseCode,
};
pub use reg_table::{PendingQuery, QueryResult, RegTable};

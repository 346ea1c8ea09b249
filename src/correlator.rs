use crate::error::{ParseError, TransportError};
use crate::protocol;
use crate::reg_table::RegTable;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Out-of-band notifications for collaborators watching the channel.
/// Parse failures are informational; a transport failure is terminal and
/// arrives after every pending query has already been failed.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    ParseFailure(ParseError),
    TransportFailure(TransportError),
}

/// Matches decoded answers against the pending-query table. Runs on the
/// transport's receive path; the table is the only shared state it
/// touches, and every resolution goes through `take_and_remove`, so a
/// pending query is settled at most once.
pub struct Correlator {
    reg_table: Arc<RegTable>,
    events: Option<UnboundedSender<ChannelEvent>>,
}

impl Correlator {
    pub fn new(reg_table: Arc<RegTable>) -> Self {
        Correlator {
            reg_table,
            events: None,
        }
    }

    pub fn with_events(reg_table: Arc<RegTable>, events: UnboundedSender<ChannelEvent>) -> Self {
        Correlator {
            reg_table,
            events: Some(events),
        }
    }

    /// Handles one de-framed inbound message. A frame that fails to
    /// decode is reported and dropped; it cannot be attributed to a
    /// transaction id, so no pending query is touched and the channel
    /// keeps going.
    pub fn handle_frame(&self, frame: &[u8]) {
        let message = match protocol::decode(frame) {
            Ok(message) => message,
            Err(error) => {
                warn!("dropping malformed frame of {} bytes: {}", frame.len(), error);
                self.emit(ChannelEvent::ParseFailure(error));
                return;
            }
        };
        if !message.header.is_answer() {
            debug!("message {:#06x} is not an answer, ignoring", message.get_id());
            return;
        }
        match self.reg_table.take_and_remove(message.get_id()) {
            None => {
                debug!("no query pending under id {:#06x}, ignoring", message.get_id());
            }
            Some(pending) => {
                if pending.send(Ok(message)).is_err() {
                    debug!("caller stopped waiting before its answer arrived");
                }
            }
        }
    }

    /// Terminal path for a dead channel: every query still pending fails
    /// with the transport error, and the table is left empty so the ids
    /// can be leased again on a fresh channel.
    pub fn fail_all(&self, error: TransportError) {
        let drained = self.reg_table.drain_all();
        error!("channel failed ({}), failing {} pending queries", error, drained.len());
        for pending in drained {
            let _ = pending.send(Err(error.clone()));
        }
        self.emit(ChannelEvent::TransportFailure(error));
    }

    fn emit(&self, event: ChannelEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver just means nobody is listening anymore.
            let _ = events.send(event);
        }
    }
}

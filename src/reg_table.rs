use crate::error::{IdCollision, TransportError};
use crate::protocol::Message;
use dashmap::DashMap;
use std::sync::Mutex;
use tokio::sync::oneshot::Sender;

/// What a caller's result slot eventually carries: the matched answer,
/// or the transport fault that took the whole channel down.
pub type QueryResult = std::result::Result<Message, TransportError>;

/// The single-assignment slot a registered query is waiting on.
pub type PendingQuery = Sender<QueryResult>;

/// Shared table of in-flight queries, keyed by transaction id. An id in
/// the table is a lease: it means exactly one response is awaited under
/// it. Send-path registration and receive-path removal race by design;
/// every compound operation here is atomic with respect to the others.
pub struct RegTable {
    entries: DashMap<u16, PendingQuery>,
    // Serializes register against drain_all so a registration is never
    // half-visible to a drain. Per-id removal needs no extra lock.
    lock_key: Mutex<()>,
}

impl RegTable {
    pub fn new() -> Self {
        RegTable {
            entries: DashMap::new(),
            lock_key: Mutex::new(()),
        }
    }

    /// Leases `id` to `pending`. An id already in flight is rejected,
    /// never overwritten; the caller picks another id and retries.
    pub fn register(&self, id: u16, pending: PendingQuery) -> Result<(), IdCollision> {
        let guard = self.lock_key.lock().unwrap();
        if self.entries.contains_key(&id) {
            return Err(IdCollision(id));
        }
        self.entries.insert(id, pending);
        drop(guard);
        Ok(())
    }

    /// Atomically removes and returns the entry for `id`. `None` is the
    /// expected answer for a duplicate, late, or unsolicited response and
    /// for an id a timeout already reclaimed; it is not an error.
    pub fn take_and_remove(&self, id: u16) -> Option<PendingQuery> {
        self.entries.remove(&id).map(|(_, pending)| pending)
    }

    /// Empties the table and returns every pending query, for the one
    /// path that fails them all: a dead channel.
    pub fn drain_all(&self) -> Vec<PendingQuery> {
        let guard = self.lock_key.lock().unwrap();
        let ids: Vec<u16> = self.entries.iter().map(|entry| *entry.key()).collect();
        let mut drained = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some((_, pending)) = self.entries.remove(&id) {
                drained.push(pending);
            }
        }
        drop(guard);
        drained
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

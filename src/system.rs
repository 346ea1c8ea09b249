use std::error::Error;
use std::sync::atomic::{AtomicU16, Ordering};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

static NEXT_ID: AtomicU16 = AtomicU16::new(0);

/// Candidate transaction id for the next outbound query. Wraps around;
/// callers must retry on a registration collision.
pub fn next_id() -> u16 {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

//! Id sources used when creating lists and todos.

use std::time::{SystemTime, UNIX_EPOCH};

/// Producer of fresh integer ids.
///
/// Callers (see `Document`) redraw on collision, so a source only has to
/// avoid repeating itself forever.
pub trait IdSource {
    fn next_id(&mut self) -> i64;
}

/// Epoch-millisecond ids, strictly increasing within one source.
///
/// Two creations inside the same millisecond get `last + 1` instead of a
/// duplicate timestamp.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for TimestampIds {
    fn next_id(&mut self) -> i64 {
        let next = now_epoch_ms().max(self.last.saturating_add(1));
        self.last = next;
        next
    }
}

/// Deterministic counter, starting at `start`.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

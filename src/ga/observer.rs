//! Generation observers.
//!
//! The engine pushes an owned [`GenerationRecord`] to each subscribed
//! observer after every step. Observers never see engine internals, so a
//! presentation layer reading records cannot race with the next generation.

use super::record::GenerationRecord;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives one record per completed generation.
pub trait GenerationObserver {
    fn on_generation(&mut self, record: &GenerationRecord);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationRecord),
{
    fn on_generation(&mut self, record: &GenerationRecord) {
        self(record)
    }
}

/// Forwards a copy of each record over a channel.
///
/// A disconnected receiver is logged and otherwise ignored; the run goes on.
impl GenerationObserver for Sender<GenerationRecord> {
    fn on_generation(&mut self, record: &GenerationRecord) {
        if self.send(record.clone()).is_err() {
            tracing::warn!(
                generation = record.generation,
                "generation receiver disconnected"
            );
        }
    }
}

/// A shared slot holding only the most recent record.
///
/// Clones share the slot: subscribe one clone to the engine and read from
/// another, e.g. on a render thread.
#[derive(Debug, Clone, Default)]
pub struct LatestRecord {
    slot: Arc<Mutex<Option<GenerationRecord>>>,
}

impl LatestRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the latest record, if any generation has completed.
    pub fn get(&self) -> Option<GenerationRecord> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the latest record.
    pub fn take(&self) -> Option<GenerationRecord> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl GenerationObserver for LatestRecord {
    fn on_generation(&mut self, record: &GenerationRecord) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
    }
}

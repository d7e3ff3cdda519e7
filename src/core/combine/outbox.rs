//=========================================================================
// Combine Outbox
//=========================================================================
//
// Queue of completed combines.
//
// The engine pushes one event per combine; the runtime forwards the
// queue to the host at the tick boundary.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::CombineEvent;

//=== CombineOutbox =======================================================

/// Completed combines awaiting delivery.
#[derive(Debug, Default)]
pub struct CombineOutbox {
    queue: Vec<CombineEvent>,
}

impl CombineOutbox {
    /// Creates a new empty outbox.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a combine to be delivered at the next tick boundary.
    pub fn push(&mut self, event: CombineEvent) {
        self.queue.push(event);
    }

    /// Returns an iterator over the queued combines.
    pub fn iter(&self) -> impl Iterator<Item = &CombineEvent> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Returns an iterator that drains all combines from the outbox.
    pub fn drain(&mut self) -> impl Iterator<Item = CombineEvent> + '_ {
        self.queue.drain(..)
    }

    /// Takes all combines, leaving the outbox empty.
    pub fn take(&mut self) -> Vec<CombineEvent> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

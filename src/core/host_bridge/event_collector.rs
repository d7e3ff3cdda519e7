//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → pending (arrival order) → TickControl
//
// Bounded polling prevents starvation: whatever is left in the channel
// is picked up on the next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events for one tick, preserving arrival order.
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    pending: Vec<HostEvent>,
    max_events_per_tick: usize,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<HostEvent>, max_events_per_tick: usize) -> Self {
        Self {
            receiver,
            pending: Vec::with_capacity(8),
            max_events_per_tick,
        }
    }

    /// Collects pending host events (bounded to prevent starvation).
    ///
    /// On `Exit`, events received before the shutdown request are still
    /// available through [`EventCollector::take_pending`].
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.pending.clear();
        let mut drained = 0;

        while drained < self.max_events_per_tick {
            match self.receiver.try_recv() {
                Ok(HostEvent::Shutdown) => return TickControl::Exit,
                Ok(event) => {
                    self.pending.push(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.max_events_per_tick {
            warn!("Host event backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    /// Returns the events collected this tick.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[HostEvent] {
        &self.pending
    }

    /// Takes ownership of collected events, leaving an empty vec.
    pub(crate) fn take_pending(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.pending)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

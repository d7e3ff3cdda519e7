//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the combine logic thread.
//
// Responsibilities:
// - Own the CombineEngine and the host collaborators
// - Receive host events via channel and apply them in arrival order
// - Publish completed combines back to the host (bounded; overflow is
//   dropped with a warning)
// - Maintain steady pacing using a fixed tick rate (TPS)
//
// Notes:
// Every contact is decided on this one thread, one at a time, so the
// cooldown check-then-mark sequence never races with itself. Communication
// with the host occurs only through message passing.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod combinable;
pub mod combine;
pub mod cooldown;
pub mod host_bridge;
pub mod rules;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{info, warn};

//=== Internal Modules ====================================================

use combine::{CombineEngine, CombineEvent, CombineOutbox, ContactOutcome};
use cooldown::SharedCooldownRegistry;
use host_bridge::{EventCollector, HostEvent, SceneHost, TickControl};

//=== CoreSystemsOrchestrator =============================================
//
// Owns the combine engine and the host for the lifetime of the logic
// thread. The host is handed back when the thread exits.
//
pub(crate) struct CoreSystemsOrchestrator<H: SceneHost> {
    engine: CombineEngine<SharedCooldownRegistry>,
    host: H,
    outbox: CombineOutbox,
    events_closed: bool,
}

impl<H: SceneHost + Send + 'static> CoreSystemsOrchestrator<H> {
    //--- Construction -----------------------------------------------------
    pub fn new(engine: CombineEngine<SharedCooldownRegistry>, host: H) -> Self {
        Self {
            engine,
            host,
            outbox: CombineOutbox::new(),
            events_closed: false,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread that decides contacts at a fixed update
    // frequency (TPS - ticks per second).
    //
    // Each tick:
    //  1. Collects host events (bounded)
    //  2. Applies them in arrival order (register / unregister / contacts)
    //  3. Publishes completed combines
    //  4. Sleeps to maintain fixed pacing
    //  5. Exits after applying the final batch once shutdown is requested
    //
    pub fn spawn_core_thread(
        mut self,
        receiver: Receiver<HostEvent>,
        combines: Sender<CombineEvent>,
        tps: f64,
        max_events_per_tick: usize,
    ) -> thread::JoinHandle<H> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver, max_events_per_tick);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather host events ----------------------------
                let control = collector.collect_frame();

                //--- Step 2: Apply in arrival order ------------------------
                self.apply(collector.take_pending());

                //--- Step 3: Publish combines ------------------------------
                self.publish(&combines);

                if control == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 4: Maintain pacing -------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            self.host
        })
    }

    //--- apply() ----------------------------------------------------------
    //
    // Applies one tick's worth of host events. Registrations that fail
    // validation are logged and dropped.
    //
    fn apply(&mut self, events: Vec<HostEvent>) {
        for event in events {
            match event {
                HostEvent::Contacts(batch) => {
                    for contact in batch {
                        let outcome = self.engine.on_contact(&mut self.host, contact);
                        if let ContactOutcome::Combined(event) = outcome {
                            self.outbox.push(event);
                        }
                    }
                }
                HostEvent::Register(combinable) => {
                    let id = combinable.id;
                    if let Err(e) = self.engine.register(*combinable) {
                        warn!("Rejected registration of {}: {}", id, e);
                    }
                }
                HostEvent::Unregister(id) => {
                    self.engine.unregister(id);
                }
                HostEvent::Shutdown => {}
            }
        }
    }

    //--- publish() --------------------------------------------------------
    //
    // Forwards this tick's combines. The outbox is always emptied; events
    // that do not fit in the channel are dropped.
    //
    fn publish(&mut self, combines: &Sender<CombineEvent>) {
        let mut dropped = 0;

        for event in self.outbox.drain() {
            match combines.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => dropped += 1,
                Err(TrySendError::Disconnected(_)) => {
                    if !self.events_closed {
                        warn!("Combine event receiver dropped; further events are discarded");
                        self.events_closed = true;
                    }
                }
            }
        }

        if dropped > 0 {
            warn!("Combine event channel full; dropped {} events", dropped);
        }
    }
}

//=========================================================================
// Aetheric Fusion Runtime
//
// Main entry point for hosts that want contacts decided on a dedicated
// logic thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──start(host)──>  EngineHandle
//         │                          │                          │
//         ├─ with_tps()              └─ init()                  ├─ report_contact()
//         ├─ with_channel_capacity()    (register objects)      ├─ register()
//         ├─ with_cleanup_interval()                            ├─ events()
//         ├─ with_max_events_per_tick()                         └─ shutdown() → host
//         ├─ with_event_capacity()
//         └─ with_shared_cooldowns()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::combinable::{Combinable, ObjectId};
use crate::core::combine::{CombineEngine, CombineEvent};
use crate::core::cooldown::{PairCooldownRegistry, SharedCooldownRegistry, DEFAULT_CLEANUP_INTERVAL};
use crate::core::host_bridge::{ContactEvent, HostEvent, SceneHost};
use crate::core::CoreSystemsOrchestrator;

//=== EngineError =========================================================

/// Runtime failures surfaced to the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The logic thread is gone; nothing more can be delivered.
    #[error("logic thread disconnected")]
    Disconnected,

    /// The logic thread panicked.
    #[error("logic thread panicked: {0}")]
    CorePanicked(String),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (decision ticks per second)
/// - **Channel capacity**: 128 host events
/// - **Cleanup interval**: 1.0 s between cooldown cleanup passes
/// - **Max events per tick**: 256
/// - **Event capacity**: 1024 undelivered combine events
///
/// # Examples
///
/// ```no_run
/// # use aetheric_fusion::prelude::*;
/// fn run<H: SceneHost + Send + 'static>(host: H) -> EngineHandle<H> {
///     EngineBuilder::new()
///         .with_tps(120.0)
///         .build()
///         .start(host)
/// }
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    cleanup_interval: f64,
    max_events_per_tick: usize,
    event_capacity: usize,
    shared_cooldowns: Option<SharedCooldownRegistry>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            max_events_per_tick: 256,
            event_capacity: 1024,
            shared_cooldowns: None,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for host → core communication.
    ///
    /// When the channel is full, reporting blocks until the logic thread
    /// catches up.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the minimum spacing between cooldown cleanup passes, in seconds.
    ///
    /// Ignored when [`EngineBuilder::with_shared_cooldowns`] is used.
    ///
    /// Default: 1.0
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn with_cleanup_interval(mut self, seconds: f64) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "Cleanup interval must be finite and non-negative, got {}",
            seconds
        );
        self.cleanup_interval = seconds;
        self
    }

    /// Caps how many host events one tick applies; the rest wait for the
    /// next tick.
    ///
    /// Default: 256
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_events_per_tick(mut self, max: usize) -> Self {
        assert!(max > 0, "Max events per tick must be positive");
        self.max_events_per_tick = max;
        self
    }

    /// Sets how many combine events may wait for the host to read them.
    ///
    /// Events beyond this are dropped with a warning, so a host that never
    /// reads [`EngineHandle::events`] does not grow memory.
    ///
    /// Default: 1024
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        self.event_capacity = capacity;
        self
    }

    /// Uses an existing cooldown registry, e.g. one shared by several
    /// engines that may see the same pair.
    pub fn with_shared_cooldowns(mut self, registry: SharedCooldownRegistry) -> Self {
        self.shared_cooldowns = Some(registry);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, cleanup: {}s)",
            self.tps, self.channel_capacity, self.cleanup_interval
        );

        let cooldowns = self.shared_cooldowns.unwrap_or_else(|| {
            PairCooldownRegistry::with_cleanup_interval(self.cleanup_interval).into()
        });

        Engine {
            combine: CombineEngine::with_cooldowns(cooldowns),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            max_events_per_tick: self.max_events_per_tick,
            event_capacity: self.event_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured runtime, not yet running.
///
/// Create via [`EngineBuilder`], optionally pre-register objects with
/// [`Engine::init`], then call [`Engine::start`].
///
/// # Architecture
///
/// ```text
/// Host Thread(s)                       Logic Thread (@ TPS)
///   physics step                         EventCollector
///     └─ report_contact() ── channel ──►   └─ CombineEngine::on_contact()
///                                              ├─ SceneHost::spawn / destroy
///   events() ◄────────── channel ────────────  └─ CombineEvent
/// ```
pub struct Engine {
    combine: CombineEngine<SharedCooldownRegistry>,
    tps: f64,
    channel_capacity: usize,
    max_events_per_tick: usize,
    event_capacity: usize,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the combine engine before start, e.g. to
    /// register objects present at scene load.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut CombineEngine<SharedCooldownRegistry>),
    {
        info!("Initializing combine engine");
        init_fn(&mut self.combine);
        info!("Engine initialization complete ({} combinables)", self.combine.store().len());
        self
    }

    /// Handle to the cooldown registry used by this engine.
    pub fn cooldowns(&self) -> SharedCooldownRegistry {
        self.combine.cooldowns().clone()
    }

    //--- Execution --------------------------------------------------------

    /// Moves the host onto a new logic thread and starts deciding contacts.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the host → core and core → host channels (both bounded)
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Returns immediately with an [`EngineHandle`]
    /// 4. [`EngineHandle::shutdown`] stops the thread and returns the host
    pub fn start<H>(self, host: H) -> EngineHandle<H>
    where
        H: SceneHost + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<HostEvent>, Receiver<HostEvent>) = bounded(self.channel_capacity);
        let (events_tx, events_rx) = bounded(self.event_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let cooldowns = self.combine.cooldowns().clone();
        let orchestrator = CoreSystemsOrchestrator::new(self.combine, host);
        let core = orchestrator.spawn_core_thread(rx, events_tx, self.tps, self.max_events_per_tick);
        info!("Core logic thread spawned");

        EngineHandle {
            sender: tx,
            events: events_rx,
            cooldowns,
            core,
        }
    }
}

//=== EngineHandle ========================================================

/// Host-side handle to a running engine.
pub struct EngineHandle<H> {
    sender: Sender<HostEvent>,
    events: Receiver<CombineEvent>,
    cooldowns: SharedCooldownRegistry,
    core: JoinHandle<H>,
}

impl<H> EngineHandle<H> {
    //--- Reporting --------------------------------------------------------

    /// Reports one contact-start notification.
    pub fn report_contact(&self, contact: ContactEvent) -> Result<(), EngineError> {
        self.send(HostEvent::Contacts(vec![contact]))
    }

    /// Reports every contact of one host step, in order.
    pub fn report_contacts(&self, contacts: Vec<ContactEvent>) -> Result<(), EngineError> {
        if contacts.is_empty() {
            return Ok(());
        }
        self.send(HostEvent::Contacts(contacts))
    }

    pub fn register(&self, combinable: Combinable) -> Result<(), EngineError> {
        self.send(HostEvent::Register(Box::new(combinable)))
    }

    pub fn unregister(&self, id: ObjectId) -> Result<(), EngineError> {
        self.send(HostEvent::Unregister(id))
    }

    /// Clone of the raw sender, for reporting from other host threads.
    pub fn sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    //--- Observation ------------------------------------------------------

    /// Completed combines, in decision order.
    ///
    /// The channel holds at most the configured event capacity; combines
    /// decided while it is full are not delivered.
    pub fn events(&self) -> &Receiver<CombineEvent> {
        &self.events
    }

    pub fn cooldowns(&self) -> &SharedCooldownRegistry {
        &self.cooldowns
    }

    //--- Shutdown ---------------------------------------------------------

    /// Stops the logic thread after it applies everything already sent,
    /// and returns the host.
    pub fn shutdown(self) -> Result<H, EngineError> {
        info!("Shutting down engine");

        // A disconnected channel stops the thread just the same.
        let _ = self.sender.send(HostEvent::Shutdown);

        match self.core.join() {
            Ok(host) => {
                info!("Core thread terminated cleanly");
                Ok(host)
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!("Core thread panicked: {}", message);
                Err(EngineError::CorePanicked(message))
            }
        }
    }

    fn send(&self, event: HostEvent) -> Result<(), EngineError> {
        self.sender.send(event).map_err(|_| EngineError::Disconnected)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.cleanup_interval, 1.0);
        assert_eq!(builder.max_events_per_tick, 256);
        assert_eq!(builder.event_capacity, 1024);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Cleanup interval must be finite")]
    fn builder_with_cleanup_interval_panics_on_negative() {
        EngineBuilder::new().with_cleanup_interval(-0.5);
    }

    #[test]
    #[should_panic(expected = "Max events per tick must be positive")]
    fn builder_with_max_events_panics_on_zero() {
        EngineBuilder::new().with_max_events_per_tick(0);
    }

    #[test]
    #[should_panic(expected = "Event capacity must be positive")]
    fn builder_with_event_capacity_panics_on_zero() {
        EngineBuilder::new().with_event_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_max_events_per_tick(32)
            .with_event_capacity(8)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.max_events_per_tick, 32);
        assert_eq!(engine.event_capacity, 8);
    }

    #[test]
    fn cleanup_interval_reaches_registry() {
        let engine = EngineBuilder::new().with_cleanup_interval(0.25).build();
        assert_eq!(engine.cooldowns().lock().cleanup_interval(), 0.25);
    }

    #[test]
    fn shared_cooldowns_are_reused() {
        let shared = SharedCooldownRegistry::default();
        let engine = EngineBuilder::new().with_shared_cooldowns(shared.clone()).build();

        shared.lock().mark(
            crate::core::cooldown::PairKey::new(ObjectId::new(0, 0), ObjectId::new(1, 0)),
            0.0,
            1.0,
        );
        assert_eq!(engine.cooldowns().len(), 1);
    }

    #[test]
    fn init_registers_combinables() {
        let engine = EngineBuilder::new().build().init(|combine| {
            combine.register(Combinable::new(ObjectId::new(0, 0))).unwrap();
        });
        assert_eq!(engine.combine.store().len(), 1);
    }
}

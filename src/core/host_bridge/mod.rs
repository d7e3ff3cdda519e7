//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the host (physics, rendering, entity lifecycle) with the
// combine core.
//
// This module defines the contract between host implementations and
// core logic, so any engine that can report contacts and spawn/destroy
// objects can drive the combine engine.
//
// Components:
// - `interface`: collaborator trait, event and error types (the contract)
// - `event_collector`: core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{ContactEvent, HostError, HostEvent, SceneHost};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};

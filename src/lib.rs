//=========================================================================
// Aetheric Fusion — Library Root
//
// Contact-driven pairwise combination with duplicate-contact suppression.
//
// Responsibilities:
// - Expose the decision engine (`CombineEngine`) for hosts that call it
//   from their own contact callbacks
// - Expose the threaded runtime (`Engine`) for hosts that prefer to
//   report contacts over a channel
// - Keep the logic-thread plumbing out of the public API surface
//
// Typical usage:
// ```no_run
// use aetheric_fusion::prelude::*;
//
// fn on_contact_begin<H: SceneHost>(engine: &mut CombineEngine, host: &mut H, a: ObjectId, b: ObjectId, now: f64) {
//     engine.on_contact(host, ContactEvent::new(a, b, now));
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the combine model, rules, cooldowns and the host
// bridge. Most hosts only need what the prelude re-exports.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the threaded runtime entry point.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError, EngineHandle};

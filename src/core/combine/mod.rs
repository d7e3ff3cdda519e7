//=========================================================================
// Combine
//=========================================================================
//
// Contact decision and the combine transaction.
//
// Architecture:
//   ContactEvent ──> CombineEngine::on_contact() ──> ContactOutcome
//                         │
//                         ├─ CombinableStore   (who can combine)
//                         ├─ ContactGate       (may they combine)
//                         ├─ PairCooldown      (first report only)
//                         └─ SceneHost         (spawn / destroy)
//
//   CombineOutbox collects the Combined outcomes of one runtime tick.
//
//=========================================================================

//=== Module Declarations =================================================

mod engine;
mod outbox;
mod outcome;

//=== Public API ==========================================================

pub use engine::{spawn_position, CombineEngine, SPAWN_ORIENTATION};
pub use outbox::CombineOutbox;
pub use outcome::{CombineEvent, ContactOutcome, IgnoreReason};

//=========================================================================
// Combine Rules
//=========================================================================
//
// Pure decision functions evaluated on every contact.
//
//   ContactGate::evaluate(a, b, config)
//     ├─ eligibility
//     ├─ speed
//     └─ RecipeMatcher::matches(a, b)
//
//=========================================================================

//=== Module Declarations =================================================

mod gate;
mod recipe;

//=== Public API ==========================================================

pub use gate::{ContactGate, GateConfig, Rejection};
pub use recipe::RecipeMatcher;

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_fusion::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, EngineError, EngineHandle};

// Combinable model
pub use crate::core::combinable::{
    Archetypes, Combinable, CombinableDef, CombinableStore, CombineSettings, CombineState,
    ConfigError, IdAllocator, ObjectId, Recipe, TemplateRef,
};

// Decision
pub use crate::core::combine::{CombineEngine, CombineEvent, ContactOutcome, IgnoreReason};
pub use crate::core::rules::{ContactGate, GateConfig, RecipeMatcher, Rejection};

// Cooldowns
pub use crate::core::cooldown::{
    PairCooldown, PairCooldownRegistry, PairKey, SharedCooldownRegistry,
};

// Host bridge
pub use crate::core::host_bridge::{ContactEvent, HostError, HostEvent, SceneHost};

//=========================================================================
// Combinables
//=========================================================================
//
// Per-object combine state and the registry that resolves object ids to
// that state.
//
// Architecture:
//   CombinableStore
//     └─ HashMap<ObjectId, Combinable>
//          ├─ recipe:   tag / keys compared on contact
//          ├─ settings: authoring values (templates, gates, cooldown)
//          └─ state:    is_initial + kinematics refreshed from the host
//
// Lifecycle:
//   Eligible ──combine (destroy)──> Consumed   (record removed)
//   Eligible ──combine (keep)─────> Spent      (is_initial = false)
//
//=========================================================================

//=== Module Declarations =================================================

mod archetype;
mod ident;
mod settings;
mod store;

//=== Public API ==========================================================

pub use archetype::{Archetypes, CombinableDef};
pub use ident::{IdAllocator, ObjectId};
pub use settings::{CombineSettings, ConfigError, TemplateRef, DEFAULT_PAIR_COOLDOWN_SECONDS};
pub use store::CombinableStore;

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::{Deserialize, Serialize};

//=== CombineState ========================================================

/// Lifecycle state of a combinable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineState {
    /// Still initial; may pass the eligibility gate.
    Eligible,

    /// Took part in a non-destructive combine and stays alive.
    Spent,

    /// Destroyed as part of a combine.
    Consumed,
}

//=== Recipe ==============================================================

/// Recipe fields compared when two objects touch.
///
/// Empty strings mean "not set". Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    /// Category label of this object.
    pub tag: String,

    /// Combines with any object whose `tag` equals this.
    pub combine_with_tag: String,

    /// Key offered by this object.
    pub my_key: String,

    /// Combines with any object whose `my_key` equals this.
    pub combine_with_key: String,
}

impl Recipe {
    /// Returns `true` if no recipe field is populated.
    pub fn is_empty(&self) -> bool {
        self.tag.is_empty()
            && self.combine_with_tag.is_empty()
            && self.my_key.is_empty()
            && self.combine_with_key.is_empty()
    }
}

//=== Combinable ==========================================================

/// One object eligible for pairwise combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Combinable {
    pub id: ObjectId,
    pub recipe: Recipe,
    pub settings: CombineSettings,

    /// `true` until the object takes part in a completed combine.
    pub is_initial: bool,

    //--- Kinematics (refreshed from the host on each contact) ------------
    /// Linear velocity; zero for kinematic or ungoverned objects.
    pub velocity: Vec3,

    /// World-space centre of the object's collision bounds.
    pub bounds_center: Vec3,
}

impl Combinable {
    /// Creates an initial combinable with no recipe and default settings.
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            recipe: Recipe::default(),
            settings: CombineSettings::default(),
            is_initial: true,
            velocity: Vec3::ZERO,
            bounds_center: Vec3::ZERO,
        }
    }

    /// Current lifecycle state. Consumed objects no longer have a record,
    /// so a live record is either eligible or spent.
    pub fn state(&self) -> CombineState {
        if self.is_initial {
            CombineState::Eligible
        } else {
            CombineState::Spent
        }
    }

    //--- Fluent Setters ---------------------------------------------------

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.recipe.tag = tag.into();
        self
    }

    pub fn with_combine_with_tag(mut self, tag: impl Into<String>) -> Self {
        self.recipe.combine_with_tag = tag.into();
        self
    }

    pub fn with_my_key(mut self, key: impl Into<String>) -> Self {
        self.recipe.my_key = key.into();
        self
    }

    pub fn with_combine_with_key(mut self, key: impl Into<String>) -> Self {
        self.recipe.combine_with_key = key.into();
        self
    }

    pub fn with_settings(mut self, settings: CombineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_initial(mut self, is_initial: bool) -> Self {
        self.is_initial = is_initial;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

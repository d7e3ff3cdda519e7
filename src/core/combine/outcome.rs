//=========================================================================
// Contact Outcome
//=========================================================================
//
// Result of feeding one contact into the combine engine. None of the
// negative variants is an error: most contacts are with unrelated
// geometry and simply do nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};

//=== Internal Dependencies ===============================================

use crate::core::combinable::{CombineState, ObjectId};
use crate::core::cooldown::PairKey;
use crate::core::rules::Rejection;

//=== IgnoreReason ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Both sides of the contact are the same object.
    SelfContact,

    /// At least one side has no combinable record.
    MissingCapability,

    /// The contact time is NaN or infinite.
    InvalidTime,
}

//=== CombineEvent ========================================================

/// A completed combine.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineEvent {
    pub pair: PairKey,

    /// Object whose contact report won the claim.
    pub reporter: ObjectId,
    pub other: ObjectId,

    pub position: Vec3,
    pub orientation: Quat,

    pub result_spawned: bool,
    pub particle_spawned: bool,

    /// `Consumed` when both originals were destroyed, `Spent` otherwise.
    pub state: CombineState,

    /// Host clock of the winning contact.
    pub time: f64,
}

//=== ContactOutcome ======================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    /// Not a combine candidate at all.
    Ignored(IgnoreReason),

    /// The contact gate turned the pair down.
    Rejected(Rejection),

    /// The pair combined moments ago; this is a duplicate report.
    Suppressed,

    /// The pair combined.
    Combined(CombineEvent),
}

impl ContactOutcome {
    pub fn is_combined(&self) -> bool {
        matches!(self, Self::Combined(_))
    }

    pub fn combined(&self) -> Option<&CombineEvent> {
        match self {
            Self::Combined(event) => Some(event),
            _ => None,
        }
    }
}

//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-core contract: the collaborators the combine engine calls into
// and the events the host sends to the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::combinable::{Combinable, ObjectId, TemplateRef};

//=== SceneHost ===========================================================

/// Scene services the combine engine relies on.
///
/// Implemented by the host (physics world, renderer, entity lifecycle).
/// The engine only reads geometry and velocity, and only requests spawns
/// and destructions; it never decides how contacts are detected.
pub trait SceneHost {
    /// Centre of the union of the object's collision bounds, in world
    /// space. `None` when the object has no collision geometry.
    fn bounds_center(&self, object: ObjectId) -> Option<Vec3>;

    /// The object's reference-point position in world space.
    fn origin(&self, object: ObjectId) -> Vec3;

    /// Current linear velocity. `None` for kinematic or ungoverned objects.
    fn linear_velocity(&self, object: ObjectId) -> Option<Vec3>;

    /// Instantiates `template` at `position` with `orientation`.
    fn spawn(&mut self, template: &TemplateRef, position: Vec3, orientation: Quat) -> Result<(), HostError>;

    /// Schedules removal of `object` no later than the end of the current
    /// step. Must tolerate objects already being destroyed.
    fn destroy(&mut self, object: ObjectId);
}

//=== HostError ===========================================================

/// Failures reported by a [`SceneHost`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host has no template with this name.
    #[error("missing template: {0}")]
    MissingTemplate(String),

    /// The host could not instantiate the template.
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
}

//=== ContactEvent ========================================================

/// One contact-start notification.
///
/// `reporter` is the body the collision layer notified; `other` is the
/// body it touched. A physical touch may arrive once or twice (once per
/// body); the engine tolerates both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub reporter: ObjectId,
    pub other: ObjectId,

    /// Host clock at the time of contact, in seconds.
    pub time: f64,
}

impl ContactEvent {
    pub fn new(reporter: ObjectId, other: ObjectId, time: f64) -> Self {
        Self { reporter, other, time }
    }

    /// The same contact as seen from the other body.
    pub fn mirrored(self) -> Self {
        Self {
            reporter: self.other,
            other: self.reporter,
            time: self.time,
        }
    }
}

//=== HostEvent ===========================================================

/// Messages sent from the host to the logic thread.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Contacts reported during one host step, in arrival order.
    Contacts(Vec<ContactEvent>),

    /// An object became eligible (spawn or scene load).
    Register(Box<Combinable>),

    /// An object was destroyed outside of a combine.
    Unregister(ObjectId),

    /// Stop the logic thread after the current tick.
    Shutdown,
}

//=========================================================================
// Combinable Store
//=========================================================================
//
// Explicit id → combinable map. Answers "does this object have the
// combine capability" in O(1) when a contact is reported.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec3;
use log::warn;

//=== Internal Dependencies ===============================================

use super::{Combinable, CombineState, ObjectId};
use crate::core::host_bridge::SceneHost;

//=== CombinableStore =====================================================

/// Registry of every object currently able to combine.
#[derive(Debug, Default)]
pub struct CombinableStore {
    records: HashMap<ObjectId, Combinable>,
}

impl CombinableStore {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a combinable, replacing any record with the same id.
    pub fn insert(&mut self, combinable: Combinable) -> Option<Combinable> {
        let previous = self.records.insert(combinable.id, combinable);
        if let Some(prev) = &previous {
            warn!("Combinable {} was already registered and has been replaced", prev.id);
        }
        previous
    }

    /// Removes a record; its object can no longer take part in combines.
    pub fn remove(&mut self, id: ObjectId) -> Option<Combinable> {
        self.records.remove(&id)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: ObjectId) -> Option<&Combinable> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Combinable> {
        self.records.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.records.contains_key(&id)
    }

    /// Lifecycle state of a registered object, `None` if unknown.
    pub fn state(&self, id: ObjectId) -> Option<CombineState> {
        self.records.get(&id).map(Combinable::state)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combinable> {
        self.records.values()
    }

    //--- Kinematics -------------------------------------------------------

    /// Pulls the current velocity and bounds centre of `id` from the host.
    ///
    /// Objects without velocity read as stationary; objects without
    /// collision geometry use their origin as bounds centre. Returns `false`
    /// if `id` is not registered.
    pub fn refresh_kinematics<H>(&mut self, id: ObjectId, host: &H) -> bool
    where
        H: SceneHost + ?Sized,
    {
        let Some(record) = self.records.get_mut(&id) else {
            return false;
        };

        record.velocity = host.linear_velocity(id).unwrap_or(Vec3::ZERO);
        record.bounds_center = host.bounds_center(id).unwrap_or_else(|| host.origin(id));
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Shared Test Host
//=========================================================================
//
// In-memory `SceneHost` that records every spawn and destroy request.
//
//=========================================================================

#![allow(dead_code)]

use std::collections::HashMap;

use aetheric_fusion::prelude::*;
use glam::{Quat, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Spawned {
    pub template: String,
    pub position: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub bounds: HashMap<ObjectId, Vec3>,
    pub origins: HashMap<ObjectId, Vec3>,
    pub velocities: HashMap<ObjectId, Vec3>,
    pub missing_templates: Vec<String>,
    pub spawned: Vec<Spawned>,
    pub destroyed: Vec<ObjectId>,
}

impl RecordingHost {
    pub fn place(&mut self, id: ObjectId, bounds_center: Vec3) {
        self.bounds.insert(id, bounds_center);
    }

    pub fn spawned_templates(&self) -> Vec<&str> {
        self.spawned.iter().map(|s| s.template.as_str()).collect()
    }
}

impl SceneHost for RecordingHost {
    fn bounds_center(&self, object: ObjectId) -> Option<Vec3> {
        self.bounds.get(&object).copied()
    }

    fn origin(&self, object: ObjectId) -> Vec3 {
        self.origins.get(&object).copied().unwrap_or(Vec3::ZERO)
    }

    fn linear_velocity(&self, object: ObjectId) -> Option<Vec3> {
        self.velocities.get(&object).copied()
    }

    fn spawn(&mut self, template: &TemplateRef, position: Vec3, orientation: Quat) -> Result<(), HostError> {
        if self.missing_templates.iter().any(|name| name == template.name()) {
            return Err(HostError::MissingTemplate(template.name().to_string()));
        }
        self.spawned.push(Spawned {
            template: template.name().to_string(),
            position,
            orientation,
        });
        Ok(())
    }

    fn destroy(&mut self, object: ObjectId) {
        self.destroyed.push(object);
    }
}

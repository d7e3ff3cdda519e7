//=========================================================================
// Combine Settings
//=========================================================================
//
// Per-object authoring values, read at decision time.
//
// Every field has a default so partially specified data deserializes
// cleanly; `validate()` guards the numeric fields before an object is
// admitted to the store.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

/// Errors raised while loading or validating combine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Speed threshold is negative, NaN, or infinite.
    #[error("min_relative_speed must be finite and >= 0, got {0}")]
    InvalidSpeedThreshold(f32),

    /// Cooldown window is negative, NaN, or infinite.
    #[error("pair_cooldown_seconds must be finite and >= 0, got {0}")]
    InvalidCooldown(f64),

    /// Spawn offset has a non-finite component.
    #[error("spawn_offset must be finite, got {0}")]
    InvalidSpawnOffset(Vec3),

    /// Requested archetype is not defined.
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),

    /// An archetype failed validation.
    #[error("archetype `{name}`: {source}")]
    Archetype {
        name: String,
        #[source]
        source: Box<ConfigError>,
    },

    /// JSON decoding failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

//=== TemplateRef =========================================================

/// Name of a spawnable template (result object or particle effect).
///
/// An empty name is treated the same as no template at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TemplateRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

//=== CombineSettings =====================================================

/// Default cooldown window applied to a pair after a combine, in seconds.
pub const DEFAULT_PAIR_COOLDOWN_SECONDS: f64 = 0.2;

/// Authoring values attached to one combinable object.
///
/// When a contact is reported, the settings of the reporting object drive
/// the decision (gate thresholds, cooldown window, destroy mode). Templates
/// fall back to the other object's when the reporter has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineSettings {
    /// Template spawned at the combine point.
    pub result_template: Option<TemplateRef>,

    /// Optional effect spawned alongside the result.
    pub particle_template: Option<TemplateRef>,

    /// Destroy both originals (`true`) or keep them alive as spent (`false`).
    pub destroy_originals: bool,

    /// Only combine when both objects are still initial.
    pub require_both_initial: bool,

    /// Minimum relative speed; `0` disables the speed gate.
    pub min_relative_speed: f32,

    /// How long a combined pair stays suppressed.
    pub pair_cooldown_seconds: f64,

    /// Offset added to the midpoint of the two bounds centres.
    pub spawn_offset: Vec3,
}

impl Default for CombineSettings {
    fn default() -> Self {
        Self {
            result_template: None,
            particle_template: None,
            destroy_originals: true,
            require_both_initial: true,
            min_relative_speed: 0.0,
            pair_cooldown_seconds: DEFAULT_PAIR_COOLDOWN_SECONDS,
            spawn_offset: Vec3::ZERO,
        }
    }
}

impl CombineSettings {
    /// Checks numeric fields for values the engine cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_relative_speed.is_finite() || self.min_relative_speed < 0.0 {
            return Err(ConfigError::InvalidSpeedThreshold(self.min_relative_speed));
        }
        if !self.pair_cooldown_seconds.is_finite() || self.pair_cooldown_seconds < 0.0 {
            return Err(ConfigError::InvalidCooldown(self.pair_cooldown_seconds));
        }
        if !self.spawn_offset.is_finite() {
            return Err(ConfigError::InvalidSpawnOffset(self.spawn_offset));
        }
        Ok(())
    }

    /// Result template, ignoring empty names.
    pub fn result(&self) -> Option<&TemplateRef> {
        self.result_template.as_ref().filter(|t| !t.is_empty())
    }

    /// Particle template, ignoring empty names.
    pub fn particle(&self) -> Option<&TemplateRef> {
        self.particle_template.as_ref().filter(|t| !t.is_empty())
    }

    //--- Fluent Setters ---------------------------------------------------

    pub fn with_result(mut self, template: impl Into<TemplateRef>) -> Self {
        self.result_template = Some(template.into());
        self
    }

    pub fn with_particle(mut self, template: impl Into<TemplateRef>) -> Self {
        self.particle_template = Some(template.into());
        self
    }

    pub fn with_destroy_originals(mut self, destroy: bool) -> Self {
        self.destroy_originals = destroy;
        self
    }

    pub fn with_require_both_initial(mut self, require: bool) -> Self {
        self.require_both_initial = require;
        self
    }

    pub fn with_min_relative_speed(mut self, speed: f32) -> Self {
        self.min_relative_speed = speed;
        self
    }

    pub fn with_pair_cooldown(mut self, seconds: f64) -> Self {
        self.pair_cooldown_seconds = seconds;
        self
    }

    pub fn with_spawn_offset(mut self, offset: Vec3) -> Self {
        self.spawn_offset = offset;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

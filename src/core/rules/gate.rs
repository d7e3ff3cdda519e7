//=========================================================================
// Contact Gate
//=========================================================================
//
// Accept/reject decision for a single contact, cheapest check first:
//
//   1. eligibility   (both initial, when required)
//   2. speed         (|va - vb| >= threshold, when threshold > 0)
//   3. recipe        (RecipeMatcher)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::RecipeMatcher;
use crate::core::combinable::{Combinable, CombineSettings};

//=== GateConfig ==========================================================

/// Gate thresholds, taken from the reporting object's settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    pub require_both_initial: bool,
    pub min_relative_speed: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            require_both_initial: true,
            min_relative_speed: 0.0,
        }
    }
}

impl From<&CombineSettings> for GateConfig {
    fn from(settings: &CombineSettings) -> Self {
        Self {
            require_both_initial: settings.require_both_initial,
            min_relative_speed: settings.min_relative_speed,
        }
    }
}

//=== Rejection ===========================================================

/// Why the gate turned a contact down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// At least one side is no longer initial.
    NotInitial,

    /// Relative speed below the configured threshold.
    TooSlow { relative_speed: f32, threshold: f32 },

    /// Neither key nor tag recipe matched.
    NoRecipe,
}

//=== ContactGate =========================================================

/// Pure predicate over two combinables and a [`GateConfig`].
pub struct ContactGate;

impl ContactGate {
    /// Returns `true` if every active check passes.
    pub fn accept(a: &Combinable, b: &Combinable, config: &GateConfig) -> bool {
        Self::evaluate(a, b, config).is_ok()
    }

    /// Runs the checks in order and reports the first that fails.
    pub fn evaluate(a: &Combinable, b: &Combinable, config: &GateConfig) -> Result<(), Rejection> {
        if config.require_both_initial && !(a.is_initial && b.is_initial) {
            return Err(Rejection::NotInitial);
        }

        // A zero threshold disables the gate; it never demands zero speed.
        if config.min_relative_speed > 0.0 {
            let relative_speed = (a.velocity - b.velocity).length();
            if relative_speed < config.min_relative_speed {
                return Err(Rejection::TooSlow {
                    relative_speed,
                    threshold: config.min_relative_speed,
                });
            }
        }

        if !RecipeMatcher::matches(a, b) {
            return Err(Rejection::NoRecipe);
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Combine Engine
//=========================================================================
//
// Decides every contact and runs the combine transaction.
//
// on_contact(host, contact)
//   0. reject non-finite contact time    → Ignored
//   1. resolve both combinables          → Ignored    (missing / self)
//   2. refresh kinematics from host
//   3. ContactGate::evaluate             → Rejected
//   4. cooldowns.try_claim(pair)         → Suppressed (duplicate report)
//   5. spawn position = midpoint(bounds) + offset
//   6. spawn result / particle           (failures skip that spawn only)
//   7. destroy both (Consumed) or demote both (Spent)
//                                        → Combined
//
// The engine keeps nothing about a combine beyond the cooldown entry; the
// returned event is the only record of it.
//
// Steps 4-7 run at most once per physical contact as long as every
// duplicate report arrives inside the cooldown window of the first.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{CombineEvent, ContactOutcome, IgnoreReason};
use crate::core::combinable::{
    Combinable, CombinableStore, CombineState, ConfigError, ObjectId, TemplateRef,
};
use crate::core::cooldown::{PairCooldown, PairCooldownRegistry, PairKey};
use crate::core::host_bridge::{ContactEvent, SceneHost};
use crate::core::rules::{ContactGate, GateConfig};

//=== Spawn Geometry ======================================================

/// Point at which a combine result appears: the midpoint of both bounds
/// centres, shifted by `offset`.
#[inline]
pub fn spawn_position(a: Vec3, b: Vec3, offset: Vec3) -> Vec3 {
    (a + b) * 0.5 + offset
}

/// Orientation given to every spawned result.
pub const SPAWN_ORIENTATION: Quat = Quat::IDENTITY;

//=== CombinePlan =========================================================

/// Everything the transaction needs, resolved while the records are
/// borrowed.
struct CombinePlan {
    position: Vec3,
    result: Option<TemplateRef>,
    particle: Option<TemplateRef>,
    destroy_originals: bool,
}

impl CombinePlan {
    fn resolve(reporter: &Combinable, other: &Combinable) -> Self {
        let settings = &reporter.settings;

        Self {
            position: spawn_position(
                reporter.bounds_center,
                other.bounds_center,
                settings.spawn_offset,
            ),
            result: settings.result().or_else(|| other.settings.result()).cloned(),
            particle: settings.particle().or_else(|| other.settings.particle()).cloned(),
            destroy_originals: settings.destroy_originals,
        }
    }
}

//=== CombineEngine =======================================================

/// Pairwise combine decision engine.
///
/// Owns the combinable registry and the cooldown service. All decisions go
/// through [`CombineEngine::on_contact`], one contact at a time.
pub struct CombineEngine<C: PairCooldown = PairCooldownRegistry> {
    store: CombinableStore,
    cooldowns: C,
}

impl CombineEngine<PairCooldownRegistry> {
    /// Creates an engine with its own cooldown registry.
    pub fn new() -> Self {
        Self::with_cooldowns(PairCooldownRegistry::new())
    }
}

impl Default for CombineEngine<PairCooldownRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PairCooldown> CombineEngine<C> {
    /// Creates an engine around an existing cooldown service.
    pub fn with_cooldowns(cooldowns: C) -> Self {
        Self {
            store: CombinableStore::new(),
            cooldowns,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Validates and registers a combinable.
    pub fn register(&mut self, combinable: Combinable) -> Result<(), ConfigError> {
        combinable.settings.validate()?;
        self.store.insert(combinable);
        Ok(())
    }

    /// Forgets an object destroyed outside of a combine.
    pub fn unregister(&mut self, id: ObjectId) -> Option<Combinable> {
        self.store.remove(id)
    }

    //--- Accessors --------------------------------------------------------

    pub fn store(&self) -> &CombinableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CombinableStore {
        &mut self.store
    }

    pub fn cooldowns(&self) -> &C {
        &self.cooldowns
    }

    pub fn cooldowns_mut(&mut self) -> &mut C {
        &mut self.cooldowns
    }

    //--- Decision ---------------------------------------------------------

    /// Decides one contact-start notification.
    pub fn on_contact<H>(&mut self, host: &mut H, contact: ContactEvent) -> ContactOutcome
    where
        H: SceneHost + ?Sized,
    {
        let ContactEvent { reporter, other, time: now } = contact;

        if !now.is_finite() {
            trace!("Contact {} -> {} ignored: invalid time {}", reporter, other, now);
            return ContactOutcome::Ignored(IgnoreReason::InvalidTime);
        }

        if reporter == other {
            return ContactOutcome::Ignored(IgnoreReason::SelfContact);
        }

        //--- Step 1-2: Resolve and refresh --------------------------------
        if !(self.store.contains(reporter) && self.store.contains(other)) {
            trace!("Contact {} -> {} ignored: not combinable", reporter, other);
            return ContactOutcome::Ignored(IgnoreReason::MissingCapability);
        }
        self.store.refresh_kinematics(reporter, &*host);
        self.store.refresh_kinematics(other, &*host);

        let (Some(a), Some(b)) = (self.store.get(reporter), self.store.get(other)) else {
            return ContactOutcome::Ignored(IgnoreReason::MissingCapability);
        };

        //--- Step 3: Gate -------------------------------------------------
        if let Err(rejection) = ContactGate::evaluate(a, b, &GateConfig::from(&a.settings)) {
            trace!("Contact {} -> {} rejected: {:?}", reporter, other, rejection);
            return ContactOutcome::Rejected(rejection);
        }

        //--- Step 4: Claim the pair ---------------------------------------
        let pair = PairKey::new(reporter, other);
        if !self.cooldowns.try_claim(pair, now, a.settings.pair_cooldown_seconds) {
            trace!("Contact {} -> {} suppressed: {} cooling down", reporter, other, pair);
            return ContactOutcome::Suppressed;
        }

        //--- Step 5-6: Spawn ----------------------------------------------
        let plan = CombinePlan::resolve(a, b);
        let result_spawned = request_spawn(host, plan.result.as_ref(), plan.position, "result");
        let particle_spawned = request_spawn(host, plan.particle.as_ref(), plan.position, "particle");

        //--- Step 7: Conclude ---------------------------------------------
        let state = if plan.destroy_originals {
            for id in [reporter, other] {
                self.store.remove(id);
                host.destroy(id);
            }
            CombineState::Consumed
        } else {
            for id in [reporter, other] {
                if let Some(record) = self.store.get_mut(id) {
                    record.is_initial = false;
                }
            }
            CombineState::Spent
        };

        debug!(
            "Combined {} + {} at {} ({:?}, result: {}, particle: {})",
            reporter, other, plan.position, state, result_spawned, particle_spawned
        );

        ContactOutcome::Combined(CombineEvent {
            pair,
            reporter,
            other,
            position: plan.position,
            orientation: SPAWN_ORIENTATION,
            result_spawned,
            particle_spawned,
            state,
            time: now,
        })
    }
}

//--- request_spawn() -----------------------------------------------------
//
// Asks the host for one spawn. A missing template or a host failure skips
// this spawn only; the transaction carries on.
//
fn request_spawn<H>(host: &mut H, template: Option<&TemplateRef>, position: Vec3, kind: &str) -> bool
where
    H: SceneHost + ?Sized,
{
    let Some(template) = template else {
        trace!("No {} template; skipping spawn", kind);
        return false;
    };

    match host.spawn(template, position, SPAWN_ORIENTATION) {
        Ok(()) => true,
        Err(e) => {
            warn!("Skipping {} spawn of `{}`: {}", kind, template.name(), e);
            false
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

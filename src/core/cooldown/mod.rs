//=========================================================================
// Pair Cooldowns
//=========================================================================
//
// Duplicate-contact suppression.
//
// The collision layer may report one physical touch twice (once per
// body). The first accepted report claims the pair; any report for the
// same pair inside the cooldown window is dropped.
//
// Components:
// - `pair_key`: commutative pair identifier
// - `registry`: single-owner registry (membership + expiry heap)
// - `shared`:   mutex-guarded handle for multi-threaded hosts
//
//=========================================================================

//=== Module Declarations =================================================

mod pair_key;
mod registry;
mod shared;

//=== Public API ==========================================================

pub use pair_key::PairKey;
pub use registry::{PairCooldownRegistry, DEFAULT_CLEANUP_INTERVAL};
pub use shared::SharedCooldownRegistry;

//=== PairCooldown Trait ==================================================

/// Cooldown service consulted by the combine engine.
///
/// `try_claim` is the only call the engine makes; implementations that
/// can be reached from several threads override it to check and mark
/// atomically.
pub trait PairCooldown {
    /// Returns `true` while `key` is inside its cooldown window.
    fn is_cooling_down(&mut self, key: PairKey, now: f64) -> bool;

    /// Starts a cooldown of `window` seconds for `key`.
    fn mark(&mut self, key: PairKey, now: f64, window: f64);

    /// Marks `key` unless it is already cooling down. Returns `true` if the
    /// caller won the claim.
    fn try_claim(&mut self, key: PairKey, now: f64, window: f64) -> bool {
        if self.is_cooling_down(key, now) {
            return false;
        }
        self.mark(key, now, window);
        true
    }
}

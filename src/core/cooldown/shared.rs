//=========================================================================
// Shared Cooldown Registry
//=========================================================================
//
// Clone-able handle to one registry for hosts that decide contacts on
// more than one thread.
//
// The check-then-mark sequence runs under a single lock acquisition, so
// two threads reporting the same pair can never both pass the check.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use super::{PairCooldown, PairCooldownRegistry, PairKey};

//=== SharedCooldownRegistry ==============================================

/// Thread-safe handle to a [`PairCooldownRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SharedCooldownRegistry {
    inner: Arc<Mutex<PairCooldownRegistry>>,
}

impl SharedCooldownRegistry {
    pub fn new(registry: PairCooldownRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Locks the registry. A poisoned lock is recovered, not propagated.
    pub fn lock(&self) -> MutexGuard<'_, PairCooldownRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl From<PairCooldownRegistry> for SharedCooldownRegistry {
    fn from(registry: PairCooldownRegistry) -> Self {
        Self::new(registry)
    }
}

impl PairCooldown for SharedCooldownRegistry {
    fn is_cooling_down(&mut self, key: PairKey, now: f64) -> bool {
        self.lock().is_cooling_down(key, now)
    }

    fn mark(&mut self, key: PairKey, now: f64, window: f64) {
        self.lock().mark(key, now, window)
    }

    fn try_claim(&mut self, key: PairKey, now: f64, window: f64) -> bool {
        let mut registry = self.lock();
        if registry.is_cooling_down(key, now) {
            return false;
        }
        registry.mark(key, now, window);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

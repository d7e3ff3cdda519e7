//=========================================================================
// Pair Cooldown Registry
//=========================================================================
//
// Remembers recently combined pairs so the second report of the same
// physical contact is suppressed.
//
// Architecture:
//   mark(key, now, window)
//     ├─ active: HashMap<PairKey, CooldownEntry>      (membership)
//     └─ queue:  BinaryHeap<Reverse<QueuedExpiry>>     (min-heap by expiry)
//
//   is_cooling_down(key, now)
//     ├─ cleanup (throttled): pop heap while top has expired
//     └─ membership check against the entry's own window
//
// Each entry carries its own window, so pairs marked with different
// cooldowns are evicted in expiry order rather than insertion order.
// A re-marked key leaves its old heap slot behind; that slot is discarded
// when it surfaces because it no longer matches the live entry.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use log::trace;

//=== Internal Dependencies ===============================================

use super::{PairCooldown, PairKey};

//=== Constants ===========================================================

/// Minimum spacing between two cleanup passes, in seconds.
pub const DEFAULT_CLEANUP_INTERVAL: f64 = 1.0;

//=== CooldownEntry =======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct CooldownEntry {
    marked_at: f64,
    window: f64,
}

impl CooldownEntry {
    #[inline]
    fn expired(&self, now: f64) -> bool {
        now - self.marked_at > self.window
    }

    #[inline]
    fn expires_at(&self) -> f64 {
        self.marked_at + self.window
    }
}

//=== QueuedExpiry ========================================================

#[derive(Debug, Clone, Copy)]
struct QueuedExpiry {
    key: PairKey,
    entry: CooldownEntry,
}

impl Ord for QueuedExpiry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entry
            .expires_at()
            .total_cmp(&other.entry.expires_at())
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for QueuedExpiry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedExpiry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedExpiry {}

//=== PairCooldownRegistry ================================================

/// In-memory, best-effort store of pairs that are cooling down.
///
/// One instance is shared by every combine decision of an engine. Time is
/// measured in seconds on the host's clock.
#[derive(Debug)]
pub struct PairCooldownRegistry {
    active: HashMap<PairKey, CooldownEntry>,
    queue: BinaryHeap<Reverse<QueuedExpiry>>,
    cleanup_interval: f64,
    last_cleanup: Option<f64>,
}

impl PairCooldownRegistry {
    /// Creates a registry with the default cleanup throttle.
    pub fn new() -> Self {
        Self::with_cleanup_interval(DEFAULT_CLEANUP_INTERVAL)
    }

    /// Creates a registry whose cleanup runs at most once per `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is negative or not finite.
    pub fn with_cleanup_interval(interval: f64) -> Self {
        assert!(
            interval.is_finite() && interval >= 0.0,
            "Cleanup interval must be finite and non-negative, got {}",
            interval
        );

        Self {
            active: HashMap::new(),
            queue: BinaryHeap::new(),
            cleanup_interval: interval,
            last_cleanup: None,
        }
    }

    //--- Cooldown Operations ----------------------------------------------

    /// Returns `true` if `key` was marked less than its window ago.
    ///
    /// Runs a throttled cleanup pass first. The answer itself never depends
    /// on whether cleanup ran.
    pub fn is_cooling_down(&mut self, key: PairKey, now: f64) -> bool {
        self.maybe_cleanup(now);

        self.active
            .get(&key)
            .is_some_and(|entry| !entry.expired(now))
    }

    /// Starts a cooldown for `key` lasting `window` seconds from `now`.
    ///
    /// No deduplication: callers mark a pair once per accepted combine.
    /// A non-finite `now` is ignored, as such an entry could never expire.
    pub fn mark(&mut self, key: PairKey, now: f64, window: f64) {
        if !now.is_finite() {
            trace!("Ignoring cooldown mark for {} at invalid time {}", key, now);
            return;
        }

        let entry = CooldownEntry {
            marked_at: now,
            window: window.max(0.0),
        };

        self.active.insert(key, entry);
        self.queue.push(Reverse(QueuedExpiry { key, entry }));
    }

    //--- Maintenance ------------------------------------------------------

    /// Evicts every expired entry now, ignoring the throttle.
    pub fn purge_expired(&mut self, now: f64) -> usize {
        if !now.is_finite() {
            return 0;
        }
        self.last_cleanup = Some(now);
        self.evict_expired(now)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.active.clear();
        self.queue.clear();
        self.last_cleanup = None;
    }

    /// Number of pairs currently tracked (including expired ones not yet
    /// evicted).
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn cleanup_interval(&self) -> f64 {
        self.cleanup_interval
    }

    fn maybe_cleanup(&mut self, now: f64) {
        if !now.is_finite() {
            return;
        }

        if let Some(last) = self.last_cleanup {
            if now - last < self.cleanup_interval {
                return;
            }
        }

        self.last_cleanup = Some(now);
        let evicted = self.evict_expired(now);
        if evicted > 0 {
            trace!("Cooldown cleanup evicted {} pairs ({} remain)", evicted, self.active.len());
        }
    }

    fn evict_expired(&mut self, now: f64) -> usize {
        let mut evicted = 0;

        while let Some(&Reverse(top)) = self.queue.peek() {
            if !top.entry.expired(now) {
                break;
            }
            self.queue.pop();

            // Superseded heap slots no longer own the membership entry.
            if self.active.get(&top.key) == Some(&top.entry) {
                self.active.remove(&top.key);
                evicted += 1;
            }
        }

        evicted
    }

    #[cfg(test)]
    fn queued_len(&self) -> usize {
        self.queue.len()
    }
}

impl Default for PairCooldownRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PairCooldown for PairCooldownRegistry {
    fn is_cooling_down(&mut self, key: PairKey, now: f64) -> bool {
        PairCooldownRegistry::is_cooling_down(self, key, now)
    }

    fn mark(&mut self, key: PairKey, now: f64, window: f64) {
        PairCooldownRegistry::mark(self, key, now, window)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

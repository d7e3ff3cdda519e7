//=========================================================================
// Object Identity
//=========================================================================
//
// Generational identifiers for combinable objects.
//
// Layout:
//   ObjectId { index: u32, generation: u32 } ──to_bits()──> u64
//                                              (generation << 32 | index)
//
// A slot handed back to the allocator is only reused with a bumped
// generation, so an id can never reappear while a cooldown entry that
// references its previous owner is still alive.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use serde::{Deserialize, Serialize};

//=== ObjectId ============================================================

/// Stable identity of a live object.
///
/// Hosts that already have generational entity handles can map them
/// directly with [`ObjectId::new`]; hosts that don't can use
/// [`IdAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    /// Creates an id from a slot index and its generation.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time this id was issued.
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Packs the id into a single `u64` without loss.
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    /// Inverse of [`ObjectId::to_bits`].
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.index, self.generation)
    }
}

//=== IdAllocator =========================================================

/// Hands out [`ObjectId`]s, recycling freed slots with a new generation.
#[derive(Debug, Default)]
pub struct IdAllocator {
    generations: Vec<u32>,
    live: Vec<bool>,
    free: Vec<u32>,
}

impl IdAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh id, reusing a freed slot when one is available.
    pub fn allocate(&mut self) -> ObjectId {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.live[slot] = true;
            return ObjectId::new(index, self.generations[slot]);
        }

        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.live.push(true);
        ObjectId::new(index, 0)
    }

    /// Releases a live id. Returns `false` for stale or unknown ids.
    pub fn release(&mut self, id: ObjectId) -> bool {
        if !self.is_live(id) {
            return false;
        }

        let slot = id.index as usize;
        self.live[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(id.index);
        true
    }

    /// Returns `true` if `id` refers to the current occupant of its slot.
    pub fn is_live(&self, id: ObjectId) -> bool {
        let slot = id.index as usize;
        slot < self.live.len() && self.live[slot] && self.generations[slot] == id.generation
    }

    /// Number of ids currently live.
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|live| **live).count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

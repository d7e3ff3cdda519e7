//=========================================================================
// Pair Key
//=========================================================================
//
// Commutative, collision-free identifier for an unordered object pair.
//
//   PairKey(a, b) = (min(a, b) << 64) | max(a, b)      (u64 id bits)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::combinable::ObjectId;

//=== PairKey =============================================================

/// Unordered pair of object ids packed into one `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(u128);

impl PairKey {
    /// Builds the key; `new(a, b) == new(b, a)`.
    pub fn new(a: ObjectId, b: ObjectId) -> Self {
        let (a, b) = (a.to_bits(), b.to_bits());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(((lo as u128) << 64) | hi as u128)
    }

    /// The two ids, smaller first.
    pub fn ids(self) -> (ObjectId, ObjectId) {
        (
            ObjectId::from_bits((self.0 >> 64) as u64),
            ObjectId::from_bits(self.0 as u64),
        )
    }

    pub fn contains(self, id: ObjectId) -> bool {
        let (lo, hi) = self.ids();
        lo == id || hi == id
    }

    pub fn to_bits(self) -> u128 {
        self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.ids();
        write!(f, "PairKey({lo}, {hi})")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

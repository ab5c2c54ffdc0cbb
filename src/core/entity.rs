//! Card instance identification.
//!
//! Every card that enters play gets a unique `InstanceId`. Ids are allocated
//! from a game-scoped counter when the drafted decks are instantiated at the
//! start of the battle phase.
//!
//! ## ID Layout
//!
//! - `0`: Reserved sentinel ("no card" / "no target"); never allocated
//! - `1..`: Card instances, strictly increasing, never reused
//!
//! ## Usage
//!
//! ```
//! use locm_engine::core::{InstanceCounter, InstanceId};
//!
//! let mut counter = InstanceCounter::default();
//!
//! let first = counter.next_id();
//! let second = counter.next_id();
//!
//! assert_eq!(first, InstanceId(1));
//! assert!(second > first);
//! assert!(!first.is_sentinel());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
///
/// Two instances are the same logical card iff their ids match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// The sentinel id. Denotes "no card" and is never allocated.
    pub const NONE: InstanceId = InstanceId(0);

    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is the sentinel id.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for instance ids.
///
/// Starts at the sentinel and hands out `1, 2, 3, ...`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceCounter {
    last: u32,
}

impl InstanceCounter {
    /// Allocate the next instance id.
    pub fn next_id(&mut self) -> InstanceId {
        self.last += 1;
        InstanceId(self.last)
    }

    /// Number of ids allocated so far.
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(InstanceId::NONE.is_sentinel());
        assert!(!InstanceId(1).is_sentinel());
        assert_eq!(InstanceId::NONE.raw(), 0);
    }

    #[test]
    fn test_counter_is_strictly_increasing() {
        let mut counter = InstanceCounter::default();

        let ids: Vec<_> = (0..10).map(|_| counter.next_id()).collect();

        assert_eq!(ids[0], InstanceId(1));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(counter.allocated(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", InstanceId(42)), "42");
    }

    #[test]
    fn test_serialization() {
        let id = InstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

//! Board lanes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::MAX_LANE_SIZE;
use crate::core::entity::InstanceId;

/// One of the two board lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Both lanes, left first.
    pub const ALL: [Lane; 2] = [Lane::Left, Lane::Right];

    /// Lane index (0 = left, 1 = right).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Right => 1,
        }
    }

    /// Lane from its index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Creatures in one lane, in summon order.
pub type LaneCards = SmallVec<[InstanceId; MAX_LANE_SIZE]>;

/// A player's two lanes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    lanes: [LaneCards; 2],
}

impl Board {
    #[must_use]
    pub fn lane(&self, lane: Lane) -> &[InstanceId] {
        &self.lanes[lane.index()]
    }

    pub fn lane_mut(&mut self, lane: Lane) -> &mut LaneCards {
        &mut self.lanes[lane.index()]
    }

    #[must_use]
    pub fn is_full(&self, lane: Lane) -> bool {
        self.lanes[lane.index()].len() >= MAX_LANE_SIZE
    }

    /// Which lane holds a creature, if any.
    #[must_use]
    pub fn lane_of(&self, id: InstanceId) -> Option<Lane> {
        Lane::ALL.into_iter().find(|&lane| self.lane(lane).contains(&id))
    }

    /// Lane and position of a creature.
    #[must_use]
    pub fn position(&self, id: InstanceId) -> Option<(Lane, usize)> {
        let lane = self.lane_of(id)?;
        let pos = self.lane(lane).iter().position(|&c| c == id)?;
        Some((lane, pos))
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.lane_of(id).is_some()
    }

    /// Creature count across both lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.iter().map(|l| l.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All creatures, left lane first, paired with their lane.
    pub fn iter(&self) -> impl Iterator<Item = (Lane, InstanceId)> + '_ {
        Lane::ALL
            .into_iter()
            .flat_map(move |lane| self.lane(lane).iter().map(move |&id| (lane, id)))
    }

    /// Remove every creature matching the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(InstanceId) -> bool) {
        for lane in &mut self.lanes {
            lane.retain(|id| keep(*id));
        }
    }

    pub fn clear(&mut self) {
        for lane in &mut self.lanes {
            lane.clear();
        }
    }
}

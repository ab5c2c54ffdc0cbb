//! Card locations: lanes on the board and the location codes used when
//! resolving an instance id.
//!
//! Hands, decks and lanes store `InstanceId`s only; the card data lives in the
//! arena owned by `GameState`.

pub mod lane;

pub use lane::{Board, Lane, LaneCards};

use serde::{Deserialize, Serialize};

/// Where an instance was found, relative to the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    PlayerHand,
    EnemyHand,
    PlayerLane(Lane),
    EnemyLane(Lane),
}

impl Location {
    /// Native protocol location code: 0 own hand, 1 own board, -1 enemy board.
    ///
    /// The enemy hand is never shown and has no code.
    #[must_use]
    pub const fn protocol_code(self) -> Option<i32> {
        match self {
            Location::PlayerHand => Some(0),
            Location::PlayerLane(_) => Some(1),
            Location::EnemyLane(_) => Some(-1),
            Location::EnemyHand => None,
        }
    }

    /// Lane, for board locations.
    #[must_use]
    pub const fn lane(self) -> Option<Lane> {
        match self {
            Location::PlayerLane(lane) | Location::EnemyLane(lane) => Some(lane),
            _ => None,
        }
    }
}
